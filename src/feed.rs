//! Podcast feed retrieval
//!
//! Fetches RSS/Atom documents over HTTP and reduces them to the ordered list
//! of episodes with their links, as published.

use crate::error::{VoxError, VoxResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;
use tracing::{debug, info, warn};

/// One feed entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    /// Link hrefs in document order (`<link>`, `<link href>`, `<enclosure url>`)
    pub links: Vec<String>,
}

impl Episode {
    /// First link whose href contains `marker` (e.g. ".mp3")
    pub fn playable_link(&self, marker: &str) -> Option<&str> {
        self.links
            .iter()
            .map(String::as_str)
            .find(|href| href.contains(marker))
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed at `url`, newest entry first
    async fn fetch(&self, url: &str) -> Result<Vec<Episode>>;
}

/// Feed source backed by HTTP
pub struct HttpFeedSource {
    client: Client,
    retries: usize,
}

impl HttpFeedSource {
    pub fn new(retries: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("voxhome/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, retries })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<Episode>> {
        info!("📥 Fetching feed: {}", url);

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(250)
            .max_delay(Duration::from_secs(4))
            .map(jitter)
            .take(self.retries);

        let body = Retry::spawn(strategy, || {
            let request = self.client.get(url);
            async move {
                let response = request.send().await?.error_for_status()?;
                response.text().await
            }
        })
        .await
        .map_err(|e| {
            warn!("⚠️ Feed request failed for {}: {}", url, e);
            e
        })
        .with_context(|| format!("Could not download feed {}", url))?;

        let episodes = parse_feed(&body)?;
        debug!("Feed {} has {} entries", url, episodes.len());
        Ok(episodes)
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Parse an RSS 2.0 or Atom document into episodes.
///
/// Only `<item>` (RSS) and `<entry>` (Atom) children are considered.
/// Namespaced elements are matched by local name.
pub fn parse_feed(xml: &str) -> VoxResult<Vec<Episode>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut episodes = Vec::new();
    let mut current: Option<Episode> = None;
    let mut in_link = false;
    let mut in_title = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"item" | b"entry" => current = Some(Episode::default()),
                b"link" => {
                    if let Some(episode) = current.as_mut() {
                        // Atom links carry the target in href, RSS links in their text
                        match attribute(e, b"href") {
                            Some(href) => episode.links.push(href),
                            None => in_link = true,
                        }
                    }
                }
                b"enclosure" => {
                    if let (Some(episode), Some(url)) = (current.as_mut(), attribute(e, b"url")) {
                        episode.links.push(url);
                    }
                }
                b"title" => in_title = current.is_some(),
                _ => (),
            },
            Ok(Event::Empty(ref e)) => {
                let key: &[u8] = match e.local_name().as_ref() {
                    b"link" => b"href",
                    b"enclosure" => b"url",
                    _ => continue,
                };
                if let (Some(episode), Some(href)) = (current.as_mut(), attribute(e, key)) {
                    episode.links.push(href);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(episode), Ok(text)) = (current.as_mut(), e.unescape()) {
                    if in_link {
                        episode.links.push(text.into_owned());
                    } else if in_title {
                        episode.title.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(episode) = current.as_mut() {
                    let text = String::from_utf8_lossy(e).into_owned();
                    if in_link {
                        episode.links.push(text);
                    } else if in_title {
                        episode.title.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"item" | b"entry" => {
                    if let Some(episode) = current.take() {
                        episodes.push(episode);
                    }
                }
                b"link" => in_link = false,
                b"title" => in_title = false,
                _ => (),
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(VoxError::Feed(format!(
                    "malformed feed at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => (),
        }
    }

    Ok(episodes)
}
