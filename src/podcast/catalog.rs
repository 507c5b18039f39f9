//! Podcast name → feed URL table

use crate::error::{VoxError, VoxResult};
use crate::utils::fuzzy::find_best_match;
use reqwest::Url;
use std::collections::BTreeMap;

/// Static, read-only table of podcasts the controller can play
#[derive(Debug, Clone, Default)]
pub struct PodcastCatalog {
    feeds: BTreeMap<String, String>,
}

impl PodcastCatalog {
    /// Build a catalog, normalizing names to lowercase.
    ///
    /// Fails if a URL does not parse or two names collide after normalization.
    pub fn new<I, K, V>(entries: I) -> VoxResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut feeds = BTreeMap::new();
        for (name, url) in entries {
            let name = name.as_ref().trim().to_lowercase();
            let url = url.as_ref();
            Url::parse(url).map_err(|e| {
                VoxError::Config(format!("podcast '{}' has an invalid feed URL '{}': {}", name, url, e))
            })?;
            if feeds.insert(name.clone(), url.to_string()).is_some() {
                return Err(VoxError::Config(format!("podcast '{}' is listed twice", name)));
            }
        }
        Ok(Self { feeds })
    }

    /// Exact lookup of an already-lowercased, trimmed name
    pub fn feed_url(&self, name: &str) -> Option<&str> {
        self.feeds.get(name).map(String::as_str)
    }

    /// Closest known name, used only as a logging hint
    pub fn suggest(&self, name: &str) -> Option<String> {
        let names: Vec<String> = self.feeds.keys().cloned().collect();
        find_best_match(name, &names, 0.6).map(|m| m.value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.feeds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}
