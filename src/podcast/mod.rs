//! Podcast playback
//!
//! [`PodcastController`] resolves a spoken podcast name to a feed, picks an
//! episode, and drives the media engine through
//! `Stopped → Starting → Playing ⇄ Paused`.
//!
//! Every engine transition runs while holding the session lock, so voice
//! commands and the device-wide pause/resume hooks never interleave. Feed
//! downloads happen outside the lock; a request that was overtaken by a later
//! stop or play while its feed was loading is dropped.

use crate::actions::Action;
use crate::feed::FeedSource;
use crate::players::MediaEngine;
use crate::tts::{say, TtsEngine};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod button;
pub mod catalog;
pub mod error;
pub mod state;

pub use button::ButtonWatch;
pub use catalog::PodcastCatalog;
pub use error::PodcastError;
pub use state::{select_episode, PlaybackState, PodcastCommand, SelectionMode};

/// Tunables for starting playback
#[derive(Debug, Clone)]
pub struct PlaybackSettings {
    /// Substring that marks an episode link as audio
    pub audio_marker: String,
    /// Delay between issuing play and checking the engine state
    pub settle: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            audio_marker: ".mp3".to_string(),
            settle: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    state: PlaybackState,
    /// URL last loaded into the engine. `None` until the first playback.
    media: Option<String>,
    /// Bumped by every stop and play request
    generation: u64,
}

impl Session {
    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            info!("🎧 Podcast state {} -> {}", self.state, new_state);
        }
        self.state = new_state;
    }
}

/// Stateful podcast action
pub struct PodcastController {
    keyword: String,
    catalog: PodcastCatalog,
    settings: PlaybackSettings,
    tts: Arc<dyn TtsEngine>,
    engine: Arc<dyn MediaEngine>,
    feeds: Arc<dyn FeedSource>,
    session: Mutex<Session>,
}

impl PodcastController {
    pub fn new(
        keyword: impl Into<String>,
        catalog: PodcastCatalog,
        settings: PlaybackSettings,
        tts: Arc<dyn TtsEngine>,
        engine: Arc<dyn MediaEngine>,
        feeds: Arc<dyn FeedSource>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            catalog,
            settings,
            tts,
            engine,
            feeds,
            session: Mutex::new(Session::default()),
        }
    }

    /// Current playback state
    pub async fn state(&self) -> PlaybackState {
        self.session.lock().await.state
    }

    /// Whether any media has ever been loaded into the engine
    pub async fn has_session(&self) -> bool {
        self.session.lock().await.media.is_some()
    }

    pub fn catalog(&self) -> &PodcastCatalog {
        &self.catalog
    }

    /// Stop playback and return to `Stopped`
    pub async fn stop(&self) {
        let mut session = self.session.lock().await;
        if session.media.is_some() {
            if let Err(e) = self.engine.stop().await {
                warn!("⚠️ {} failed to stop: {}", self.engine.name(), e);
            }
        } else {
            debug!("Stop requested before any podcast was played");
        }
        session.generation += 1;
        session.set_state(PlaybackState::Stopped);
    }

    /// Device-wide pause hook. Pauses only a playing session.
    pub async fn pause(&self) {
        let mut session = self.session.lock().await;
        info!("⏸️ Pause requested, podcast state is {}", session.state);
        if session.media.is_none() {
            debug!("No podcast session, nothing to pause");
            return;
        }
        if session.state != PlaybackState::Playing {
            return;
        }
        match self.engine.pause().await {
            Ok(()) => session.set_state(PlaybackState::Paused),
            Err(e) => warn!("⚠️ {} failed to pause: {}", self.engine.name(), e),
        }
    }

    /// Device-wide resume hook. Resumes only a paused session.
    pub async fn resume(&self) {
        let mut session = self.session.lock().await;
        info!("▶️ Resume requested, podcast state is {}", session.state);
        if session.media.is_none() {
            debug!("No podcast session, nothing to resume");
            return;
        }
        if session.state != PlaybackState::Paused {
            return;
        }
        match self.engine.play().await {
            Ok(()) => session.set_state(PlaybackState::Playing),
            Err(e) => warn!("⚠️ {} failed to resume: {}", self.engine.name(), e),
        }
    }

    /// Spoken "resume": plays whatever media is loaded, from any state
    async fn resume_command(&self) {
        let mut session = self.session.lock().await;
        if session.media.is_none() {
            info!("Nothing to resume, no podcast has been played yet");
            return;
        }
        match self.engine.play().await {
            Ok(()) => session.set_state(PlaybackState::Playing),
            Err(e) => warn!("⚠️ {} failed to resume: {}", self.engine.name(), e),
        }
    }

    async fn play(&self, name: &str, mode: SelectionMode) {
        let ticket = {
            let mut session = self.session.lock().await;

            // A new request replaces whatever was playing
            if session.media.is_some() && session.state != PlaybackState::Stopped {
                if let Err(e) = self.engine.stop().await {
                    warn!("⚠️ {} failed to stop previous podcast: {}", self.engine.name(), e);
                }
            }
            session.generation += 1;
            session.set_state(PlaybackState::Stopped);
            session.generation
        };

        info!("🔎 Looking for podcast: '{}' ({:?})", name, mode);
        let result = match self.catalog.feed_url(name) {
            Some(feed_url) => match self.choose_episode(name, feed_url, mode).await {
                Ok(url) => self.start_episode(ticket, url).await,
                Err(err) => Err(err),
            },
            None => {
                if let Some(hint) = self.catalog.suggest(name) {
                    info!("💡 Closest known podcast to '{}' is '{}'", name, hint);
                }
                Err(PodcastError::NotFound(name.to_string()))
            }
        };

        if let Err(err) = result {
            warn!("❌ Podcast request failed: {}", err);
            say(self.tts.as_ref(), &err.apology(name)).await;
        }
    }

    /// Fetch the feed and pick the episode URL. Runs without the session lock.
    async fn choose_episode(
        &self,
        name: &str,
        feed_url: &str,
        mode: SelectionMode,
    ) -> Result<String, PodcastError> {
        info!("📡 Podcast feed: {}", feed_url);
        let episodes = self
            .feeds
            .fetch(feed_url)
            .await
            .map_err(|e| PodcastError::Feed {
                name: name.to_string(),
                reason: format!("{:#}", e),
            })?;
        debug!("Podcast feed length: {}", episodes.len());

        let index = {
            let mut rng = rand::thread_rng();
            select_episode(episodes.len(), mode, &mut rng)
        }
        .ok_or_else(|| PodcastError::EmptyFeed(name.to_string()))?;
        let url = episodes[index]
            .playable_link(&self.settings.audio_marker)
            .ok_or_else(|| PodcastError::NoPlayableLink {
                name: name.to_string(),
                index,
            })?
            .to_string();
        info!("🎙️ Podcast episode {}: {}", index, url);
        Ok(url)
    }

    /// Load and play `url`, unless a later request took over meanwhile
    async fn start_episode(&self, ticket: u64, url: String) -> Result<(), PodcastError> {
        let mut session = self.session.lock().await;
        if session.generation != ticket {
            info!("⏭️ Podcast request superseded, not playing {}", url);
            return Ok(());
        }

        session.set_state(PlaybackState::Starting);
        let result = self.start_engine(&mut session, &url).await;
        match result {
            Ok(()) => session.set_state(PlaybackState::Playing),
            Err(_) => session.set_state(PlaybackState::Stopped),
        }
        result
    }

    async fn start_engine(&self, session: &mut Session, url: &str) -> Result<(), PodcastError> {
        let rejected = |e: anyhow::Error| PodcastError::Player {
            url: url.to_string(),
            reason: format!("{:#}", e),
        };
        self.engine.load(url).await.map_err(rejected)?;
        session.media = Some(url.to_string());
        self.engine.play().await.map_err(rejected)?;

        tokio::time::sleep(self.settings.settle).await;

        let engine_state = self.engine.state().await.map_err(rejected)?;
        if !engine_state.is_active() {
            // Don't leave the engine to start on its own later
            if let Err(e) = self.engine.stop().await {
                warn!("⚠️ {} failed to stop unstarted media: {}", self.engine.name(), e);
            }
            return Err(PodcastError::NotStarted {
                url: url.to_string(),
                state: engine_state,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Action for PodcastController {
    async fn run(&self, voice_command: &str) {
        let command = PodcastCommand::parse(voice_command, &self.keyword);
        info!("🎙️ Podcast command: {:?}", command);

        match command {
            PodcastCommand::Stop => self.stop().await,
            PodcastCommand::Pause => self.pause().await,
            PodcastCommand::Resume => self.resume_command().await,
            PodcastCommand::Play { name, mode } => self.play(&name, mode).await,
        }
    }
}
