//! Media playback engines
//!
//! The podcast controller drives a single [`MediaEngine`] for its whole
//! lifetime. The only production engine speaks MPRIS over D-Bus, which VLC
//! exposes out of the box.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod mpris;
pub mod mpris_utils;

/// Engine state, numbered the way libvlc reports `libvlc_state_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NothingSpecial = 0,
    Opening = 1,
    Buffering = 2,
    Playing = 3,
    Paused = 4,
    Stopped = 5,
    Ended = 6,
    Error = 7,
}

impl EngineState {
    /// Raw state code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the engine has accepted media and is (about to be) producing audio
    pub fn is_active(self) -> bool {
        matches!(
            self,
            EngineState::Opening
                | EngineState::Buffering
                | EngineState::Playing
                | EngineState::Paused
        )
    }
}

#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Replace the current media with `uri`
    async fn load(&self, uri: &str) -> Result<()>;

    /// Start or resume playback of the loaded media
    async fn play(&self) -> Result<()>;

    /// Pause playback
    async fn pause(&self) -> Result<()>;

    /// Stop playback
    async fn stop(&self) -> Result<()>;

    /// Query the engine's current state
    async fn state(&self) -> Result<EngineState>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Create the media engine based on configuration
pub async fn create_engine(config: &Config) -> Result<Arc<dyn MediaEngine>> {
    let engine = mpris::MprisEngine::connect(config.mpris_service.clone()).await?;
    Ok(Arc::new(engine))
}
