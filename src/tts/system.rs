//! System fallback TTS engine

use super::TtsEngine;
use crate::error::VoxError;
use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug)]
pub struct SystemEngine;

impl Default for SystemEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TtsEngine for SystemEngine {
    /// Blocks until the utterance has been rendered.
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("System speaking: {}", text);

        // spd-say needs --wait to block until speech is finished
        if let Ok(status) = Command::new("spd-say").arg("--wait").arg(text).status().await {
            if status.success() {
                return Ok(());
            }
        }

        if let Ok(status) = Command::new("espeak-ng").arg(text).status().await {
            if status.success() {
                return Ok(());
            }
        }

        Err(VoxError::Tts("No system TTS command found (tried spd-say, espeak-ng)".into()).into())
    }

    fn name(&self) -> &str {
        "system"
    }
}
