//! Speaker volume control through amixer

use super::Action;
use crate::shell::ShellRunner;
use crate::tts::{say, TtsEngine};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

pub const GET_VOLUME: &str =
    r#"amixer get Master | grep "Front Left:" | sed "s/.*\[\([0-9]\+\)%\].*/\1/""#;

pub fn set_volume_command(volume: i32) -> String {
    format!("amixer -q set Master {}%", volume)
}

/// Changes the volume by a signed step and says the new level
pub struct VolumeControl {
    tts: Arc<dyn TtsEngine>,
    shell: Arc<dyn ShellRunner>,
    change: i32,
}

impl VolumeControl {
    pub fn new(tts: Arc<dyn TtsEngine>, shell: Arc<dyn ShellRunner>, change: i32) -> Self {
        Self { tts, shell, change }
    }

    /// Apply the step to `current`, clamped to 0..=100
    pub fn adjusted(current: i32, change: i32) -> i32 {
        current.saturating_add(change).clamp(0, 100)
    }

    async fn adjust(&self) -> Result<i32> {
        let res = self.shell.run(GET_VOLUME).await?;
        if !res.success {
            bail!("volume query exited with {:?}", res.code);
        }
        info!("🔊 volume: {}", res.text());
        let current: i32 = res
            .text()
            .parse()
            .with_context(|| format!("unexpected amixer output '{}'", res.text()))?;

        let vol = Self::adjusted(current, self.change);
        let set = self.shell.run(&set_volume_command(vol)).await?;
        if !set.success {
            bail!("setting volume exited with {:?}", set.code);
        }
        Ok(vol)
    }
}

#[async_trait]
impl Action for VolumeControl {
    async fn run(&self, _voice_command: &str) {
        match self.adjust().await {
            Ok(vol) => say(self.tts.as_ref(), &format!("Volume at {} %.", vol)).await,
            Err(e) => error!("❌ Error using amixer to adjust volume: {:#}", e),
        }
    }
}
