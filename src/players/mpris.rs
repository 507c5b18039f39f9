use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use zbus::Connection as ZBusConnection;

use crate::players::mpris_utils::MprisPlayerProxy;
use crate::players::{EngineState, MediaEngine};

/// Media engine backed by an MPRIS-capable player (VLC by default)
pub struct MprisEngine {
    service_name: String,
    conn: ZBusConnection,
}

impl MprisEngine {
    /// Open the session bus connection the engine keeps for its lifetime
    pub async fn connect(service_name: String) -> Result<Self> {
        let conn = ZBusConnection::session()
            .await
            .context("Failed to connect to the D-Bus session bus")?;
        info!("🎵 MPRIS engine bound to {}", service_name);
        Ok(Self { service_name, conn })
    }

    async fn proxy(&self) -> Result<MprisPlayerProxy<'_>> {
        let proxy = MprisPlayerProxy::builder(&self.conn)
            .destination(self.service_name.as_str())?
            .build()
            .await
            .with_context(|| format!("MPRIS player {} is not reachable", self.service_name))?;
        Ok(proxy)
    }
}

/// Map an MPRIS `PlaybackStatus` onto the engine state codes
fn parse_playback_status(status: &str) -> EngineState {
    match status {
        "Playing" => EngineState::Playing,
        "Paused" => EngineState::Paused,
        "Stopped" => EngineState::Stopped,
        _ => EngineState::NothingSpecial,
    }
}

#[async_trait]
impl MediaEngine for MprisEngine {
    async fn load(&self, uri: &str) -> Result<()> {
        debug!("MPRIS OpenUri: {}", uri);
        self.proxy().await?.open_uri(uri).await?;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        self.proxy().await?.play().await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.proxy().await?.pause().await?;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.proxy().await?.stop().await?;
        Ok(())
    }

    async fn state(&self) -> Result<EngineState> {
        let status = self.proxy().await?.playback_status().await?;
        debug!("MPRIS PlaybackStatus: {}", status);
        Ok(parse_playback_status(&status))
    }

    fn name(&self) -> &str {
        &self.service_name
    }
}
