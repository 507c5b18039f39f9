//! Speech through the speechd-ng D-Bus service

use crate::error::VoxError;
use crate::tts::TtsEngine;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};
use zbus::{proxy, Connection};

#[proxy(
    interface = "org.speech.Service",
    default_service = "org.speech.Service",
    default_path = "/org/speech/Service"
)]
trait SpeechService {
    fn speak(&self, text: &str) -> zbus::Result<()>;
    fn ping(&self) -> zbus::Result<String>;
}

/// Speaks replies through speechd-ng on the session bus
pub struct SpeechdEngine {
    proxy: SpeechServiceProxy<'static>,
    version: String,
}

impl std::fmt::Debug for SpeechdEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechdEngine")
            .field("version", &self.version)
            .finish()
    }
}

impl SpeechdEngine {
    /// Connect on the session bus. Fails unless the service answers a ping.
    pub async fn connect() -> Result<Self> {
        let connection = Connection::session().await?;
        Self::with_connection(&connection).await
    }

    pub async fn with_connection(connection: &Connection) -> Result<Self> {
        let proxy = SpeechServiceProxy::new(connection).await?;
        let version = proxy
            .ping()
            .await
            .map_err(|e| VoxError::Tts(format!("speechd-ng not responding: {}", e)))?;
        info!("🔊 Connected to speechd-ng: {}", version);
        Ok(Self { proxy, version })
    }
}

#[async_trait]
impl TtsEngine for SpeechdEngine {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("speechd-ng speaking: {}", text);
        self.proxy
            .speak(text)
            .await
            .map_err(|e| VoxError::Tts(format!("speechd-ng rejected utterance: {}", e)))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "speechd_ng"
    }
}
