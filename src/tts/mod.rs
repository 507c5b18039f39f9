//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface for the speech backends used to answer
//! voice commands.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod speechd;
pub mod system;

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Speak the given text
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Speak `text`, logging instead of failing when the engine errors.
///
/// Actions never surface speech failures to the dispatcher.
pub async fn say(tts: &dyn TtsEngine, text: &str) {
    info!("🗣️ Saying: '{}'", text);
    if let Err(e) = tts.speak(text).await {
        warn!("⚠️ {} could not speak '{}': {}", tts.name(), text, e);
    }
}

/// Factory to create the configured TTS engine
pub async fn create_engine(config: &Config) -> Result<Arc<dyn TtsEngine>> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn TtsEngine> = match config.tts_engine.as_str() {
        "speechd_ng" | "speechd" => match speechd::SpeechdEngine::connect().await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("  - speechd-ng unavailable ({}), falling back to System", e);
                Arc::new(system::SystemEngine::new())
            }
        },
        "system" => Arc::new(system::SystemEngine::new()),
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to System",
                config.tts_engine
            );
            Arc::new(system::SystemEngine::new())
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    Ok(engine)
}
