use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Speech
    pub tts_engine: String,
    pub cloud_speech_commands: bool,

    // Media Player
    pub mpris_service: String,
    pub settle_ms: u64,

    // Podcasts
    pub podcasts: BTreeMap<String, String>,
    pub audio_marker: String,
    pub feed_retries: usize,

    // Hardware button
    pub button_enabled: bool,
    pub button_pin: u32,
    pub button_poll_ms: u64,

    // System
    pub volume_step: i32,
    pub power_command_prefix: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tts_engine: "system".to_string(),
            cloud_speech_commands: true,
            mpris_service: "org.mpris.MediaPlayer2.vlc".to_string(),
            settle_ms: 1000,
            podcasts: default_podcasts(),
            audio_marker: ".mp3".to_string(),
            feed_retries: 2,
            button_enabled: false,
            button_pin: 23,
            button_poll_ms: 100,
            volume_step: 10,
            power_command_prefix: "sudo ".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

fn default_podcasts() -> BTreeMap<String, String> {
    [
        (
            "friday night comedy",
            "http://www.bbc.co.uk/programmes/p02pc9pj/episodes/downloads.rss",
        ),
        ("tech news today", "http://feeds.twit.tv/tnt.xml"),
        ("twig", "http://feeds.twit.tv/twig.xml"),
        ("this week in tech", "http://feeds.twit.tv/twit.xml"),
        (
            "theory of everything",
            "https://www.npr.org/rss/podcast.php?id=510061",
        ),
        (
            "this american life",
            "http://feed.thisamericanlife.org/talpodcast",
        ),
        ("android authority", "http://androidauthority.libsyn.com/rss"),
    ]
    .into_iter()
    .map(|(name, url)| (name.to_string(), url.to_string()))
    .collect()
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path.
    ///
    /// A missing file yields the defaults. A corrupt file is moved aside to
    /// `*.json.corrupt` and the defaults are used instead.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voxhome")
        .join("config.json")
}
