//! voxhome - keyword voice commands for a home assistant device
//!
//! Reads recognized text, one utterance per line, from stdin.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use voxhome::assistant::{make_actor, Assistant, Collaborators};
use voxhome::config::Config;
use voxhome::feed::HttpFeedSource;
use voxhome::gpio::SysfsPin;
use voxhome::shell::SystemShell;
use voxhome::{players, tts};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config.json (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handle a single utterance and exit
    #[arg(long)]
    say: Option<String>,

    /// Print the registered keywords and known podcasts, then exit
    #[arg(long)]
    list: bool,
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()))
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// SIGUSR1 pauses and SIGUSR2 resumes, for device-wide mute events
fn spawn_lifecycle_hooks(assistant: Arc<Assistant>) -> Result<()> {
    let mut pause = signal(SignalKind::user_defined1()).context("Failed to hook SIGUSR1")?;
    let mut resume = signal(SignalKind::user_defined2()).context("Failed to hook SIGUSR2")?;

    tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(()) = pause.recv() => assistant.pause_actors().await,
                Some(()) = resume.recv() => assistant.resume_actors().await,
                else => break,
            }
        }
    });
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_logging(&config, args.verbose)?;

    info!("🏠 voxhome v{} starting...", env!("CARGO_PKG_VERSION"));

    let deps = Collaborators {
        tts: tts::create_engine(&config).await?,
        shell: Arc::new(SystemShell),
        engine: players::create_engine(&config)
            .await
            .context("Podcast playback needs an MPRIS player on the session bus")?,
        feeds: Arc::new(HttpFeedSource::new(config.feed_retries)?),
    };

    let mut assistant = make_actor(&config, deps)?;
    if config.button_enabled {
        let pin = SysfsPin::new(config.button_pin);
        match pin.export() {
            Ok(()) => {
                info!("🔘 Stop button on GPIO {}", config.button_pin);
                assistant = assistant
                    .with_button(Arc::new(pin), Duration::from_millis(config.button_poll_ms));
            }
            Err(e) => warn!("⚠️ Stop button disabled: {}", e),
        }
    }
    let assistant = Arc::new(assistant);

    if args.list {
        for keyword in assistant.actor().keywords() {
            println!("{}", keyword);
        }
        for name in assistant.podcast().catalog().names() {
            println!("podcast {}", name);
        }
        return Ok(());
    }

    if let Some(text) = args.say {
        assistant.dispatch(&text).await?;
        return Ok(());
    }

    spawn_lifecycle_hooks(assistant.clone())?;

    info!("✅ voxhome ready - waiting for recognized text on stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        info!("📝 Heard: '{}'", text);
        if let Err(e) = assistant.dispatch(text).await {
            error!("❌ Dispatch failed: {}", e);
        }
    }

    info!("👋 Input closed, shutting down");
    Ok(())
}
