//! Hardware stop button
//!
//! Polls a digital input on a background task and stops playback the first
//! time the pin reads high.

use super::{PlaybackState, PodcastController};
use crate::gpio::DigitalInput;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Handle to a running button watcher.
///
/// Dropping the handle cancels the watcher.
pub struct ButtonWatch {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ButtonWatch {
    /// Whether the watcher has exited (button pressed or cancelled)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Ask the watcher to exit and wait for it
    pub async fn cancel(self) {
        let _ = self.cancel.send(true);
        if let Err(e) = self.handle.await {
            warn!("⚠️ Button watcher ended abnormally: {}", e);
        }
    }

    /// Wait for the watcher to exit on its own
    pub async fn finished(self) {
        let ButtonWatch { cancel, handle } = self;
        if let Err(e) = handle.await {
            warn!("⚠️ Button watcher ended abnormally: {}", e);
        }
        drop(cancel);
    }
}

impl PodcastController {
    /// Stop playback when `input` goes high, polling every `interval`.
    ///
    /// The watcher goes through [`PodcastController::stop`], the same path as
    /// the spoken "stop". A press while already stopped ends the watcher
    /// without touching the engine.
    pub fn watch_button(
        self: &Arc<Self>,
        input: Arc<dyn DigitalInput>,
        interval: Duration,
    ) -> ButtonWatch {
        let (cancel, mut cancelled) = watch::channel(false);
        let controller = Arc::clone(self);

        let handle = tokio::spawn(async move {
            info!("🔘 Waiting for button press to stop the podcast");
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = cancelled.changed() => {
                        debug!("Button watcher cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        match input.is_high() {
                            Ok(true) => {
                                if controller.state().await == PlaybackState::Stopped {
                                    debug!("Button pressed with nothing playing");
                                } else {
                                    info!("🔘 Button pressed, stopping podcast");
                                    controller.stop().await;
                                }
                                break;
                            }
                            Ok(false) => {}
                            Err(e) => debug!("Button read failed: {}", e),
                        }
                    }
                }
            }
        });

        ButtonWatch { cancel, handle }
    }
}
