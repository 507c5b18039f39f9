//! Voice command actions
//!
//! An [`Action`] is whatever runs when its keyword is heard. Actions own
//! their failure handling: they speak an apology or log, and never return an
//! error to the dispatcher.

use async_trait::async_trait;

pub mod simple;
pub mod time;
pub mod volume;

pub use simple::{PowerAction, PowerCommand, RepeatAfterMe, SpeakAction, SpeakShellCommandOutput};
pub use time::SpeakTime;
pub use volume::VolumeControl;

#[async_trait]
pub trait Action: Send + Sync {
    /// Handle the full recognized text that triggered this action
    async fn run(&self, voice_command: &str);
}
