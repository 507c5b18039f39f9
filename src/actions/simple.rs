//! One-shot actions: canned replies, shell output, repeat-back and power

use super::Action;
use crate::shell::ShellRunner;
use crate::tts::{say, TtsEngine};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Says a fixed reply
pub struct SpeakAction {
    tts: Arc<dyn TtsEngine>,
    words: String,
}

impl SpeakAction {
    pub fn new(tts: Arc<dyn TtsEngine>, words: impl Into<String>) -> Self {
        Self {
            tts,
            words: words.into(),
        }
    }
}

#[async_trait]
impl Action for SpeakAction {
    async fn run(&self, _voice_command: &str) {
        say(self.tts.as_ref(), &self.words).await;
    }
}

/// Speaks the output of a shell command, or `failure_text` when it prints nothing
pub struct SpeakShellCommandOutput {
    tts: Arc<dyn TtsEngine>,
    shell: Arc<dyn ShellRunner>,
    shell_command: String,
    failure_text: Option<String>,
}

impl SpeakShellCommandOutput {
    pub fn new(
        tts: Arc<dyn TtsEngine>,
        shell: Arc<dyn ShellRunner>,
        shell_command: impl Into<String>,
        failure_text: Option<String>,
    ) -> Self {
        Self {
            tts,
            shell,
            shell_command: shell_command.into(),
            failure_text,
        }
    }
}

#[async_trait]
impl Action for SpeakShellCommandOutput {
    async fn run(&self, _voice_command: &str) {
        let output = match self.shell.run(&self.shell_command).await {
            Ok(output) if output.success => output,
            Ok(output) => {
                error!(
                    "❌ '{}' exited with {:?}",
                    self.shell_command, output.code
                );
                return;
            }
            Err(e) => {
                error!("❌ Could not run '{}': {}", self.shell_command, e);
                return;
            }
        };

        if !output.text().is_empty() {
            say(self.tts.as_ref(), output.text()).await;
        } else if let Some(ref failure_text) = self.failure_text {
            say(self.tts.as_ref(), failure_text).await;
        }
    }
}

/// Repeats what the user said after the keyword
pub struct RepeatAfterMe {
    tts: Arc<dyn TtsEngine>,
    keyword: String,
}

impl RepeatAfterMe {
    pub fn new(tts: Arc<dyn TtsEngine>, keyword: impl Into<String>) -> Self {
        Self {
            tts,
            keyword: keyword.into(),
        }
    }
}

#[async_trait]
impl Action for RepeatAfterMe {
    async fn run(&self, voice_command: &str) {
        // The recognized text still has the keyword in it
        let to_repeat = remove_keyword(voice_command, &self.keyword);
        say(self.tts.as_ref(), to_repeat.trim()).await;
    }
}

/// Cut the first case-insensitive occurrence of `keyword` out of `text`,
/// keeping the rest of the text as recognized.
pub fn remove_keyword(text: &str, keyword: &str) -> String {
    let keyword = keyword.to_lowercase();
    let lower = text.to_lowercase();
    let Some(start) = lower.find(&keyword) else {
        return text.to_string();
    };
    let end = start + keyword.len();

    // Lowercasing can change byte lengths outside ASCII
    if lower.len() == text.len() && text.is_char_boundary(start) && text.is_char_boundary(end) {
        format!("{}{}", &text[..start], &text[end..])
    } else {
        lower.replacen(&keyword, "", 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Shutdown,
    Reboot,
}

impl PowerAction {
    fn announcement(self) -> &'static str {
        match self {
            PowerAction::Shutdown => "Shutting down, goodbye",
            PowerAction::Reboot => "Rebooting",
        }
    }

    fn command(self) -> &'static str {
        match self {
            PowerAction::Shutdown => "shutdown now",
            PowerAction::Reboot => "shutdown -r now",
        }
    }
}

/// Shuts down or reboots the device after saying so
pub struct PowerCommand {
    tts: Arc<dyn TtsEngine>,
    shell: Arc<dyn ShellRunner>,
    action: PowerAction,
    /// Prepended to the command, e.g. "sudo "
    prefix: String,
}

impl PowerCommand {
    pub fn new(
        tts: Arc<dyn TtsEngine>,
        shell: Arc<dyn ShellRunner>,
        action: PowerAction,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            tts,
            shell,
            action,
            prefix: prefix.into(),
        }
    }

    pub fn command_line(&self) -> String {
        format!("{}{}", self.prefix, self.action.command())
    }
}

#[async_trait]
impl Action for PowerCommand {
    async fn run(&self, _voice_command: &str) {
        say(self.tts.as_ref(), self.action.announcement()).await;

        let command = self.command_line();
        info!("⚡ Power command: {}", command);
        match self.shell.run(&command).await {
            Ok(output) if output.success => {}
            Ok(output) => error!("❌ '{}' exited with {:?}", command, output.code),
            Err(e) => error!("❌ Could not run '{}': {}", command, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keyword_ignores_case() {
        assert_eq!(
            remove_keyword("Repeat After Me Hello World", "repeat after me"),
            " Hello World"
        );
        assert_eq!(remove_keyword("say it, repeat after me", "repeat after me"), "say it, ");
    }

    #[test]
    fn test_remove_keyword_only_first_occurrence() {
        assert_eq!(
            remove_keyword("repeat after me repeat after me", "repeat after me"),
            " repeat after me"
        );
    }

    #[test]
    fn test_remove_keyword_missing_keyword_keeps_text() {
        assert_eq!(remove_keyword("Hello", "repeat after me"), "Hello");
    }

    #[test]
    fn test_power_action_strings() {
        assert_eq!(PowerAction::Shutdown.command(), "shutdown now");
        assert_eq!(PowerAction::Reboot.announcement(), "Rebooting");
    }
}
