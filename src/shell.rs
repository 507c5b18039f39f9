//! Shell command execution
//!
//! Volume and power actions hand a command line to `sh -c` and only look at
//! the exit status and stdout.

use crate::error::VoxError;
use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
}

impl ShellOutput {
    /// Trimmed stdout
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }
}

#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Run `command` through the shell and capture its output
    async fn run(&self, command: &str) -> Result<ShellOutput>;
}

/// Runs commands with `sh -c`
#[derive(Debug, Default)]
pub struct SystemShell;

#[async_trait]
impl ShellRunner for SystemShell {
    async fn run(&self, command: &str) -> Result<ShellOutput> {
        debug!("$ {}", command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .await
            .map_err(|e| VoxError::Shell(format!("failed to spawn '{}': {}", command, e)))?;

        Ok(ShellOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
