//! voxhome Error Types
//!
//! Centralized error handling for the dispatcher and its adapters.

use thiserror::Error;

/// Central error type for voxhome
#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Shell command error: {0}")]
    Shell(String),

    #[error("TTS engine error: {0}")]
    Tts(String),

    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for voxhome operations
pub type VoxResult<T> = Result<T, VoxError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for VoxError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        VoxError::Lock(err.to_string())
    }
}
