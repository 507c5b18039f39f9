//! User-facing podcast failures
//!
//! Every variant is recoverable: the controller speaks [`PodcastError::apology`]
//! and returns to `Stopped`.

use crate::players::EngineState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodcastError {
    #[error("no podcast named '{0}'")]
    NotFound(String),

    #[error("could not fetch the feed for '{name}': {reason}")]
    Feed { name: String, reason: String },

    #[error("the feed for '{0}' has no episodes")]
    EmptyFeed(String),

    #[error("episode {index} of '{name}' has no playable link")]
    NoPlayableLink { name: String, index: usize },

    #[error("player rejected '{url}': {reason}")]
    Player { url: String, reason: String },

    #[error("player did not start '{url}' (engine state {})", .state.code())]
    NotStarted { url: String, state: EngineState },
}

impl PodcastError {
    /// What to say to the user for this failure
    pub fn apology(&self, name: &str) -> String {
        match self {
            PodcastError::NotFound(_) => "Sorry podcast not found".to_string(),
            PodcastError::Feed { .. } => format!("Sorry, I could not reach the {} feed", name),
            PodcastError::EmptyFeed(_) => format!("Sorry, {} has no episodes", name),
            PodcastError::NoPlayableLink { .. } => {
                format!("Sorry, I could not find anything to play for {}", name)
            }
            PodcastError::Player { .. } | PodcastError::NotStarted { .. } => {
                format!("Sorry error playing {}", name)
            }
        }
    }
}
