//! voxhome Library
//!
//! Keyword-triggered voice commands for a home assistant device, including
//! a podcast player driven over MPRIS.

pub mod actions;
pub mod actor;
pub mod assistant;
pub mod config;
pub mod error;
pub mod feed;
pub mod gpio;
pub mod players;
pub mod podcast;
pub mod shell;
pub mod tts;
pub mod utils;
