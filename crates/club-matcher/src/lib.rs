//! Matching free-text volleyball club names against the Swiss club directory.

pub mod config;
pub mod directory;
pub mod error;
pub mod matching;
pub mod telemetry;
