//! Error types for configuration loading and gamepad collection.
//!
//! Input queries themselves never fail; a missing source degrades to a
//! neutral value and a logged warning.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Failed to initialize collector: {0}")]
    Initialization(String),

    #[error("Failed to send event: {0}")]
    EventSend(String),
}
