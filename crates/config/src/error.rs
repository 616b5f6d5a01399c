//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The server URL is not an absolute http(s) URL.
    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl {
        /// The configured URL.
        url: String,
        /// The reason the URL is invalid.
        reason: String,
    },

    /// The request timeout is outside the accepted range.
    #[error("invalid request timeout: {reason}")]
    InvalidTimeout {
        /// The reason the timeout is invalid.
        reason: String,
    },

    /// The position gap setting is neither a preset nor a positive integer.
    #[error("invalid position gap {0:?}: expected \"current\", \"legacy\" or a positive integer")]
    InvalidPositionGap(String),

    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidEnv {
        /// The variable name.
        name: &'static str,
        /// The reason the value was rejected.
        reason: String,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
