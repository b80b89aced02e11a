//! Core error types for dayforge-core.
//!
//! Analytics on sparse data never fail; the only failure paths are malformed
//! input (timestamps, enum labels, time zones) and configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayforge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed input values
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing record fields or user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Timestamp string in none of the accepted ISO-8601 shapes
    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    /// Energy level label other than high/medium/low
    #[error("Unknown energy level '{0}' (expected high, medium or low)")]
    UnknownEnergyLevel(String),

    /// Not an IANA time zone name
    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
