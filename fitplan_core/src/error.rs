//! Error types for the fitplan_core library.
//!
//! Parsing and item extraction never fail; these errors cover the I/O,
//! configuration, profile and archive layers around them.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User profile failed validation
    #[error("Invalid profile: {0}")]
    Profile(String),

    /// Saved plan archive error
    #[error("Archive error: {0}")]
    Archive(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
