//! Error types for configuration, colors and snapshots.

use std::io;
use thiserror::Error;

/// Errors that can occur when loading or validating a splash configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for the expected layout
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside the range the engine accepts
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur when parsing a CSS color
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// Neither a hex code nor a known color name
    #[error("Unrecognized color: {0:?}")]
    Unrecognized(String),
}

/// Errors that can occur when saving or loading an engine snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
