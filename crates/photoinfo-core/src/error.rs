//! Error types for photo metadata extraction.
//!
//! Only configuration loading and tag decoding can fail. Everything
//! downstream of a decoded tag set degrades to absent values instead of
//! returning an error, so `TagSourceError` is caught by the processor and
//! never reaches callers of the aggregate operations.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for photoinfo operations.
#[derive(Error, Debug)]
pub enum PhotoInfoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tag decoding errors
    #[error("Tag source error: {0}")]
    TagSource(#[from] TagSourceError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures of a [`TagSource`](crate::tags::TagSource) while decoding a file.
#[derive(Error, Debug)]
pub enum TagSourceError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container or metadata block could not be parsed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A JSON tag dump was malformed
    #[error("Invalid tag dump {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking decode task panicked or was cancelled
    #[error("Decode task failed for {path}: {message}")]
    Join { path: PathBuf, message: String },
}

/// Convenience type alias for photoinfo results.
pub type Result<T> = std::result::Result<T, PhotoInfoError>;

/// Convenience type alias for tag source results.
pub type TagSourceResult<T> = std::result::Result<T, TagSourceError>;
