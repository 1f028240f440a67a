//! Error types for the ai core library
//!
//! This module defines the error handling system shared by the credential
//! store, the resolvers, and the completion client, using thiserror for
//! ergonomic error definitions and anyhow for flexible error sources.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The OS credential facility could not be reached
    #[error("Credential store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The service rejected the stored API key (HTTP 401/403)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The endpoint could not be reached (connect failure, timeout, transport)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The service returned a non-success response (including rate limiting)
    #[error("Service error{}: {message}", .status_code.map(|c| format!(" (HTTP {c})")).unwrap_or_default())]
    Service {
        status_code: Option<u16>,
        provider_code: Option<String>,
        message: String,
    },

    /// An input file exceeds the size limit for a single completion request
    #[error("Input file {} is {size} bytes, over the {limit} byte limit", .path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Invalid configuration values (e.g. an unparseable endpoint URL)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a store-unavailable error from any underlying failure
    pub fn store_unavailable(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::StoreUnavailable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a configuration error without an underlying source
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
