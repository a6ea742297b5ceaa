//! Unified error handling for the upcheck crate
//!
//! Only configuration-time failures surface as errors: unreadable or
//! malformed endpoint files, invalid descriptors, and HTTP client
//! construction. Probe-level transport failures never appear here; they
//! are encoded as DOWN outcomes in [`crate::probe::ProbeOutcome`].

use std::io;
use thiserror::Error;

/// Unified error type for the upcheck crate
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration and validation errors
    #[error("Config error: {0}")]
    Config(String),

    /// YAML deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
