//! Error types for PariharaNav

use thiserror::Error;

/// PariharaNav error type
#[derive(Error, Debug)]
pub enum PariharaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Scan frame too short for the configured bearings.
    #[error("Malformed scan: need at least {required} readings, got {actual}")]
    MalformedScan { required: usize, actual: usize },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<toml::de::Error> for PariharaError {
    fn from(e: toml::de::Error) -> Self {
        PariharaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PariharaError>;
