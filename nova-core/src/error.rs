//! Error types for Nova.

use thiserror::Error;

/// Errors that can occur in Nova operations.
#[derive(Error, Debug)]
pub enum NovaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event '{0}' comes from an external calendar and is read-only")]
    ReadOnlyEvent(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Could not fetch external calendar: {0}")]
    Fetch(String),
}

impl From<serde_json::Error> for NovaError {
    fn from(err: serde_json::Error) -> Self {
        NovaError::Serialization(err.to_string())
    }
}

/// Result type alias for Nova operations.
pub type NovaResult<T> = Result<T, NovaError>;
