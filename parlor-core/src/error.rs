//! Error types for parlor-core

use thiserror::Error;

/// Main error type for the parlor-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A record failed its shape check
    #[error("malformed {entity}: {message}")]
    Shape {
        entity: &'static str,
        message: String,
    },

    /// Conversation id did not match the sequential textual form
    #[error("invalid conversation id: {0}")]
    InvalidConversationId(String),

    /// Timestamp text could not be decoded
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl Error {
    /// Shorthand for shape-check failures.
    pub(crate) fn shape(entity: &'static str, message: impl Into<String>) -> Self {
        Error::Shape {
            entity,
            message: message.into(),
        }
    }
}

/// Result type alias for parlor-core
pub type Result<T> = std::result::Result<T, Error>;
