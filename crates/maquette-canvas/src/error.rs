//! Error types for maquette-canvas
//!
//! Structural mutations on missing ids are deliberate no-ops, not errors;
//! these types cover the cases that genuinely fail: protocol decoding,
//! session lookup, and interaction preconditions.

use thiserror::Error;
use uuid::Uuid;

/// Canvas error type
#[derive(Debug, Error)]
pub enum Error {
    /// Session not found
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Element not found
    #[error("element not found: {0}")]
    ElementNotFound(Uuid),

    /// Element is locked and rejects move/resize input
    #[error("element is locked: {0}")]
    ElementLocked(Uuid),

    /// No resize drag is active
    #[error("no active resize")]
    ResizeNotActive,

    /// No element is selected
    #[error("no element selected")]
    NoSelection,

    /// Invalid message format
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Maximum sessions exceeded
    #[error("maximum sessions exceeded")]
    MaxSessionsExceeded,
}

impl Error {
    /// Create an invalid message error
    #[must_use]
    pub fn invalid_message(msg: impl Into<String>) -> Self {
        Self::InvalidMessage(msg.into())
    }

    /// Get error code for protocol messages
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::ElementNotFound(_) => "element_not_found",
            Self::ElementLocked(_) => "element_locked",
            Self::ResizeNotActive => "resize_not_active",
            Self::NoSelection => "no_selection",
            Self::InvalidMessage(_) => "invalid_message",
            Self::Serialization(_) => "serialization_error",
            Self::MaxSessionsExceeded => "max_sessions_exceeded",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;
