//! Handler error types
//!
//! Every variant describes a silently dropped event. None of them are ever
//! reported back to a client.

use thiserror::Error;

/// Handler error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Payload did not match the event's shape
    #[error("Invalid payload for {0}")]
    InvalidPayload(String),

    /// Event name is not a client event
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Sender has not joined under a name
    #[error("Sender has not joined")]
    NotJoined,

    /// Target name is not registered
    #[error("Unknown target: {0}")]
    UnknownTarget(String),
}

impl HandlerError {
    /// Short label for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::UnknownEvent(_) => "unknown_event",
            Self::NotJoined => "not_joined",
            Self::UnknownTarget(_) => "unknown_target",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
