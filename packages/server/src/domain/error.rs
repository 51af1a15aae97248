//! Session error taxonomy.
//!
//! Every failure a protocol handler can produce maps to one of these
//! variants; the ui layer turns them into a single `error` reply to the
//! originating connection and nothing else.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A required field is missing, empty, or over its length cap.
    #[error("{0}")]
    Validation(String),

    /// The referenced room does not exist (or its id is not even an id).
    #[error("{0}")]
    NotFound(String),

    /// The action is valid in general but not for the caller's current
    /// binding (registering twice, creating a room while in one, ...).
    #[error("{0}")]
    InvalidState(String),
}

impl SessionError {
    /// Stable machine-readable code carried on the wire next to the
    /// human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Validation(_) => "validation",
            SessionError::NotFound(_) => "not_found",
            SessionError::InvalidState(_) => "state",
        }
    }
}
