//! Error types for the session module.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No account matches the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// Profile fields were rejected.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// Reading or writing the key-value store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
