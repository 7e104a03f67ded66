//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building records or configs from external data.
#[derive(Debug, Error)]
pub enum ModelError {
    /// JSON value was not shaped like a record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
