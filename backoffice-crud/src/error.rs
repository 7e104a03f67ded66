//! Error types for the CRUD layer.

use backoffice_model::RecordId;
use thiserror::Error;

/// Result type for CRUD operations.
pub type CrudResult<T> = Result<T, CrudError>;

/// Errors that can occur while talking to a data source.
#[derive(Debug, Error)]
pub enum CrudError {
    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// A record with this id already exists.
    #[error("duplicate record id: {0}")]
    Duplicate(RecordId),

    /// The data source rejected or failed the operation.
    #[error("data source error: {0}")]
    Source(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Model error (malformed record or config).
    #[error("model error: {0}")]
    Model(#[from] backoffice_model::ModelError),
}
