//! Storage error taxonomy

use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record absent where one was required.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated (duplicate id, email, or an
    /// assignment log for an already-assigned project).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Record failed a storage-level integrity check.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Backend unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A store call exceeded its bounded timeout.
    #[error("store timeout: {0}")]
    Timeout(String),
}

impl StoreError {
    /// Transient errors may succeed on a client-driven retry; callers must
    /// never treat them as an authorization or existence answer.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
