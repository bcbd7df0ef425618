//! Engine error taxonomy
//!
//! Validation, NotFound, Forbidden, and Conflict are all detected before a
//! cascade begins and returned immediately. Transient wraps store
//! unavailability; the server never retries it internally, the client
//! re-drives the whole call, relying on the idempotence of each delete
//! step. Partial outcomes of batch operations are not errors; they are
//! reported through [`crate::report::BatchReport`].

use taskforge_store::StoreError;
use taskforge_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Role or ownership mismatch.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// State precondition failed, e.g. project already assigned.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Malformed or rejected input.
    #[error("validation: {0}")]
    Validation(String),

    /// Store timeout or unreachable; safe to retry the whole call.
    #[error("transient: {0}")]
    Transient(String),

    /// Unexpected internal failure.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => EngineError::NotFound(msg),
            StoreError::Conflict(msg) => EngineError::Conflict(msg),
            StoreError::InvalidData(msg) => EngineError::Validation(msg),
            StoreError::Unavailable(msg) | StoreError::Timeout(msg) => {
                EngineError::Transient(msg)
            }
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Validation(err.to_string())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            EngineError::from(StoreError::Timeout("2s".into())),
            EngineError::Transient(_)
        ));
        assert!(matches!(
            EngineError::from(StoreError::Conflict("dup".into())),
            EngineError::Conflict(_)
        ));
        assert!(matches!(
            EngineError::from(StoreError::NotFound("x".into())),
            EngineError::NotFound(_)
        ));
    }
}
