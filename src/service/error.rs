//! Error taxonomy for the mutation orchestrators.

use thiserror::Error;

use crate::idcodec::DecodeError;

/// Result type for orchestrator operations
pub type ServiceResult<T> = Result<T, ItemError>;

/// Failures of a single mutation request.
///
/// `Decode` is caused by client input but is surfaced as an internal
/// error: the opaque id already passed shape validation, so a decode
/// failure means the identifier was not produced by our own encoder.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Malformed request shape; surfaced verbatim to the caller
    #[error("{0}")]
    Validation(String),

    /// Opaque identifier did not decode
    #[error("identifier decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Item does not exist
    #[error("Data not found!")]
    NotFound,

    /// Another item already uses the requested headlines
    #[error("Data already exists!")]
    DuplicateHeadline,

    /// Storage-layer failure; always follows a rollback
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// True when a storage error is a uniqueness-constraint violation.
///
/// The headline pre-check races with concurrent writers; the UNIQUE
/// constraint on `items.headlines` is the backstop, and its violation
/// is reported as the same conflict.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation)
}
