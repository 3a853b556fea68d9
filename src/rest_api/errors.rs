//! # Error Responses
//!
//! Maps the orchestrator error taxonomy onto (HTTP status, domain code,
//! message). Internal failures — storage errors and identifier decode
//! failures — are logged with their raw text and surfaced with a
//! generic message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::observability::{Logger, Severity};
use crate::service::ItemError;

use super::response::{Envelope, CODE_DUPLICATE, CODE_INTERNAL, CODE_NOT_FOUND, CODE_VALIDATION};

/// Message used for every internal failure. The real error text stays
/// in the logs.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

impl ItemError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::NotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ItemError::DuplicateHeadline => StatusCode::UNPROCESSABLE_ENTITY,
            ItemError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ItemError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable domain code for this error
    pub fn domain_code(&self) -> &'static str {
        match self {
            ItemError::Validation(_) => CODE_VALIDATION,
            ItemError::NotFound => CODE_NOT_FOUND,
            ItemError::DuplicateHeadline => CODE_DUPLICATE,
            ItemError::Decode(_) => CODE_INTERNAL,
            ItemError::Storage(_) => CODE_INTERNAL,
        }
    }

    fn wire_message(&self) -> String {
        match self {
            ItemError::Decode(_) | ItemError::Storage(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        if matches!(self, ItemError::Decode(_) | ItemError::Storage(_)) {
            let raw = self.to_string();
            Logger::log_stderr(
                Severity::Error,
                "request_failed",
                &[("error", raw.as_str()), ("code", self.domain_code())],
            );
        }

        let envelope = Envelope::new(self.domain_code(), self.wire_message());
        (self.status_code(), Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idcodec::DecodeError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ItemError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ItemError::NotFound.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ItemError::DuplicateHeadline.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ItemError::Decode(DecodeError::TagMismatch).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_codes() {
        assert_eq!(ItemError::NotFound.domain_code(), "96");
        assert_eq!(ItemError::DuplicateHeadline.domain_code(), "95");
        assert_eq!(ItemError::Validation("x".into()).domain_code(), "98");
        assert_eq!(
            ItemError::Decode(DecodeError::InvalidLength).domain_code(),
            "99"
        );
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let err = ItemError::Storage(rusqlite::Error::InvalidQuery);
        assert_eq!(err.wire_message(), INTERNAL_MESSAGE);

        let err = ItemError::NotFound;
        assert_eq!(err.wire_message(), "Data not found!");
    }
}
