//! # Response Envelope
//!
//! Every endpoint answers with the same JSON envelope:
//! `{code, message, data}`. The domain code is a stable two-digit
//! string, independent of the HTTP status.

use serde::Serialize;
use serde_json::Value;

/// Success
pub const CODE_OK: &str = "00";
/// Duplicate headline
pub const CODE_DUPLICATE: &str = "95";
/// Item not found
pub const CODE_NOT_FOUND: &str = "96";
/// Request shape validation failure
pub const CODE_VALIDATION: &str = "98";
/// Internal / persistence / identifier-integrity failure
pub const CODE_INTERNAL: &str = "99";

/// Wire envelope for all responses.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub code: &'static str,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Success envelope with no payload body.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(CODE_OK, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = Envelope::ok("Record has been updated");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["code"], "00");
        assert_eq!(json["message"], "Record has been updated");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(CODE_DUPLICATE, "95");
        assert_eq!(CODE_NOT_FOUND, "96");
        assert_eq!(CODE_VALIDATION, "98");
        assert_eq!(CODE_INTERNAL, "99");
    }
}
