//! Field validators used by `validator` derives on DTOs.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9(][0-9 ().-]{5,18}[0-9]$").expect("valid phone regex"));

/// Accept international-style phone numbers such as `+44 20 7946 0958`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Enter a valid phone number".into());
        Err(err)
    }
}

/// Reject arbitrary JSON scalars where an object (or null) is expected.
pub fn validate_meta(meta: &serde_json::Value) -> Result<(), ValidationError> {
    if meta.is_object() || meta.is_array() || meta.is_null() {
        Ok(())
    } else {
        let mut err = ValidationError::new("meta");
        err.message = Some("Metadata must be a JSON object or array".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("555-123-4567").is_ok());
        assert!(validate_phone("+15551234567").is_ok());
    }

    #[test]
    fn rejects_garbage_phone() {
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
    }

    #[test]
    fn meta_must_be_structured() {
        assert!(validate_meta(&serde_json::json!({"a": 1})).is_ok());
        assert!(validate_meta(&serde_json::json!([1, 2])).is_ok());
        assert!(validate_meta(&serde_json::json!("text")).is_err());
        assert!(validate_meta(&serde_json::json!(3)).is_err());
    }
}
