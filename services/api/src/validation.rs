//! Input validation utilities

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{ApiError, ApiResult};

/// Check that every required key is present and non-null in a JSON payload.
///
/// This is the single validation contract shared by all create endpoints;
/// the error message lists every missing field at once.
pub fn require_fields(payload: &Value, required: &[&str]) -> ApiResult<()> {
    let Some(object) = payload.as_object() else {
        return Err(ApiError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| object.get(*key).is_none_or(Value::is_null))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 80 {
        return Err("Username must be at most 80 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 120 {
        return Err("Email must be at most 120 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_fields_accepts_complete_payload() {
        let payload = json!({ "title": "Rome", "user_id": 1 });
        assert!(require_fields(&payload, &["title", "user_id"]).is_ok());
    }

    #[test]
    fn test_require_fields_lists_every_missing_key() {
        let payload = json!({ "title": "Rome" });
        let err = require_fields(&payload, &["title", "country", "city"]).unwrap_err();
        match err {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "missing required field(s): country, city");
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_require_fields_treats_null_as_missing() {
        let payload = json!({ "title": null });
        assert!(require_fields(&payload, &["title"]).is_err());
    }

    #[test]
    fn test_require_fields_rejects_non_object() {
        assert!(require_fields(&json!([1, 2, 3]), &["title"]).is_err());
        assert!(require_fields(&Value::Null, &["title"]).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("traveler_42").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has spaces").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("johndoe@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }
}
