//! Field-level input validation shared by the API handlers.
//!
//! Each helper returns [`CoreError::Validation`] with the message the client
//! sees, so handlers can use `?` directly.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of the `page_type` column in `page_views`.
pub const MAX_PAGE_TYPE_LENGTH: usize = 32;

/// Maximum length of slug columns (`wp_slug`, `page_slug`).
pub const MAX_SLUG_LENGTH: usize = 255;

/// Trim an optional string, mapping blank values to `None`.
pub fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reject passwords shorter than `min_length` characters.
pub fn validate_password_length(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

/// Reject strings that are not syntactically valid email addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

/// Require a strictly positive identifier, naming the field in the error.
pub fn validate_positive_id(value: i64, field: &str) -> Result<i64, CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(format!("Invalid {field}")));
    }
    Ok(value)
}

/// Reject values longer than a column allows.
pub fn validate_max_length(value: &str, max: usize, field: &str) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Parse a positive integer out of a raw query-string value.
pub fn parse_positive_id(raw: &str, field: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("Invalid {field}")))
        .and_then(|v| validate_positive_id(v, field))
}
