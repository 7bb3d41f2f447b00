//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits follow the upstream storage schema (255-char names,
//! 31-char phones, RFC 5321 emails).

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Guest full name
pub const MAX_NAME_LEN: usize = 255;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 31;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Longest bookable window in whole hours
///
/// Bookings are scoped to a single calendar day; the bound also keeps
/// `date + duration * millis_per_hour` far from i64 overflow for any
/// representable start instant.
pub const MAX_DURATION_HOURS: i64 = 24;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a duration in hours is within the bookable range.
pub fn validate_duration(hours: i64) -> Result<(), AppError> {
    if !(1..=MAX_DURATION_HOURS).contains(&hours) {
        return Err(AppError::validation(format!(
            "duration must be between 1 and {MAX_DURATION_HOURS} hours"
        )));
    }
    Ok(())
}

/// Validate that an email address is well-formed and within the length limit.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !value.validate_email() {
        return Err(AppError::validation(format!("Invalid email: {value}")));
    }
    Ok(())
}
