//! Common validation utilities.

use chrono::{NaiveDate, Utc};
use validator::ValidationError;

/// Length of a registration check-in code.
pub const REGISTRATION_CODE_LEN: usize = 6;

/// Normalizes an email for storage and lookup: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates that a birthday is in the past.
pub fn validate_birthday(birthday: &NaiveDate) -> Result<(), ValidationError> {
    if *birthday < Utc::now().date_naive() {
        Ok(())
    } else {
        let mut err = ValidationError::new("birthday_in_future");
        err.message = Some("Birthday must be in the past".into());
        Err(err)
    }
}

/// Validates the shape of a registration check-in code: exactly six
/// uppercase-alphanumeric characters.
pub fn validate_registration_code(code: &str) -> Result<(), ValidationError> {
    let ok = code.len() == REGISTRATION_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("registration_code_format");
        err.message = Some("Code must be 6 uppercase alphanumeric characters".into());
        Err(err)
    }
}

/// Validates that a password meets the minimum strength policy:
/// at least 8 characters with one upper, one lower and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.len() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        let mut err = ValidationError::new("weak_password");
        err.message = Some(
            "Password must be at least 8 characters with one uppercase letter, one lowercase letter and one digit"
                .into(),
        );
        Err(err)
    }
}
