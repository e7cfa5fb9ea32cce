//! Input checks run before any request is sent.
//!
//! The backend re-validates; these only save a round-trip on obvious typos.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::error::ValidationError;
use crate::models::RegisterRequest;

pub const PHONE_LEN: usize = 11;
pub const OTP_LEN: usize = 4;

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Trimmed phone number if it is exactly 11 ASCII digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPhone`] otherwise.
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let phone = phone.trim();
    if is_digits(phone, PHONE_LEN) { Ok(phone.to_owned()) } else { Err(ValidationError::InvalidPhone) }
}

/// Trimmed OTP if it is exactly 4 ASCII digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidOtp`] otherwise.
pub fn validate_otp(otp: &str) -> Result<String, ValidationError> {
    let otp = otp.trim();
    if is_digits(otp, OTP_LEN) { Ok(otp.to_owned()) } else { Err(ValidationError::InvalidOtp) }
}

/// Normalized registration payload.
///
/// # Errors
///
/// Returns the first failing field's [`ValidationError`].
pub fn validate_registration(name: &str, phone: &str, email: Option<&str>) -> Result<RegisterRequest, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let phone = validate_phone(phone)?;
    let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
        None => None,
        Some(email) => Some(validate_email(email)?),
    };
    Ok(RegisterRequest { name: name.to_owned(), phone, email })
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_ascii_lowercase())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}
