//! Form Validation
//!
//! Checks run before any request is sent. Failures are collected per field so they can be shown
//! inline next to the offending input.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "the pattern is a constant")]
    let pattern = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");

    pattern
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "the pattern is a constant")]
    let pattern = Regex::new(r"^[0-9]{10}$").expect("valid phone pattern");

    pattern
});

static OTP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "the pattern is a constant")]
    let pattern = Regex::new(r"^[0-9]{6}$").expect("valid otp pattern");

    pattern
});

/// Country calling code accepted in front of local phone numbers.
pub const PHONE_COUNTRY_PREFIX: &str = "+977";

/// A single field's validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Empty required field
    #[error("{0} is required")]
    Required(&'static str),

    /// Phone number is not 10 digits
    #[error("enter a valid 10-digit phone number")]
    InvalidPhone,

    /// Email address is malformed
    #[error("enter a valid email address")]
    InvalidEmail,

    /// One-time code is not 6 digits
    #[error("enter the 6-digit code")]
    InvalidOtp,
}

/// Validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    /// No failures yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`, keeping the first failure per field.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.entry(field).or_insert(error);

                None
            }
        }
    }

    /// Failure for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, error)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Require a non-blank value; returns it trimmed.
///
/// # Errors
///
/// Returns [`FieldError::Required`] for empty or whitespace-only input.
pub fn validate_required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(trimmed)
    }
}

/// Normalise a phone number to its 10 local digits. Spaces, dashes and a leading `+977` are
/// accepted.
///
/// # Errors
///
/// Returns [`FieldError::Required`] when empty and [`FieldError::InvalidPhone`] otherwise.
pub fn validate_phone(value: &str) -> Result<String, FieldError> {
    let value = validate_required("phone", value)?;

    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let local = compact
        .strip_prefix(PHONE_COUNTRY_PREFIX)
        .unwrap_or(&compact);

    if PHONE_PATTERN.is_match(local) {
        Ok(local.to_string())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

/// Validate a one-time passcode.
///
/// # Errors
///
/// Returns [`FieldError::Required`] when empty and [`FieldError::InvalidOtp`] otherwise.
pub fn validate_otp(value: &str) -> Result<String, FieldError> {
    let value = validate_required("otp", value)?;

    if OTP_PATTERN.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::InvalidOtp)
    }
}

/// Validate an email address; returns it trimmed and lowercased.
///
/// # Errors
///
/// Returns [`FieldError::Required`] when empty and [`FieldError::InvalidEmail`] otherwise.
pub fn validate_email(value: &str) -> Result<String, FieldError> {
    let value = validate_required("email", value)?;

    if EMAIL_PATTERN.is_match(value) {
        Ok(value.to_lowercase())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// Require a password. Strength rules are the backend's concern.
///
/// # Errors
///
/// Returns [`FieldError::Required`] when empty.
pub fn validate_password(value: &str) -> Result<&str, FieldError> {
    if value.is_empty() {
        Err(FieldError::Required("password"))
    } else {
        Ok(value)
    }
}
