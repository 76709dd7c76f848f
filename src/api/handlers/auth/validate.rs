//! Explicit validator functions for auth input shapes.
//!
//! One function per input shape, returning the list of field errors; no
//! schema objects, no reflection. Inputs are expected to be normalized
//! (email trimmed + lowercased) before validation.

use regex::Regex;

use super::types::FieldError;

pub(crate) const MIN_PASSWORD_CHARS: usize = 6;
pub(crate) const MAX_NAME_CHARS: usize = 100;

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email"));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
}

pub(crate) fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    errors
}

pub(crate) fn validate_register(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push(FieldError::new(
            "name",
            "Name must be at most 100 characters",
        ));
    }
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    errors
}
