//! Field validation for account data
//!
//! Validation runs before any record is persisted. Failures carry the field
//! name so API callers get a precise 400.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,63}$").unwrap();
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z]+([ '-][A-Za-z]+)*$").unwrap();
    static ref CONTACT_RE: Regex = Regex::new(r"^\+?[0-9][0-9 .()-]{5,19}$").unwrap();
}

/// A field that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email format")]
    Email,
    #[error("invalid {0} name")]
    Name(&'static str),
    #[error("invalid contact number")]
    Contact,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Validate and normalize an email address. Returns the lowercased form.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    // Consecutive dots pass the coarse pattern but are never deliverable.
    if email.contains("..") || !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::Email);
    }
    Ok(email)
}

/// Validate a first or last name. `label` is reported on failure.
pub fn validate_name(name: &str, label: &'static str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty(label));
    }
    if !NAME_RE.is_match(name.trim()) {
        return Err(ValidationError::Name(label));
    }
    Ok(())
}

/// Validate an optional contact number.
pub fn validate_contact(contact: &str) -> Result<(), ValidationError> {
    if !CONTACT_RE.is_match(contact.trim()) {
        return Err(ValidationError::Contact);
    }
    Ok(())
}

/// Validate a non-empty free-text field such as a title.
pub fn validate_non_empty(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(label));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized_to_lowercase() {
        assert_eq!(
            normalize_email("Ada.Lovelace@Example.COM").unwrap(),
            "ada.lovelace@example.com"
        );
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a..b@example.com").is_err());
        assert!(normalize_email("a@b").is_err());
    }

    #[test]
    fn test_name_allows_separators() {
        assert!(validate_name("Mary Jane", "first").is_ok());
        assert!(validate_name("O'Brien", "last").is_ok());
        assert!(validate_name("Smith-Jones", "last").is_ok());
        assert!(validate_name("R2D2", "first").is_err());
        assert!(validate_name("", "first").is_err());
    }

    #[test]
    fn test_contact_format() {
        assert!(validate_contact("+1 555 123 4567").is_ok());
        assert!(validate_contact("021-555-1234").is_ok());
        assert!(validate_contact("nope").is_err());
    }
}
