use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::ApiError;

/// One field-level schema violation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Collects every violation in a payload so the client can fix all of them
/// in one round trip.
#[derive(Debug, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Consumes the collector: `Ok(())` when clean, otherwise the 400 error
    /// carrying the full list.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_and_rejects() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn finish_is_ok_when_clean() {
        assert!(Violations::new().finish().is_ok());
    }

    #[test]
    fn finish_carries_every_violation() {
        let mut v = Violations::new();
        v.add("email", "invalid email format");
        v.add("password", "must be at least 8 characters");
        let err = v.finish().unwrap_err();
        match err {
            crate::error::ApiError::Validation(v) => {
                let fields: Vec<_> = v.as_slice().iter().map(|x| x.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
