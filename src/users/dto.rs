use serde::Deserialize;

use crate::error::ApiError;
use crate::validation::{is_valid_email, Violations, MAX_NAME_LEN};

/// Partial profile update; only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
                v.add("name", format!("must be 1 to {MAX_NAME_LEN} characters"));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                v.add("email", "invalid email format");
            }
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_valid() {
        let req = UpdateProfileRequest {
            name: None,
            email: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn supplied_fields_are_checked() {
        let req = UpdateProfileRequest {
            name: Some("x".repeat(101)),
            email: Some("broken".into()),
        };
        match req.validate().unwrap_err() {
            ApiError::Validation(v) => assert_eq!(v.as_slice().len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
