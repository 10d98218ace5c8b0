use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{is_valid_email, Violations, MAX_NAME_LEN, MIN_PASSWORD_LEN};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        if !is_valid_email(&self.email) {
            v.add("email", "invalid email format");
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            v.add(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if let Some(name) = &self.name {
            if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
                v.add("name", format!("must be 1 to {MAX_NAME_LEN} characters"));
            }
        }
        v.finish()
    }
}

/// Request body for login. Presence only: a malformed email surfaces as an
/// authentication failure, not a validation failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::new();
        if self.email.is_empty() {
            v.add("email", "is required");
        }
        if self.password.is_empty() {
            v.add("password", "is required");
        }
        v.finish()
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl From<super::repo_types::User> for PublicUser {
    fn from(user: super::repo_types::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn violation_fields(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(v) => v.as_slice().iter().map(|x| x.field.clone()).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_accepts_a_valid_payload() {
        let req = RegisterRequest {
            email: "a@x.com".into(),
            password: "pw123456".into(),
            name: Some("Alice".into()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_reports_every_violation_at_once() {
        let req = RegisterRequest {
            email: "nope".into(),
            password: "short".into(),
            name: Some("".into()),
        };
        let fields = violation_fields(req.validate().unwrap_err());
        assert_eq!(fields, vec!["email", "password", "name"]);
    }

    #[test]
    fn register_name_is_optional() {
        let req = RegisterRequest {
            email: "a@x.com".into(),
            password: "pw123456".into(),
            name: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn login_checks_presence_only() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "x".into(),
        };
        assert!(req.validate().is_ok());

        let req = LoginRequest {
            email: "".into(),
            password: "".into(),
        };
        let fields = violation_fields(req.validate().unwrap_err());
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn public_user_never_carries_a_password_field() {
        let json = serde_json::to_string(&PublicUser {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            name: None,
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("a@x.com"));
    }
}
