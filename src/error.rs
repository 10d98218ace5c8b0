use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::Violations;

/// Error taxonomy for every handler. Internal detail is logged server-side
/// and never sent to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Payload violates its schema; carries every field violation found.
    #[error("invalid payload")]
    Validation(Violations),

    /// Duplicate unique field, e.g. an already-registered email.
    #[error("{0}")]
    Conflict(String),

    /// Missing or unparseable credential, or failed login.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Credential present but failed verification.
    #[error("invalid or expired token")]
    Forbidden,

    /// Nonexistent resources and resources owned by another user are
    /// indistinguishable on this path.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    /// Maps a storage-level unique violation to `Conflict`, anything else
    /// to `Internal`.
    pub fn conflict_on_unique(e: sqlx::Error, message: &str) -> Self {
        match e.as_database_error() {
            Some(db) if db.is_unique_violation() => ApiError::Conflict(message.into()),
            _ => ApiError::from(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid payload", "details": violations.as_slice() }),
            ),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "error": "invalid or expired token" }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "not found" })),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violations;

    #[test]
    fn statuses_follow_the_taxonomy() {
        let mut v = Violations::new();
        v.add("email", "invalid email format");
        assert_eq!(
            ApiError::Validation(v).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("email already registered".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("missing Authorization header")
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
