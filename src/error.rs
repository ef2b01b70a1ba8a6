//! Application error type, mapped to HTTP responses at the route boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("username or email already registered")]
    DuplicateIdentity,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication required")]
    Unauthorized,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("account is not approved yet")]
    NotApproved,

    #[error("admin access required")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    /// Covers both "does not exist" and "exists but belongs to someone
    /// else"; the response must not distinguish the two.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

/// JSON error body returned for every failed request.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::DuplicateIdentity => (StatusCode::CONFLICT, "duplicate_identity"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::NotApproved => (StatusCode::FORBIDDEN, "not_approved"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        // Store-level failures surface as a generic message; everything
        // else carries the user-visible reason.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "something went wrong".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: code, message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_status() {
        let cases = [
            (AppError::DuplicateIdentity, StatusCode::CONFLICT),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::NotApproved, StatusCode::FORBIDDEN),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (
                AppError::validation("quantity_g must be positive"),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound("product"), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn store_failures_become_generic_500() {
        let resp = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_names_only_the_entity() {
        assert_eq!(AppError::NotFound("meal").to_string(), "meal not found");
    }
}
