//! Custom error types for the PinTrail API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Machine-readable cause attached to authentication failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCause {
    /// No bearer token on the request
    MissingToken,
    /// Token failed signature or structure validation
    InvalidToken,
    /// Token is past its expiry
    ExpiredToken,
    /// Token's identifier is on the revocation list
    RevokedToken,
    /// Access token presented where a refresh token was expected, or vice versa
    WrongTokenType,
    /// Login credentials did not match
    InvalidCredentials,
}

impl AuthCause {
    /// Stable cause code for clients
    pub fn code(&self) -> &'static str {
        match self {
            AuthCause::MissingToken => "missing_token",
            AuthCause::InvalidToken => "invalid_token",
            AuthCause::ExpiredToken => "expired_token",
            AuthCause::RevokedToken => "revoked_token",
            AuthCause::WrongTokenType => "wrong_token_type",
            AuthCause::InvalidCredentials => "invalid_credentials",
        }
    }
}

impl std::fmt::Display for AuthCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AuthCause::MissingToken => "Missing authorization token",
            AuthCause::InvalidToken => "Invalid token",
            AuthCause::ExpiredToken => "Token has expired",
            AuthCause::RevokedToken => "Token has been revoked",
            AuthCause::WrongTokenType => "Wrong token type",
            AuthCause::InvalidCredentials => "Invalid email or password",
        };
        f.write_str(message)
    }
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// No row for the requested id
    #[error("{0}")]
    NotFound(String),

    /// Authentication failure with a machine-readable cause
    #[error("{0}")]
    Auth(AuthCause),

    /// Authenticated, but not the owner of the target resource
    #[error("Forbidden")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        ApiError::NotFound(format!("{} {} not found", entity, id))
    }
}

impl From<sqlx::Error> for ApiError {
    /// Constraint violations are client errors; everything else is a 500.
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Validation("a record with these unique fields already exists".to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ApiError::Validation("referenced record does not exist".to_string())
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg }),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "error": msg }),
            ),
            ApiError::Auth(cause) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": cause.to_string(), "cause": cause.code() }),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "error": "Forbidden" }),
            ),
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error" }),
                )
            }
            ApiError::Storage(msg) => {
                error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Storage error" }),
                )
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Auth(AuthCause::ExpiredToken),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (ApiError::Storage("s3".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_auth_error_carries_cause() {
        let response = ApiError::Auth(AuthCause::RevokedToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["cause"], "revoked_token");
        assert_eq!(body["error"], "Token has been revoked");
    }

    #[test]
    fn test_not_found_helper() {
        let err = ApiError::not_found("Trip", 42);
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Trip 42 not found"),
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Database(_)));
    }
}
