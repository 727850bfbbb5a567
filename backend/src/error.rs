//! Application error handling
//!
//! Domain errors (registration, login) are recoverable and rendered inline by
//! their handlers. `ApiError` is the request-fatal remainder, converted to a
//! generic error page so internal details never reach the user.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Login failure
///
/// An unknown email and a wrong password both collapse into
/// `InvalidCredentials`; the externally visible outcome never distinguishes
/// the two.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("credential store unavailable")]
    Store(#[from] anyhow::Error),
}

/// Registration failure
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Field validation failures, one message per failing check
    #[error("invalid registration input")]
    Invalid(Vec<String>),

    #[error("email already registered")]
    EmailTaken,

    #[error("credential store unavailable")]
    Store(#[from] anyhow::Error),
}

/// Request-fatal error rendered as a generic error page
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => error!("Internal error: {:?}", err),
            ApiError::Database(err) => error!("Database error: {:?}", err),
        }

        let body = Html(
            "<!DOCTYPE html>\n<html><head><title>Server error</title></head>\
             <body><h1>Server error</h1><p>Something went wrong. Please try again later.</p>\
             </body></html>"
                .to_string(),
        );

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type alias for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal(anyhow::anyhow!("boom"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_error_status() {
        let error = ApiError::Database(sqlx::Error::RowNotFound);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_register_error_display_is_generic() {
        let error = RegisterError::Store(anyhow::anyhow!("connection refused to 10.0.0.5"));
        // Display must stay generic; the cause is only reachable via the source chain.
        assert_eq!(error.to_string(), "credential store unavailable");
    }
}
