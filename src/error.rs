// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! Every variant maps to a stable machine-readable `error` kind; internal
//! detail (database messages, stack context) never leaves the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Email is already registered")]
    Conflict,

    /// Deliberately generic: the same message for unknown email,
    /// disabled account and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Wrong token type for this operation")]
    WrongTokenType,

    #[error("User not found")]
    UserNotFound,

    #[error("Account is disabled")]
    Disabled,

    #[error("Not implemented")]
    NotImplemented,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, fields) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(self.to_string()),
                Some(field_messages(errors)),
            ),
            AppError::Conflict => (StatusCode::CONFLICT, "conflict", Some(self.to_string()), None),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                Some(self.to_string()),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                Some(self.to_string()),
                None,
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "token_expired",
                Some(self.to_string()),
                None,
            ),
            AppError::WrongTokenType => (
                StatusCode::UNAUTHORIZED,
                "wrong_token_type",
                Some(self.to_string()),
                None,
            ),
            AppError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "user_not_found",
                Some(self.to_string()),
                None,
            ),
            AppError::Disabled => (
                StatusCode::UNAUTHORIZED,
                "account_disabled",
                Some(self.to_string()),
                None,
            ),
            AppError::NotImplemented => (
                StatusCode::BAD_REQUEST,
                "not_implemented",
                Some("Password reset is not available yet".to_string()),
                None,
            ),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    None,
                    None,
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None, None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten validator output into field -> human messages.
fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::ServiceUnavailable(err.to_string())
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict,
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
