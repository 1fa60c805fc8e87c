// SPDX-License-Identifier: MIT

//! Authentication routes: register, login, refresh, verify, logout and
//! the password-reset stubs.
//!
//! Handlers validate request shape, delegate to the auth service and
//! shape errors uniformly. Wire bodies are camelCase; user payloads are
//! always [`PublicUser`].

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::bearer_token;
use crate::models::token::IssuedTokens;
use crate::models::user::PublicUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/verify", post(verify))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

// ─── Request / Response shapes ───────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "must match password"))]
    pub confirm_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub token: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "must match password"))]
    pub confirm_password: String,
}

/// Token pair plus the sanitized user, as returned by register, login
/// and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(flatten)]
    pub tokens: IssuedTokens,
    pub user: PublicUser,
}

/// In-band verification result: the endpoint answers 200 for valid and
/// invalid tokens alike, and 5xx only when the store is unreachable.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ─── Handlers ────────────────────────────────────────────────

/// Register a new account and sign it in.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    let (user, tokens) = state
        .auth
        .register(&req.email, &req.password, req.first_name, req.last_name)
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { tokens, user })))
}

/// Verify credentials and issue a token pair.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate()?;

    let (user, tokens) = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(TokenResponse { tokens, user }))
}

/// Rotate a refresh token into a new access/refresh pair.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate()?;

    let (user, tokens) = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(TokenResponse { tokens, user }))
}

/// Check an access token on behalf of another service.
///
/// Validity is reported in-band so consumers can distinguish "token
/// invalid" (200, valid: false) from "auth service unavailable" (5xx).
async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    match state.auth.verify_token(&req.token).await {
        Ok(user) => Ok(Json(VerifyResponse {
            valid: true,
            user: Some(user),
            error: None,
        })),
        Err(
            err @ (AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::WrongTokenType
            | AppError::UserNotFound
            | AppError::Disabled),
        ) => Ok(Json(VerifyResponse {
            valid: false,
            user: None,
            error: Some(err.to_string()),
        })),
        Err(err) => Err(err),
    }
}

/// Logout always succeeds: stateless tokens cannot be invalidated
/// server-side, so the client discards its copy. The token is still
/// verified so the audit log is honest about who logged out.
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<MessageResponse> {
    if let Some(token) = bearer_token(&headers) {
        match state.auth.verify_token(token).await {
            Ok(user) => tracing::info!(user_id = %user.id, "User logged out"),
            Err(err) => tracing::debug!(error = %err, "Logout with invalid token"),
        }
    }

    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}

/// Anti-enumeration: once the shape is valid, the response is the same
/// whatever happens internally, store failures included.
async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    req.validate()?;

    state.auth.forgot_password(&req.email).await;

    Ok(Json(MessageResponse {
        message: "If the account exists, a password reset link has been sent".to_string(),
    }))
}

/// Completing a reset needs a persisted single-use token table plus a
/// delivery channel; neither exists yet, so this reports the gap
/// explicitly instead of pretending.
async fn reset_password(
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    req.validate()?;

    Err(AppError::NotImplemented)
}
