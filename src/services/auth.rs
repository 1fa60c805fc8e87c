// SPDX-License-Identifier: MIT

//! Account flows: registration, login, token verification and rotation.
//!
//! Everything here is stateless; any number of replicas can serve
//! requests against the same credential store without coordination.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::token::{IssuedTokens, TokenType};
use crate::models::user::{NewUser, PublicUser};
use crate::services::password;
use crate::services::token::TokenService;
use chrono::{DateTime, Utc};
use rand::RngCore;

/// Length of the password-reset token in raw bytes (hex doubles it).
const RESET_TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: UserStore, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Create an account and issue its first token pair.
    ///
    /// Input shape (email format, password length, confirmation) is the
    /// handler's job; duplicate emails surface as `Conflict` here.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<(PublicUser, IssuedTokens), AppError> {
        let email = email.trim().to_lowercase();
        let password_hash = password::hash(password, self.bcrypt_cost).await?;

        let user = self
            .store
            .create(NewUser {
                email,
                password_hash,
                first_name,
                last_name,
            })
            .await?;

        let tokens = self.tokens.issue_pair(&user)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok((user.into(), tokens))
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown email, disabled account and wrong password all flatten to
    /// the same `InvalidCredentials` before leaving this method.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(PublicUser, IssuedTokens), AppError> {
        let email = email.trim().to_lowercase();

        let user = match self.store.get_by_email(&email).await {
            Ok(user) => user,
            Err(AppError::UserNotFound) | Err(AppError::Disabled) => {
                return Err(AppError::InvalidCredentials)
            }
            Err(err) => return Err(err),
        };

        if !password::verify(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        // Bookkeeping only; never fails the login.
        self.store.update_last_login(&user.id).await;

        let tokens = self.tokens.issue_pair(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user.into(), tokens))
    }

    /// Verify an access token against the current clock.
    pub async fn verify_token(&self, token: &str) -> Result<PublicUser, AppError> {
        self.verify_token_at(token, Utc::now()).await
    }

    /// Verify an access token at an explicit instant.
    ///
    /// The user record is always re-fetched: the active flag embedded in
    /// the claims is a stale snapshot, and a deactivated user's tokens
    /// must be rejected even while cryptographically valid.
    pub async fn verify_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<PublicUser, AppError> {
        let claims = self.tokens.check(token, TokenType::Access, now)?;
        let user = self.store.get_by_id(&claims.sub).await?;
        Ok(user.into())
    }

    /// Redeem a refresh token for a brand-new pair.
    pub async fn refresh(&self, token: &str) -> Result<(PublicUser, IssuedTokens), AppError> {
        self.refresh_at(token, Utc::now()).await
    }

    /// Rotation always issues both tokens; the old refresh token stays
    /// valid until its natural expiry (stateless design, no denylist).
    pub async fn refresh_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<(PublicUser, IssuedTokens), AppError> {
        let claims = self.tokens.check(token, TokenType::Refresh, now)?;
        let user = self.store.get_by_id(&claims.sub).await?;
        let tokens = self.tokens.issue_pair_at(&user, now)?;
        tracing::debug!(user_id = %user.id, "Token pair rotated");
        Ok((user.into(), tokens))
    }

    /// Start a password reset. The caller always gets success: not for
    /// unknown emails, not for disabled accounts, and not even for store
    /// failures may the outcome differ.
    ///
    /// Delivery is an external collaborator (email service); this core
    /// only generates the token. TODO: persist the token in a single-use,
    /// expiring table once the notification service is wired up.
    pub async fn forgot_password(&self, email: &str) {
        let email = email.trim().to_lowercase();

        match self.store.get_by_email(&email).await {
            Ok(user) => {
                let mut bytes = [0u8; RESET_TOKEN_BYTES];
                rand::thread_rng().fill_bytes(&mut bytes);
                let reset_token = hex::encode(bytes);

                // The token itself stays out of production logs.
                tracing::debug!(user_id = %user.id, reset_token = %reset_token, "Reset token generated");
                tracing::info!(user_id = %user.id, "Password reset requested");
            }
            Err(AppError::UserNotFound) | Err(AppError::Disabled) => {
                tracing::info!("Password reset requested for unknown or disabled account");
            }
            Err(err) => {
                // Operators see the failure; the caller sees success.
                tracing::error!(error = %err, "Password reset lookup failed");
            }
        }
    }
}
