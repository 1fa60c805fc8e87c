// SPDX-License-Identifier: MIT

//! Token issuance and validation (HS256).
//!
//! Expiry is checked here against an explicit `now` rather than by
//! jsonwebtoken, so tests can advance the clock without sleeping.

use crate::error::AppError;
use crate::models::token::{Claims, IssuedTokens, TokenType};
use crate::models::user::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Stateless signer/verifier for access and refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    /// Mint a fresh access/refresh pair for the user.
    pub fn issue_pair(&self, user: &User) -> Result<IssuedTokens, AppError> {
        self.issue_pair_at(user, Utc::now())
    }

    /// Mint a pair with an explicit issue instant.
    pub fn issue_pair_at(&self, user: &User, now: DateTime<Utc>) -> Result<IssuedTokens, AppError> {
        let access_expires_at = now + self.access_ttl;

        let access = Claims {
            sub: user.id.clone(),
            iat: now.timestamp(),
            exp: access_expires_at.timestamp(),
            token_type: TokenType::Access,
            email: Some(user.email.clone()),
            role: Some(user.role),
            active: Some(user.is_active),
        };
        let refresh = Claims {
            sub: user.id.clone(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
            token_type: TokenType::Refresh,
            email: None,
            role: None,
            active: None,
        };

        let header = Header::new(Algorithm::HS256);
        Ok(IssuedTokens {
            access_token: self.sign(&header, &access)?,
            refresh_token: self.sign(&header, &refresh)?,
            expires_in: self.access_ttl.num_seconds(),
            expires_at: access_expires_at,
        })
    }

    fn sign(&self, header: &Header, claims: &Claims) -> Result<String, AppError> {
        encode(header, claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {}", e)))
    }

    /// Decode a token and validate signature, expiry and type at `now`.
    ///
    /// Check order matters: a bad signature is always `InvalidToken`,
    /// an expired token of the wrong type reports `TokenExpired`.
    pub fn check(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, AppError> {
        // HS256 only; any other alg in the header is rejected by decode.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?;
        let claims = data.claims;

        if claims.exp < now.timestamp() {
            return Err(AppError::TokenExpired);
        }
        if claims.token_type != expected {
            return Err(AppError::WrongTokenType);
        }
        Ok(claims)
    }
}
