//! Application configuration loaded from environment variables.
//!
//! Everything has a workable local-dev default except the JWT secret,
//! which falls back to an insecure placeholder with a loud warning.

use std::env;

/// Placeholder signing secret for local development only.
const DEV_JWT_SECRET: &str = "dev-only-insecure-secret";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// HMAC signing secret for tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime in seconds (default 24h)
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in seconds (default 7 days)
    pub refresh_token_ttl_secs: i64,
    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
    /// Origin allowed by CORS (the API gateway / frontend)
    pub allowed_origin: String,

    // --- Connection pool sizing ---
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_max_lifetime_secs: u64,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(v) => v.into_bytes(),
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the insecure development default. \
                     Set JWT_SECRET before exposing this service."
                );
                DEV_JWT_SECRET.as_bytes().to_vec()
            }
        };

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://auth.db".to_string()),
            jwt_secret,
            access_token_ttl_secs: parse_var("ACCESS_TOKEN_TTL_SECS", 24 * 60 * 60)?,
            refresh_token_ttl_secs: parse_var("REFRESH_TOKEN_TTL_SECS", 7 * 24 * 60 * 60)?,
            bcrypt_cost: parse_var("BCRYPT_COST", 12)?,
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 25)?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", 5)?,
            db_max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", 30 * 60)?,
            db_acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        })
    }

    /// Config for tests: in-memory database, cheap bcrypt cost.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            access_token_ttl_secs: 24 * 60 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            bcrypt_cost: 4,
            allowed_origin: "http://localhost:3000".to_string(),
            db_max_connections: 1,
            db_min_connections: 1,
            db_max_lifetime_secs: 30 * 60,
            db_acquire_timeout_secs: 5,
        }
    }
}

/// Parse an env var, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
