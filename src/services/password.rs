//! Password hashing on the blocking thread pool.
//!
//! bcrypt is CPU-bound at roughly 100ms per verify at cost 12, so both
//! operations run under `spawn_blocking` to keep the async runtime
//! responsive for unrelated requests.

use crate::error::AppError;

/// Hash a password with bcrypt at the given cost factor.
pub async fn hash(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task join error: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("bcrypt hash failed: {}", e)))
}

/// Check a password against a stored bcrypt hash.
pub async fn verify(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task join error: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("bcrypt verify failed: {}", e)))
}
