// SPDX-License-Identifier: MIT

//! Credential store: durable user identity persistence.
//!
//! The store is the only code that sees password hashes. Every mutation
//! bumps `updated_at`; deletion is always a soft-delete.

use crate::error::AppError;
use crate::models::user::{NewUser, Role, User};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Typed operations over the `users` table.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Fails with `Conflict` when the email is taken,
    /// whether the existing account is active or not. The email is
    /// lowercased here so the UNIQUE constraint is case-insensitive in
    /// effect no matter who calls.
    pub async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new.email.to_lowercase(),
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        // The UNIQUE constraint is the conflict authority; the unique
        // violation maps to AppError::Conflict in the From impl.
        sqlx::query(
            "INSERT INTO users \
             (id, email, password_hash, first_name, last_name, role, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Look up an active user by email (lowercased before the query).
    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::Disabled);
        }
        Ok(user)
    }

    /// Look up an active user by id.
    pub async fn get_by_id(&self, id: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::Disabled);
        }
        Ok(user)
    }

    /// Best-effort login-timestamp bookkeeping. A login must not fail
    /// because this write did, so errors are logged and swallowed.
    pub async fn update_last_login(&self, id: &str) {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET last_login_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await;

        if let Err(err) = result {
            tracing::warn!(user_id = %id, error = %err, "Failed to record last login");
        }
    }

    /// Replace the stored credential hash.
    pub async fn update_password_hash(&self, id: &str, new_hash: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?",
        )
        .bind(new_hash)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    /// Soft-delete: flip the active flag. Zero rows affected (unknown id
    /// or already inactive) reports `UserNotFound`.
    pub async fn deactivate(&self, id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = ? WHERE id = ? AND is_active = TRUE",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
