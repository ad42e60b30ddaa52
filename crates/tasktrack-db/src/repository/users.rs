//! User operations

use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewUser, User};
use crate::repository::Database;
use crate::utils::{format_timestamp, now_micros};

impl Database {
    // ==================== User Operations ====================

    /// Insert a new user
    ///
    /// Email uniqueness is left to the `UNIQUE` constraint, so concurrent
    /// registrations of the same address cannot both succeed.
    pub async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let now = now_micros();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(format_timestamp(&now))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, || format!("User '{}' already exists", user.email)))?;

        let id: i64 = result.get("id");

        Ok(User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    /// Get a user by email (exact, case-sensitive match)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }
}
