//! User repository

use sqlx::PgPool;

use crate::error::ApiResult;
use crate::models::User;

use super::utils::USER_COLUMNS;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by id
    pub async fn find(&self, id: i64) -> ApiResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Find a user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        );
        let user = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Replace a user's password digest
    pub async fn update_password_digest(&self, id: i64, digest: &str) -> ApiResult<()> {
        sqlx::query("UPDATE users SET password_digest = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(digest)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record a password reset token digest for a user
    ///
    /// The raw token is handed to the mail delivery collaborator; only its
    /// digest is stored.
    pub async fn create_password_reset(&self, user_id: i64, token_digest: &str) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token_digest, expires_at) \
             VALUES ($1, $2, NOW() + INTERVAL '2 hours')",
        )
        .bind(user_id)
        .bind(token_digest)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Count all users
    pub async fn count(&self) -> ApiResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
