//! Access token repository
//!
//! Tokens are issued by the external OAuth provider and presented to this
//! service as opaque strings; lookups go through their SHA-256 digest so the
//! raw token never touches the database.

use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::error::ApiResult;
use crate::models::{AccessToken, CurrentUser, User};

use super::utils::{TOKEN_COLUMNS, USER_COLUMNS};

/// Repository for access token validation
#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hex-encoded SHA-256 digest of a raw token
    pub fn digest(raw_token: &str) -> String {
        hex::encode(Sha256::digest(raw_token.as_bytes()))
    }

    /// Look up a token by its raw value
    ///
    /// Returns the token row regardless of revocation or expiry; callers
    /// decide how to treat inactive tokens.
    pub async fn find_by_token(&self, raw_token: &str) -> ApiResult<Option<AccessToken>> {
        let sql = format!(
            "SELECT {} FROM access_tokens WHERE token_digest = $1",
            TOKEN_COLUMNS
        );
        let token = sqlx::query_as(&sql)
            .bind(Self::digest(raw_token))
            .fetch_optional(&self.pool)
            .await?;
        Ok(token)
    }

    /// Resolve the caller behind a raw token
    ///
    /// Returns None when the token is unknown, revoked, or expired, or when
    /// its resource owner no longer exists.
    pub async fn resolve_current_user(&self, raw_token: &str) -> ApiResult<Option<CurrentUser>> {
        let Some(token) = self.find_by_token(raw_token).await? else {
            return Ok(None);
        };
        if !token.is_active(Utc::now()) {
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user: Option<User> = sqlx::query_as(&sql)
            .bind(token.user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(|user| CurrentUser { user, token }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_hex_sha256() {
        let digest = TokenRepository::digest("secret-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, TokenRepository::digest("secret-token"));
        assert_ne!(digest, TokenRepository::digest("other-token"));
    }
}
