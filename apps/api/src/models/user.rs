//! User and access-token models for Kurabu
//!
//! Access tokens are issued by the external OAuth provider; this service only
//! validates them. Tokens are stored as SHA-256 digests, never in the clear.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User record from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash, never exposed
    #[serde(skip_serializing)]
    pub password_digest: String,

    /// Whether the user may access the admin surface
    pub admin: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Access token record from the access_tokens table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessToken {
    /// Token row identifier
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// SHA-256 digest of the raw token, hex-encoded
    #[serde(skip_serializing)]
    pub token_digest: String,

    /// Granted scopes
    pub scopes: Vec<String>,

    /// Expiry time; None means the token does not expire
    pub expires_at: Option<DateTime<Utc>>,

    /// Revocation time, if the token has been revoked
    pub revoked_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is neither revoked nor expired at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }
}

/// The authenticated caller, resolved from a validated access token
///
/// Injected into the GraphQL context by the HTTP handler; absent for
/// anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The resource owner
    pub user: User,
    /// The token the request presented
    pub token: AccessToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: Option<DateTime<Utc>>, revoked_at: Option<DateTime<Utc>>) -> AccessToken {
        AccessToken {
            id: 1,
            user_id: 1,
            token_digest: "digest".to_string(),
            scopes: vec![],
            expires_at,
            revoked_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_active_without_expiry() {
        assert!(token(None, None).is_active(Utc::now()));
    }

    #[test]
    fn test_token_inactive_when_expired() {
        let now = Utc::now();
        assert!(!token(Some(now - Duration::hours(1)), None).is_active(now));
        assert!(token(Some(now + Duration::hours(1)), None).is_active(now));
    }

    #[test]
    fn test_token_inactive_when_revoked() {
        let now = Utc::now();
        assert!(!token(Some(now + Duration::hours(1)), Some(now)).is_active(now));
    }
}
