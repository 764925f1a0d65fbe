//! Authentication extractors for Axum handlers
//!
//! - `AdminSession`: gates the admin surface. Requests without a session
//!   token are redirected to the session endpoint; an expired or invalid
//!   token answers 403; a valid token must belong to an admin user.
//!
//! The session token travels either in the session cookie or as a Bearer
//! token; both resolve against the access-token store.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::models::{AccessToken, User};
use crate::repositories::TokenRepository;

/// Name of the session cookie carrying the access token
pub const SESSION_COOKIE: &str = "kurabu_session";

/// Where unauthenticated admin requests are sent
const SESSION_URL: &str = "/api/sessions/new";

/// Extract bearer token from Authorization header (case-insensitive)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    // Split on whitespace and validate scheme case-insensitively
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Extract the session token from the session cookie
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Session token for a request: cookie first, bearer token as fallback
fn session_token(headers: &HeaderMap) -> Option<String> {
    extract_session_cookie(headers).or_else(|| extract_bearer_token(headers).map(str::to_string))
}

/// Admin-session extractor - requires a valid token owned by an admin
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The authenticated admin user
    pub user: User,
    /// The access token the request presented
    pub token: AccessToken,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(repo) = parts.extensions.get::<TokenRepository>().cloned() else {
            return Err(
                ApiError::Internal("token repository not configured".to_string()).into_response(),
            );
        };

        let Some(raw_token) = session_token(&parts.headers) else {
            tracing::debug!("admin request without session token, redirecting");
            return Err(Redirect::to(SESSION_URL).into_response());
        };

        match repo.resolve_current_user(&raw_token).await {
            Ok(Some(current)) if current.user.admin => Ok(Self {
                user: current.user,
                token: current.token,
            }),
            Ok(Some(current)) => {
                tracing::warn!(user_id = current.user.id, "non-admin denied admin access");
                Err((StatusCode::FORBIDDEN, "Forbidden").into_response())
            }
            Ok(None) => Err((StatusCode::FORBIDDEN, "Token expired/invalid").into_response()),
            Err(error) => Err(error.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer abc123");
        assert_eq!(extract_bearer_token(&headers), Some("abc123"));

        let headers = headers_with(header::AUTHORIZATION, "bearer abc123");
        assert_eq!(extract_bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_malformed() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer abc extra");
        assert_eq!(extract_bearer_token(&headers), None);

        let headers = headers_with(header::AUTHORIZATION, "Basic abc123");
        assert_eq!(extract_bearer_token(&headers), None);

        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_extraction() {
        let headers = headers_with(
            header::COOKIE,
            "theme=dark; kurabu_session=tok-1; other=x",
        );
        assert_eq!(extract_session_cookie(&headers), Some("tok-1".to_string()));
    }

    #[test]
    fn test_session_cookie_absent() {
        let headers = headers_with(header::COOKIE, "theme=dark");
        assert_eq!(extract_session_cookie(&headers), None);
        assert_eq!(extract_session_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_token_prefers_cookie() {
        let mut headers = headers_with(header::COOKIE, "kurabu_session=cookie-tok");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-tok"),
        );
        assert_eq!(session_token(&headers), Some("cookie-tok".to_string()));

        let headers = headers_with(header::AUTHORIZATION, "Bearer bearer-tok");
        assert_eq!(session_token(&headers), Some("bearer-tok".to_string()));
    }
}
