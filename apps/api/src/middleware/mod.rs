//! Request middleware and extractors

pub mod auth;

pub use auth::{extract_bearer_token, extract_session_cookie, AdminSession, SESSION_COOKIE};
