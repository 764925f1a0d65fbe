//! Integration tests for the admin surface gate
//!
//! The dashboard itself needs a database, but the gating behavior of the
//! AdminSession extractor is testable without one: requests with no session
//! token never reach a query.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Extension, Router,
};
use tower::ServiceExt;

use kurabu_api::repositories::TokenRepository;
use kurabu_api::routes::{admin_router, AdminState};

fn create_test_app() -> Router {
    let pool = common::lazy_pool();
    Router::new()
        .nest("/admin", admin_router(AdminState::new(pool.clone())))
        .layer(Extension(TokenRepository::new(pool)))
}

#[tokio::test]
async fn test_admin_without_session_redirects_to_session_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/api/sessions/new")
    );
}

#[tokio::test]
async fn test_admin_ignores_unrelated_cookies() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin")
                .header(header::COOKIE, "theme=dark; locale=en")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // No session token among the cookies, so still a redirect
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_admin_without_token_repository_is_an_error() {
    // Router misconfiguration must not fall through to the dashboard
    let app = Router::new().nest("/admin", admin_router(AdminState::new(common::lazy_pool())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
