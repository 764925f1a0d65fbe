//! Admin HTTP route handlers
//!
//! Every route in this router is gated by the [`AdminSession`] extractor:
//! requests without a session token are redirected to the session endpoint,
//! and non-admin callers receive 403.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::middleware::AdminSession;
use crate::models::MediaKind;
use crate::repositories::{MediaRepository, UserRepository};

/// Shared application state for admin handlers
#[derive(Clone)]
pub struct AdminState {
    pub media: MediaRepository,
    pub users: UserRepository,
}

impl AdminState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            media: MediaRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}

/// Create the admin router
pub fn admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .with_state(state)
}

/// Catalog overview for the admin dashboard
async fn dashboard(
    session: AdminSession,
    State(state): State<AdminState>,
) -> ApiResult<impl IntoResponse> {
    let anime_count = state.media.count(MediaKind::Anime).await?;
    let manga_count = state.media.count(MediaKind::Manga).await?;
    let user_count = state.users.count().await?;

    tracing::debug!(admin = session.user.id, "admin dashboard viewed");

    Ok(Json(serde_json::json!({
        "admin": session.user.name,
        "counts": {
            "anime": anime_count,
            "manga": manga_count,
            "users": user_count,
        },
    })))
}
