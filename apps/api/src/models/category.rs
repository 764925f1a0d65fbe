//! Category model for Kurabu

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::media::MediaKind;

/// One category tagged on a media, joined with the category itself
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryEdge {
    /// Tagging row identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// Category identifier
    pub category_id: i64,

    /// Category title
    pub title: String,

    /// URL-friendly category identifier
    pub slug: String,

    /// Whether the category itself is not Safe-for-Work
    pub nsfw: bool,

    /// Creation timestamp of the tagging
    pub created_at: DateTime<Utc>,
}
