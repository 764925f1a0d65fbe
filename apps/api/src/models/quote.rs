//! Quote model for Kurabu

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::media::MediaKind;

/// A memorable quote from a media
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    /// Quote identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// The quote text
    pub content: String,

    /// Character the quote is attributed to, if any
    pub character_id: Option<i64>,

    /// Number of users who liked the quote
    pub likes_count: i32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
