//! Media reaction model for Kurabu

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::media::MediaKind;

/// A short user reaction to a media
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaReaction {
    /// Reaction identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// Author of the reaction
    pub user_id: i64,

    /// The reaction text
    pub reaction: String,

    /// Number of up votes
    pub up_votes_count: i32,

    /// Library progress of the author when reacting (episodes or chapters)
    pub progress: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
