//! External-site mapping model for Kurabu

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::media::MediaKind;

/// A link from a media to its record on an external site
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mapping {
    /// Mapping identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// External site name (e.g. "anidb", "myanimelist/anime")
    pub external_site: String,

    /// Identifier of the media on the external site
    pub external_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
