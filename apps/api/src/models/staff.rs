//! Staff credit model for Kurabu

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::media::MediaKind;

/// One staff credit for a media, joined with the credited person
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffEdge {
    /// Credit row identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// Role the person filled (e.g. "Director", "Original Creator")
    pub role: String,

    /// Person identifier
    pub person_id: i64,

    /// Person name
    pub person_name: String,

    /// Person portrait URL
    pub person_image_url: Option<String>,

    /// Creation timestamp of the credit
    pub created_at: DateTime<Utc>,
}
