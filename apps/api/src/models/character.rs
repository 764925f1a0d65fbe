//! Character casting model for Kurabu
//!
//! A `CharacterEdge` is one row of the media/character join, carried with the
//! character columns it was fetched alongside so a single query serves the
//! batched relation loader.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::media::MediaKind;

/// Prominence of a character within a media, matching PostgreSQL character_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "character_role", rename_all = "lowercase")]
pub enum CharacterRole {
    Main,
    Supporting,
    Recurring,
    Cameo,
}

/// One character casting for a media, joined with the character itself
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterEdge {
    /// Casting row identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// Prominence of the character in this media
    pub role: CharacterRole,

    /// Character identifier
    pub character_id: i64,

    /// Character name
    pub character_name: String,

    /// URL-friendly character identifier
    pub character_slug: String,

    /// Character portrait URL
    pub character_image_url: Option<String>,

    /// Creation timestamp of the casting
    pub created_at: DateTime<Utc>,
}
