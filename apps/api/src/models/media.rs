//! Media model for Kurabu
//!
//! A media row is either an anime or a manga; the two share one table with a
//! `kind` discriminant plus a handful of kind-specific nullable columns.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Media kind discriminant matching PostgreSQL media_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    /// GraphQL-facing name of the concrete media variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Anime => "Anime",
            Self::Manga => "Manga",
        }
    }
}

/// Recommended minimum age group, matching PostgreSQL age_rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "age_rating", rename_all = "UPPERCASE")]
pub enum AgeRating {
    G,
    Pg,
    R,
    R18,
}

/// Releasing status, matching PostgreSQL release_status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "release_status", rename_all = "lowercase")]
pub enum ReleaseStatus {
    #[default]
    Tba,
    Unreleased,
    Upcoming,
    Current,
    Finished,
}

/// Season a media premiered in, derived from its start date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

/// Reference to one already-loaded media row, used as the parent key when
/// batching relation fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub id: i64,
}

/// One rendition of an image at a particular size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageView {
    /// Public URL of this rendition
    pub url: String,
    /// Pixel width, if known
    pub width: Option<i32>,
    /// Pixel height, if known
    pub height: Option<i32>,
}

/// An uploaded image with its derived renditions, stored as JSONB
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    /// The original upload
    pub original: ImageView,
    /// Named resized renditions (tiny, small, medium, large)
    #[serde(default)]
    pub views: HashMap<String, ImageView>,
}

/// Media record from the media table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    /// Unique media identifier
    pub id: i64,

    /// Anime or manga
    pub kind: MediaKind,

    /// URL-friendly identifier
    pub slug: String,

    /// Titles keyed by locale (e.g. "en", "en_jp", "ja_jp")
    #[sqlx(json)]
    pub titles: HashMap<String, String>,

    /// Locale key of the canonical title within `titles`
    pub canonical_title_key: String,

    /// Abbreviated or alternative titles
    pub abbreviated_titles: Vec<String>,

    /// Mostly spoiler-free summary of the media
    pub synopsis: Option<String>,

    /// Recommended minimum age group
    pub age_rating: Option<AgeRating>,

    /// Explanation of the age rating
    pub age_rating_guide: Option<String>,

    /// Whether the media is not Safe-for-Work
    pub nsfw: bool,

    /// Day of the first release
    pub start_date: Option<NaiveDate>,

    /// Day of the final release
    pub end_date: Option<NaiveDate>,

    /// Time of the next scheduled release
    pub next_release_at: Option<DateTime<Utc>>,

    /// Current releasing status
    pub status: ReleaseStatus,

    /// Free-text description of when the media is expected to release
    pub tba: Option<String>,

    /// Average rating amongst all users, on a 0-100 scale
    pub average_rating: Option<f64>,

    /// Number of users with this media in their library
    pub user_count: Option<i32>,

    /// Number of users with this media in their favorites
    pub favorites_count: Option<i32>,

    /// Poster image
    #[sqlx(json)]
    pub poster_image: ImageSet,

    /// Large banner image
    #[sqlx(json)]
    pub cover_image: ImageSet,

    /// Episode count (anime only)
    pub episode_count: Option<i32>,

    /// Typical episode length in minutes (anime only)
    pub episode_length: Option<i32>,

    /// Chapter count (manga only)
    pub chapter_count: Option<i32>,

    /// Volume count (manga only)
    pub volume_count: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Media {
    /// Batch key for this row's relations
    pub fn media_ref(&self) -> MediaRef {
        MediaRef {
            kind: self.kind,
            id: self.id,
        }
    }

    /// The canonical title, resolved through `canonical_title_key`
    ///
    /// Falls back to the slug when the key points at a missing locale.
    pub fn canonical_title(&self) -> &str {
        self.titles
            .get(&self.canonical_title_key)
            .map(String::as_str)
            .unwrap_or(&self.slug)
    }

    /// Whether the media is Safe-for-Work
    pub fn sfw(&self) -> bool {
        !self.nsfw
    }

    /// Premiere season, derived from the start date
    pub fn season(&self) -> Option<ReleaseSeason> {
        self.start_date.map(|date| match date.month() {
            12 | 1 | 2 => ReleaseSeason::Winter,
            3..=5 => ReleaseSeason::Spring,
            6..=8 => ReleaseSeason::Summer,
            _ => ReleaseSeason::Fall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_with(start: Option<NaiveDate>) -> Media {
        Media {
            id: 1,
            kind: MediaKind::Anime,
            slug: "cowboy-bebop".to_string(),
            titles: HashMap::from([
                ("en".to_string(), "Cowboy Bebop".to_string()),
                ("ja_jp".to_string(), "カウボーイビバップ".to_string()),
            ]),
            canonical_title_key: "en".to_string(),
            abbreviated_titles: vec![],
            synopsis: None,
            age_rating: None,
            age_rating_guide: None,
            nsfw: false,
            start_date: start,
            end_date: None,
            next_release_at: None,
            status: ReleaseStatus::Finished,
            tba: None,
            average_rating: None,
            user_count: None,
            favorites_count: None,
            poster_image: ImageSet::default(),
            cover_image: ImageSet::default(),
            episode_count: Some(26),
            episode_length: Some(24),
            chapter_count: None,
            volume_count: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_canonical_title_resolves_locale_key() {
        let media = media_with(None);
        assert_eq!(media.canonical_title(), "Cowboy Bebop");
    }

    #[test]
    fn test_canonical_title_falls_back_to_slug() {
        let mut media = media_with(None);
        media.canonical_title_key = "de".to_string();
        assert_eq!(media.canonical_title(), "cowboy-bebop");
    }

    #[test]
    fn test_season_from_start_date() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        assert_eq!(
            media_with(date(1998, 4, 3)).season(),
            Some(ReleaseSeason::Spring)
        );
        assert_eq!(
            media_with(date(2020, 12, 25)).season(),
            Some(ReleaseSeason::Winter)
        );
        assert_eq!(
            media_with(date(2020, 7, 1)).season(),
            Some(ReleaseSeason::Summer)
        );
        assert_eq!(
            media_with(date(2020, 10, 1)).season(),
            Some(ReleaseSeason::Fall)
        );
        assert_eq!(media_with(None).season(), None);
    }

    #[test]
    fn test_sfw_inverts_nsfw() {
        let mut media = media_with(None);
        assert!(media.sfw());
        media.nsfw = true;
        assert!(!media.sfw());
    }
}
