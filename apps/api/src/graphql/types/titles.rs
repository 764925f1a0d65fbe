//! Localized title types

use std::collections::HashMap;

use async_graphql::{Json, SimpleObject};

use crate::models::Media;

/// A map of locale code to localized text
pub type LocalizedMap = Json<HashMap<String, String>>;

/// The titles of a media in various locales
#[derive(Debug, Clone, SimpleObject)]
pub struct TitlesList {
    /// Titles keyed by locale (e.g. "en", "en_jp", "ja_jp")
    pub localized: LocalizedMap,
    /// Abbreviated or alternative titles
    pub alternatives: Vec<String>,
    /// The canonical title
    pub canonical: String,
    /// Locale of the canonical title
    pub canonical_locale: Option<String>,
}

impl From<&Media> for TitlesList {
    fn from(media: &Media) -> Self {
        Self {
            localized: Json(media.titles.clone()),
            alternatives: media.abbreviated_titles.clone(),
            canonical: media.canonical_title().to_string(),
            canonical_locale: Some(media.canonical_title_key.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSet, MediaKind, ReleaseStatus};
    use chrono::Utc;

    #[test]
    fn test_titles_list_from_media() {
        let media = Media {
            id: 1,
            kind: MediaKind::Manga,
            slug: "one-piece".to_string(),
            titles: HashMap::from([("en_jp".to_string(), "One Piece".to_string())]),
            canonical_title_key: "en_jp".to_string(),
            abbreviated_titles: vec!["OP".to_string()],
            synopsis: None,
            age_rating: None,
            age_rating_guide: None,
            nsfw: false,
            start_date: None,
            end_date: None,
            next_release_at: None,
            status: ReleaseStatus::Current,
            tba: None,
            average_rating: None,
            user_count: None,
            favorites_count: None,
            poster_image: ImageSet::default(),
            cover_image: ImageSet::default(),
            episode_count: None,
            episode_length: None,
            chapter_count: None,
            volume_count: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let titles = TitlesList::from(&media);
        assert_eq!(titles.canonical, "One Piece");
        assert_eq!(titles.canonical_locale.as_deref(), Some("en_jp"));
        assert_eq!(titles.alternatives, vec!["OP".to_string()]);
    }
}
