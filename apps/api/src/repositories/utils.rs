//! Shared utility constants for repositories
//!
//! SQL column lists for each entity type, reducing duplication and ensuring
//! consistency across queries.

/// SQL columns for media queries
pub const MEDIA_COLUMNS: &str = r#"
    id, kind, slug, titles, canonical_title_key, abbreviated_titles,
    synopsis, age_rating, age_rating_guide, nsfw,
    start_date, end_date, next_release_at, status, tba,
    average_rating, user_count, favorites_count,
    poster_image, cover_image,
    episode_count, episode_length, chapter_count, volume_count,
    created_at, updated_at
"#;

/// SQL columns for user queries
pub const USER_COLUMNS: &str = r#"
    id, name, email, password_digest, admin, created_at, updated_at
"#;

/// SQL columns for access token queries
pub const TOKEN_COLUMNS: &str = r#"
    id, user_id, token_digest, scopes, expires_at, revoked_at, created_at
"#;
