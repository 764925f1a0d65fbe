//! Media repository
//!
//! Centralizes database operations for media rows. Relation fetches for
//! GraphQL go through the batched loaders instead; this repository serves
//! the top-level lookups and lists.

use sqlx::PgPool;

use crate::error::ApiResult;
use crate::models::{Media, MediaKind};

use super::utils::MEDIA_COLUMNS;

/// Repository for media database operations
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a media row by id
    pub async fn find(&self, id: i64) -> ApiResult<Option<Media>> {
        let sql = format!("SELECT {} FROM media WHERE id = $1", MEDIA_COLUMNS);
        let media = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(media)
    }

    /// Find a media row by slug
    pub async fn find_by_slug(&self, slug: &str) -> ApiResult<Option<Media>> {
        let sql = format!("SELECT {} FROM media WHERE slug = $1", MEDIA_COLUMNS);
        let media = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(media)
    }

    /// List media of one kind, most popular first
    pub async fn list(&self, kind: MediaKind, limit: i64, offset: i64) -> ApiResult<Vec<Media>> {
        let sql = format!(
            "SELECT {} FROM media WHERE kind = $1 \
             ORDER BY user_count DESC NULLS LAST, id \
             LIMIT $2 OFFSET $3",
            MEDIA_COLUMNS
        );
        let media = sqlx::query_as(&sql)
            .bind(kind)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(media)
    }

    /// Count media rows of one kind
    pub async fn count(&self, kind: MediaKind) -> ApiResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM media WHERE kind = $1")
            .bind(kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
