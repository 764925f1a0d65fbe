//! Relation fetchers for media associations
//!
//! One fetcher per relation of the Media interface. Each issues a single
//! query covering every parent key in the batch, `WHERE media_kind = $1 AND
//! media_id = ANY($2)`, and partitions the rows back by parent. Row-level
//! policy scopes (approved people, approved companies) live in the SQL here.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::models::{
    CategoryEdge, CharacterEdge, Mapping, MediaKind, MediaReaction, MediaRef, ProductionEdge,
    Quote, StaffEdge,
};

use super::association::{FetchResult, LoadError, Policy, RelationFetcher};

fn parent_ids(keys: &[MediaRef]) -> Vec<i64> {
    keys.iter().map(|k| k.id).collect()
}

/// Group fetched rows under their parent key
fn partition<T>(
    kind: MediaKind,
    rows: Vec<T>,
    media_id: impl Fn(&T) -> i64,
) -> HashMap<MediaRef, Vec<T>> {
    let mut result: HashMap<MediaRef, Vec<T>> = HashMap::new();
    for row in rows {
        let key = MediaRef {
            kind,
            id: media_id(&row),
        };
        result.entry(key).or_default().push(row);
    }
    result
}

fn fetch_error(error: sqlx::Error) -> LoadError {
    LoadError::Fetch(Arc::new(error))
}

/// Fetcher for the characters who starred in a media
#[derive(Clone)]
pub struct CharactersFetcher {
    pool: PgPool,
}

impl CharactersFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for CharactersFetcher {
    type Key = MediaRef;
    type Entity = CharacterEdge;

    const RELATION: &'static str = "characters";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, CharacterEdge> {
        if policy != Policy::Public {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<CharacterEdge> = sqlx::query_as(
            r#"
            SELECT mc.id, mc.media_kind, mc.media_id, mc.role,
                   c.id AS character_id, c.name AS character_name,
                   c.slug AS character_slug, c.image_url AS character_image_url,
                   mc.created_at
            FROM media_characters mc
            JOIN characters c ON c.id = mc.character_id
            WHERE mc.media_kind = $1 AND mc.media_id = ANY($2)
            ORDER BY mc.media_id, mc.role, c.name
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for the staff members who worked on a media
///
/// Scoped by the media_staff policy: only approved people are credited.
#[derive(Clone)]
pub struct StaffFetcher {
    pool: PgPool,
}

impl StaffFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for StaffFetcher {
    type Key = MediaRef;
    type Entity = StaffEdge;

    const RELATION: &'static str = "staff";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, StaffEdge> {
        if policy != Policy::MediaStaff {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<StaffEdge> = sqlx::query_as(
            r#"
            SELECT ms.id, ms.media_kind, ms.media_id, ms.role,
                   p.id AS person_id, p.name AS person_name,
                   p.image_url AS person_image_url, ms.created_at
            FROM media_staff ms
            JOIN people p ON p.id = ms.person_id
            WHERE ms.media_kind = $1 AND ms.media_id = ANY($2)
              AND p.approved = TRUE
            ORDER BY ms.media_id, p.name
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for the companies which helped to produce a media
///
/// Scoped by the media_production policy: only approved companies appear.
#[derive(Clone)]
pub struct ProductionsFetcher {
    pool: PgPool,
}

impl ProductionsFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for ProductionsFetcher {
    type Key = MediaRef;
    type Entity = ProductionEdge;

    const RELATION: &'static str = "productions";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, ProductionEdge> {
        if policy != Policy::MediaProduction {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<ProductionEdge> = sqlx::query_as(
            r#"
            SELECT mp.id, mp.media_kind, mp.media_id, mp.role,
                   pr.id AS company_id, pr.name AS company_name, mp.created_at
            FROM media_productions mp
            JOIN producers pr ON pr.id = mp.company_id
            WHERE mp.media_kind = $1 AND mp.media_id = ANY($2)
              AND pr.approved = TRUE
            ORDER BY mp.media_id, mp.role, pr.name
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for quotes from a media
#[derive(Clone)]
pub struct QuotesFetcher {
    pool: PgPool,
}

impl QuotesFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for QuotesFetcher {
    type Key = MediaRef;
    type Entity = Quote;

    const RELATION: &'static str = "quotes";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, Quote> {
        if policy != Policy::Public {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<Quote> = sqlx::query_as(
            r#"
            SELECT id, media_kind, media_id, content, character_id,
                   likes_count, created_at
            FROM quotes
            WHERE media_kind = $1 AND media_id = ANY($2)
            ORDER BY media_id, likes_count DESC, id
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for the categories tagged on a media
#[derive(Clone)]
pub struct CategoriesFetcher {
    pool: PgPool,
}

impl CategoriesFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for CategoriesFetcher {
    type Key = MediaRef;
    type Entity = CategoryEdge;

    const RELATION: &'static str = "categories";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, CategoryEdge> {
        if policy != Policy::Public {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<CategoryEdge> = sqlx::query_as(
            r#"
            SELECT mc.id, mc.media_kind, mc.media_id,
                   c.id AS category_id, c.title, c.slug, c.nsfw, mc.created_at
            FROM media_categories mc
            JOIN categories c ON c.id = mc.category_id
            WHERE mc.media_kind = $1 AND mc.media_id = ANY($2)
            ORDER BY mc.media_id, c.title
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for external-site mappings of a media
#[derive(Clone)]
pub struct MappingsFetcher {
    pool: PgPool,
}

impl MappingsFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for MappingsFetcher {
    type Key = MediaRef;
    type Entity = Mapping;

    const RELATION: &'static str = "mappings";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, Mapping> {
        if policy != Policy::Public {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<Mapping> = sqlx::query_as(
            r#"
            SELECT id, media_kind, media_id, external_site, external_id,
                   created_at
            FROM mappings
            WHERE media_kind = $1 AND media_id = ANY($2)
            ORDER BY media_id, external_site
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

/// Fetcher for user reactions to a media
#[derive(Clone)]
pub struct ReactionsFetcher {
    pool: PgPool,
}

impl ReactionsFetcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RelationFetcher for ReactionsFetcher {
    type Key = MediaRef;
    type Entity = MediaReaction;

    const RELATION: &'static str = "reactions";

    async fn fetch_related(
        &self,
        policy: Policy,
        group: &MediaKind,
        keys: &[MediaRef],
    ) -> FetchResult<MediaRef, MediaReaction> {
        if policy != Policy::Public {
            return Err(LoadError::PolicyDenied(Self::RELATION));
        }

        let rows: Vec<MediaReaction> = sqlx::query_as(
            r#"
            SELECT id, media_kind, media_id, user_id, reaction,
                   up_votes_count, progress, created_at
            FROM media_reactions
            WHERE media_kind = $1 AND media_id = ANY($2)
            ORDER BY media_id, up_votes_count DESC, id
            "#,
        )
        .bind(group)
        .bind(parent_ids(keys))
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_error)?;

        Ok(partition(*group, rows, |row| row.media_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quote(media_id: i64, id: i64) -> Quote {
        Quote {
            id,
            media_kind: MediaKind::Anime,
            media_id,
            content: "whatever happens, happens".to_string(),
            character_id: None,
            likes_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partition_groups_rows_by_parent() {
        let rows = vec![quote(1, 10), quote(2, 20), quote(1, 11)];
        let result = partition(MediaKind::Anime, rows, |q| q.media_id);

        let one = &result[&MediaRef {
            kind: MediaKind::Anime,
            id: 1,
        }];
        assert_eq!(one.iter().map(|q| q.id).collect::<Vec<_>>(), vec![10, 11]);

        let two = &result[&MediaRef {
            kind: MediaKind::Anime,
            id: 2,
        }];
        assert_eq!(two.len(), 1);
    }

    #[test]
    fn test_parent_ids_preserve_order() {
        let keys = [
            MediaRef {
                kind: MediaKind::Anime,
                id: 3,
            },
            MediaRef {
                kind: MediaKind::Anime,
                id: 1,
            },
        ];
        assert_eq!(parent_ids(&keys), vec![3, 1]);
    }
}
