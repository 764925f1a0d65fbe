//! Media query resolvers

use async_graphql::{Context, Object, Result, ID};

use crate::graphql::pagination::{clamp_limit, clamp_offset, MAX_LIMIT};
use crate::graphql::types::{Anime, Manga, Media};
use crate::models::MediaKind;
use crate::repositories::MediaRepository;

/// Top-level queries over the media catalog
#[derive(Default)]
pub struct MediaQuery;

#[Object]
impl MediaQuery {
    /// Find a single media by id
    async fn media(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Media>> {
        let repo = ctx.data::<MediaRepository>()?;
        let id: i64 = id
            .parse()
            .map_err(|_| async_graphql::Error::new("id must be numeric"))?;
        let record = repo.find(id).await?;
        Ok(record.map(Media::from))
    }

    /// Find a single media by slug
    async fn media_by_slug(&self, ctx: &Context<'_>, slug: String) -> Result<Option<Media>> {
        let repo = ctx.data::<MediaRepository>()?;
        let record = repo.find_by_slug(&slug).await?;
        Ok(record.map(Media::from))
    }

    /// List anime, most popular first
    async fn anime(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<Anime>> {
        let repo = ctx.data::<MediaRepository>()?;
        let limit = clamp_limit(limit, MAX_LIMIT) as i64;
        let offset = clamp_offset(offset) as i64;
        let records = repo.list(MediaKind::Anime, limit, offset).await?;
        Ok(records.into_iter().map(Anime::from).collect())
    }

    /// List manga, most popular first
    async fn manga(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<Manga>> {
        let repo = ctx.data::<MediaRepository>()?;
        let limit = clamp_limit(limit, MAX_LIMIT) as i64;
        let offset = clamp_offset(offset) as i64;
        let records = repo.list(MediaKind::Manga, limit, offset).await?;
        Ok(records.into_iter().map(Manga::from).collect())
    }
}
