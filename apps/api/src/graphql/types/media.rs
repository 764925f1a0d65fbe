//! Media GraphQL types
//!
//! `Media` is the polymorphic interface over the two concrete catalog
//! variants, `Anime` and `Manga`. Both variants share one attribute set
//! (declared on the interface) and one relation set, emitted into each
//! `#[Object]` impl by the `media_object!` macro so the field mapping is
//! written exactly once.
//!
//! Relation fields resolve through the per-request [`MediaLoaders`] bundle:
//! each call enqueues this media's key and awaits the batched fetch.

use std::collections::HashMap;

use async_graphql::{Context, Interface, Json, Object, Result, ID};
use chrono::{DateTime, NaiveDate, Utc};

use crate::graphql::loaders::{MediaLoaders, Policy};
use crate::graphql::pagination::{clamp_limit, clamp_offset, MAX_NESTED_LIMIT};
use crate::models::Media as DbMedia;

use super::cast::{MediaCharacter, MediaProduction, MediaStaff};
use super::enums::{AgeRating, ReleaseSeason, ReleaseStatus};
use super::extras::{Category, Mapping, MediaReaction, Quote};
use super::image::Image;
use super::titles::{LocalizedMap, TitlesList};

/// Apply nested-resolver pagination to a loaded relation
fn page<T>(rows: Vec<T>, limit: Option<i32>, offset: Option<i32>) -> impl Iterator<Item = T> {
    let limit = clamp_limit(limit, MAX_NESTED_LIMIT);
    let offset = clamp_offset(offset);
    rows.into_iter().skip(offset).take(limit)
}

/// A media in the catalog
#[derive(Interface)]
#[graphql(
    field(name = "id", ty = "ID"),
    field(
        name = "slug",
        ty = "String",
        desc = "The URL-friendly identifier of this media"
    ),
    field(name = "type", ty = "String", method = "media_type", desc = "Anime or Manga."),
    field(
        name = "titles",
        ty = "TitlesList",
        desc = "The titles for this media in various locales"
    ),
    field(
        name = "synopsis",
        ty = "Option<LocalizedMap>",
        desc = "A brief (mostly spoiler-free) summary/description of the media"
    ),
    field(
        name = "age_rating",
        ty = "Option<AgeRating>",
        desc = "The recommended minimum age group for this media"
    ),
    field(
        name = "age_rating_guide",
        ty = "Option<String>",
        desc = "An explanation of why this received the age rating it did"
    ),
    field(name = "sfw", ty = "bool", desc = "Whether the media is Safe-for-Work"),
    field(
        name = "start_date",
        ty = "Option<NaiveDate>",
        desc = "The day that this media first released"
    ),
    field(
        name = "end_date",
        ty = "Option<NaiveDate>",
        desc = "The day that this media made its final release"
    ),
    field(
        name = "next_release",
        ty = "Option<DateTime<Utc>>",
        desc = "The time of the next release of this media"
    ),
    field(
        name = "status",
        ty = "ReleaseStatus",
        desc = "The current releasing status of this media"
    ),
    field(
        name = "season",
        ty = "Option<ReleaseSeason>",
        desc = "The season this was released in"
    ),
    field(
        name = "tba",
        ty = "Option<String>",
        desc = "Description of when this media is expected to release"
    ),
    field(
        name = "average_rating",
        ty = "Option<f64>",
        desc = "The average rating of this media amongst all users"
    ),
    field(
        name = "user_count",
        ty = "Option<i32>",
        desc = "The number of users with this in their library"
    ),
    field(
        name = "favorites_count",
        ty = "Option<i32>",
        desc = "The number of users with this in their favorites"
    ),
    field(
        name = "poster_image",
        ty = "Image",
        desc = "The poster image of this media"
    ),
    field(
        name = "banner_image",
        ty = "Image",
        desc = "A large banner image for this media"
    )
)]
pub enum Media {
    Anime(Anime),
    Manga(Manga),
}

impl From<DbMedia> for Media {
    fn from(record: DbMedia) -> Self {
        match record.kind {
            crate::models::MediaKind::Anime => Self::Anime(Anime::from(record)),
            crate::models::MediaKind::Manga => Self::Manga(Manga::from(record)),
        }
    }
}

/// An anime in the catalog
pub struct Anime {
    record: DbMedia,
}

impl From<DbMedia> for Anime {
    fn from(record: DbMedia) -> Self {
        Self { record }
    }
}

/// A manga in the catalog
pub struct Manga {
    record: DbMedia,
}

impl From<DbMedia> for Manga {
    fn from(record: DbMedia) -> Self {
        Self { record }
    }
}

/// Emit the shared media field set into a concrete variant's `#[Object]`
/// impl, plus any variant-specific fields.
macro_rules! media_object {
    ($ty:ident { $($extra:tt)* }) => {
        #[Object]
        impl $ty {
            async fn id(&self) -> ID {
                ID(self.record.id.to_string())
            }

            /// The URL-friendly identifier of this media
            async fn slug(&self) -> String {
                self.record.slug.clone()
            }

            /// Anime or Manga.
            #[graphql(name = "type")]
            async fn media_type(&self) -> String {
                self.record.kind.type_name().to_string()
            }

            /// The titles for this media in various locales
            async fn titles(&self) -> TitlesList {
                TitlesList::from(&self.record)
            }

            /// A brief (mostly spoiler-free) summary/description of the media
            async fn synopsis(&self) -> Option<LocalizedMap> {
                // TODO: store localized synopsis data instead of a bare
                // English column
                self.record
                    .synopsis
                    .as_ref()
                    .map(|text| Json(HashMap::from([("en".to_string(), text.clone())])))
            }

            /// The recommended minimum age group for this media
            async fn age_rating(&self) -> Option<AgeRating> {
                self.record.age_rating.map(Into::into)
            }

            /// An explanation of why this received the age rating it did
            async fn age_rating_guide(&self) -> Option<String> {
                self.record.age_rating_guide.clone()
            }

            /// Whether the media is Safe-for-Work
            async fn sfw(&self) -> bool {
                self.record.sfw()
            }

            /// The day that this media first released
            async fn start_date(&self) -> Option<NaiveDate> {
                self.record.start_date
            }

            /// The day that this media made its final release
            async fn end_date(&self) -> Option<NaiveDate> {
                self.record.end_date
            }

            /// The time of the next release of this media
            async fn next_release(&self) -> Option<DateTime<Utc>> {
                self.record.next_release_at
            }

            /// The current releasing status of this media
            async fn status(&self) -> ReleaseStatus {
                self.record.status.into()
            }

            /// The season this was released in
            async fn season(&self) -> Option<ReleaseSeason> {
                self.record.season().map(Into::into)
            }

            /// Description of when this media is expected to release
            async fn tba(&self) -> Option<String> {
                self.record.tba.clone()
            }

            /// The average rating of this media amongst all users
            async fn average_rating(&self) -> Option<f64> {
                self.record.average_rating
            }

            /// The number of users with this in their library
            async fn user_count(&self) -> Option<i32> {
                self.record.user_count
            }

            /// The number of users with this in their favorites
            async fn favorites_count(&self) -> Option<i32> {
                self.record.favorites_count
            }

            /// The poster image of this media
            async fn poster_image(&self) -> Image {
                self.record.poster_image.clone().into()
            }

            /// A large banner image for this media
            async fn banner_image(&self) -> Image {
                self.record.cover_image.clone().into()
            }

            /// The characters who starred in this media
            async fn characters(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<MediaCharacter>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .characters
                    .load(Policy::Public, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(MediaCharacter::from).collect())
            }

            /// The staff members who worked on this media
            async fn staff(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<MediaStaff>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .staff
                    .load(Policy::MediaStaff, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(MediaStaff::from).collect())
            }

            /// The companies which helped to produce this media
            async fn productions(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<MediaProduction>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .productions
                    .load(Policy::MediaProduction, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(MediaProduction::from).collect())
            }

            /// A list of quotes from this media
            async fn quotes(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<Quote>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .quotes
                    .load(Policy::Public, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(Quote::from).collect())
            }

            /// A list of categories for this media
            async fn categories(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<Category>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .categories
                    .load(Policy::Public, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(Category::from).collect())
            }

            /// A list of mappings for this media
            async fn mappings(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<Mapping>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .mappings
                    .load(Policy::Public, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(Mapping::from).collect())
            }

            /// A list of reactions for this media
            async fn reactions(
                &self,
                ctx: &Context<'_>,
                limit: Option<i32>,
                offset: Option<i32>,
            ) -> Result<Vec<MediaReaction>> {
                let loaders = ctx.data::<MediaLoaders>()?;
                let rows = loaders
                    .reactions
                    .load(Policy::Public, self.record.media_ref())
                    .await?;
                Ok(page(rows, limit, offset).map(MediaReaction::from).collect())
            }

            $($extra)*
        }
    };
}

media_object!(Anime {
    /// The number of episodes in this anime
    async fn episode_count(&self) -> Option<i32> {
        self.record.episode_count
    }

    /// The typical episode length in minutes
    async fn episode_length(&self) -> Option<i32> {
        self.record.episode_length
    }
});

media_object!(Manga {
    /// The number of chapters in this manga
    async fn chapter_count(&self) -> Option<i32> {
        self.record.chapter_count
    }

    /// The number of published volumes
    async fn volume_count(&self) -> Option<i32> {
        self.record.volume_count
    }
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSet, MediaKind};

    fn record(kind: MediaKind) -> DbMedia {
        DbMedia {
            id: 5,
            kind,
            slug: "slug".to_string(),
            titles: HashMap::new(),
            canonical_title_key: "en".to_string(),
            abbreviated_titles: vec![],
            synopsis: None,
            age_rating: None,
            age_rating_guide: None,
            nsfw: false,
            start_date: None,
            end_date: None,
            next_release_at: None,
            status: crate::models::ReleaseStatus::Tba,
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
        }
    }

    #[test]
    fn test_media_enum_dispatches_on_kind() {
        assert!(matches!(
            Media::from(record(MediaKind::Anime)),
            Media::Anime(_)
        ));
        assert!(matches!(
            Media::from(record(MediaKind::Manga)),
            Media::Manga(_)
        ));
    }

    #[test]
    fn test_page_applies_limit_and_offset() {
        let rows: Vec<i32> = (0..10).collect();
        let paged: Vec<i32> = page(rows, Some(3), Some(2)).collect();
        assert_eq!(paged, vec![2, 3, 4]);
    }
}
