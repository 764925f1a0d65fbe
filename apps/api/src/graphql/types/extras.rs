//! Quote, category, mapping, and reaction GraphQL types

use async_graphql::{Object, ID};
use chrono::{DateTime, Utc};

use crate::models;

/// A quote from a media
pub struct Quote {
    inner: models::Quote,
}

impl From<models::Quote> for Quote {
    fn from(quote: models::Quote) -> Self {
        Self { inner: quote }
    }
}

#[Object]
impl Quote {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// The quote text
    async fn content(&self) -> &str {
        &self.inner.content
    }

    /// Character the quote is attributed to, if any
    async fn character_id(&self) -> Option<ID> {
        self.inner.character_id.map(|id| ID(id.to_string()))
    }

    /// Number of users who liked the quote
    async fn likes_count(&self) -> i32 {
        self.inner.likes_count
    }
}

/// A category tagged on a media
pub struct Category {
    inner: models::CategoryEdge,
}

impl From<models::CategoryEdge> for Category {
    fn from(edge: models::CategoryEdge) -> Self {
        Self { inner: edge }
    }
}

#[Object]
impl Category {
    async fn id(&self) -> ID {
        ID(self.inner.category_id.to_string())
    }

    /// The category title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// The URL-friendly identifier of this category
    async fn slug(&self) -> &str {
        &self.inner.slug
    }

    /// Whether the category itself is not Safe-for-Work
    async fn nsfw(&self) -> bool {
        self.inner.nsfw
    }
}

/// A link from a media to its record on an external site
pub struct Mapping {
    inner: models::Mapping,
}

impl From<models::Mapping> for Mapping {
    fn from(mapping: models::Mapping) -> Self {
        Self { inner: mapping }
    }
}

#[Object]
impl Mapping {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// The external site name
    async fn external_site(&self) -> &str {
        &self.inner.external_site
    }

    /// The identifier of the media on the external site
    async fn external_id(&self) -> &str {
        &self.inner.external_id
    }
}

/// A short user reaction to a media
pub struct MediaReaction {
    inner: models::MediaReaction,
}

impl From<models::MediaReaction> for MediaReaction {
    fn from(reaction: models::MediaReaction) -> Self {
        Self { inner: reaction }
    }
}

#[Object]
impl MediaReaction {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// The author of the reaction
    async fn user_id(&self) -> ID {
        ID(self.inner.user_id.to_string())
    }

    /// The reaction text
    async fn reaction(&self) -> &str {
        &self.inner.reaction
    }

    /// Number of up votes
    async fn up_votes_count(&self) -> i32 {
        self.inner.up_votes_count
    }

    /// Library progress of the author when reacting
    async fn progress(&self) -> Option<i32> {
        self.inner.progress
    }

    /// When the reaction was posted
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }
}
