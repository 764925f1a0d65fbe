//! Cast and crew GraphQL types
//!
//! Edge types for the characters, staff, and production relations. Each
//! wraps the joined row the relation fetcher produced; the nested entity
//! objects are built from the joined columns without further queries.

use async_graphql::{Object, ID};

use crate::models::{CharacterEdge, ProductionEdge, StaffEdge};

use super::enums::{CharacterRole, ProductionRole};

/// A character in the catalog
pub struct Character {
    id: i64,
    name: String,
    slug: String,
    image_url: Option<String>,
}

#[Object]
impl Character {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The character's name
    async fn name(&self) -> &str {
        &self.name
    }

    /// The URL-friendly identifier of this character
    async fn slug(&self) -> &str {
        &self.slug
    }

    /// Portrait image URL
    async fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// A character who starred in a media
pub struct MediaCharacter {
    inner: CharacterEdge,
}

impl From<CharacterEdge> for MediaCharacter {
    fn from(edge: CharacterEdge) -> Self {
        Self { inner: edge }
    }
}

#[Object]
impl MediaCharacter {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// The role this character played in the media
    async fn role(&self) -> CharacterRole {
        self.inner.role.into()
    }

    /// The character
    async fn character(&self) -> Character {
        Character {
            id: self.inner.character_id,
            name: self.inner.character_name.clone(),
            slug: self.inner.character_slug.clone(),
            image_url: self.inner.character_image_url.clone(),
        }
    }
}

/// A person in the catalog
pub struct Person {
    id: i64,
    name: String,
    image_url: Option<String>,
}

#[Object]
impl Person {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The person's name
    async fn name(&self) -> &str {
        &self.name
    }

    /// Portrait image URL
    async fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// A staff member who worked on a media
pub struct MediaStaff {
    inner: StaffEdge,
}

impl From<StaffEdge> for MediaStaff {
    fn from(edge: StaffEdge) -> Self {
        Self { inner: edge }
    }
}

#[Object]
impl MediaStaff {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// The role this person filled (e.g. "Director")
    async fn role(&self) -> &str {
        &self.inner.role
    }

    /// The person
    async fn person(&self) -> Person {
        Person {
            id: self.inner.person_id,
            name: self.inner.person_name.clone(),
            image_url: self.inner.person_image_url.clone(),
        }
    }
}

/// A company in the catalog
pub struct Producer {
    id: i64,
    name: String,
}

#[Object]
impl Producer {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// The company's name
    async fn name(&self) -> &str {
        &self.name
    }
}

/// A company which helped to produce a media
pub struct MediaProduction {
    inner: ProductionEdge,
}

impl From<ProductionEdge> for MediaProduction {
    fn from(edge: ProductionEdge) -> Self {
        Self { inner: edge }
    }
}

#[Object]
impl MediaProduction {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_string())
    }

    /// How the company was involved
    async fn role(&self) -> ProductionRole {
        self.inner.role.into()
    }

    /// The company
    async fn company(&self) -> Producer {
        Producer {
            id: self.inner.company_id,
            name: self.inner.company_name.clone(),
        }
    }
}
