//! GraphQL type definitions for Kurabu
//!
//! This module contains the GraphQL object types that are exposed through
//! the API: the polymorphic Media interface with its Anime and Manga
//! variants, and the types reachable through their relations.

mod cast;
mod enums;
mod extras;
mod image;
mod media;
mod titles;

pub use cast::{Character, MediaCharacter, MediaProduction, MediaStaff, Person, Producer};
pub use enums::{AgeRating, CharacterRole, ProductionRole, ReleaseSeason, ReleaseStatus};
pub use extras::{Category, Mapping, MediaReaction, Quote};
pub use image::{Image, ImageView, NamedImageView};
pub use media::{Anime, Manga, Media};
pub use titles::{LocalizedMap, TitlesList};
