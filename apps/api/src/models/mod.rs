//! Database models for Kurabu
//!
//! Each module contains the row types for one catalog entity, mapped from
//! PostgreSQL with sqlx's `FromRow`.

pub mod category;
pub mod character;
pub mod mapping;
pub mod media;
pub mod production;
pub mod quote;
pub mod reaction;
pub mod staff;
pub mod user;

pub use category::CategoryEdge;
pub use character::{CharacterEdge, CharacterRole};
pub use mapping::Mapping;
pub use media::{AgeRating, ImageSet, Media, MediaKind, MediaRef, ReleaseSeason, ReleaseStatus};
pub use production::{ProductionEdge, ProductionRole};
pub use quote::Quote;
pub use reaction::MediaReaction;
pub use staff::StaffEdge;
pub use user::{AccessToken, CurrentUser, User};
