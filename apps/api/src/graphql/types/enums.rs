//! GraphQL enum types for the media catalog
//!
//! These mirror the database enums in `models`, with From conversions so
//! resolvers can hand out rows directly.

use async_graphql::Enum;

use crate::models;

/// The recommended minimum age group for a media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum AgeRating {
    /// General audiences
    G,
    /// Parental guidance suggested
    Pg,
    /// Restricted
    R,
    /// Adults only
    R18,
}

impl From<models::AgeRating> for AgeRating {
    fn from(rating: models::AgeRating) -> Self {
        match rating {
            models::AgeRating::G => Self::G,
            models::AgeRating::Pg => Self::Pg,
            models::AgeRating::R => Self::R,
            models::AgeRating::R18 => Self::R18,
        }
    }
}

/// The current releasing status of a media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ReleaseStatus {
    Tba,
    Unreleased,
    Upcoming,
    Current,
    Finished,
}

impl From<models::ReleaseStatus> for ReleaseStatus {
    fn from(status: models::ReleaseStatus) -> Self {
        match status {
            models::ReleaseStatus::Tba => Self::Tba,
            models::ReleaseStatus::Unreleased => Self::Unreleased,
            models::ReleaseStatus::Upcoming => Self::Upcoming,
            models::ReleaseStatus::Current => Self::Current,
            models::ReleaseStatus::Finished => Self::Finished,
        }
    }
}

/// The season a media premiered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ReleaseSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl From<models::ReleaseSeason> for ReleaseSeason {
    fn from(season: models::ReleaseSeason) -> Self {
        match season {
            models::ReleaseSeason::Winter => Self::Winter,
            models::ReleaseSeason::Spring => Self::Spring,
            models::ReleaseSeason::Summer => Self::Summer,
            models::ReleaseSeason::Fall => Self::Fall,
        }
    }
}

/// The prominence of a character within a media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum CharacterRole {
    Main,
    Supporting,
    Recurring,
    Cameo,
}

impl From<models::CharacterRole> for CharacterRole {
    fn from(role: models::CharacterRole) -> Self {
        match role {
            models::CharacterRole::Main => Self::Main,
            models::CharacterRole::Supporting => Self::Supporting,
            models::CharacterRole::Recurring => Self::Recurring,
            models::CharacterRole::Cameo => Self::Cameo,
        }
    }
}

/// How a company was involved in producing a media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ProductionRole {
    Producer,
    Licensor,
    Studio,
    Serialization,
}

impl From<models::ProductionRole> for ProductionRole {
    fn from(role: models::ProductionRole) -> Self {
        match role {
            models::ProductionRole::Producer => Self::Producer,
            models::ProductionRole::Licensor => Self::Licensor,
            models::ProductionRole::Studio => Self::Studio,
            models::ProductionRole::Serialization => Self::Serialization,
        }
    }
}
