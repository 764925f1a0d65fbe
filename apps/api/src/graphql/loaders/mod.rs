//! Batched association loading for GraphQL
//!
//! This module provides the batching machinery that solves N+1 query
//! problems in GraphQL relationship resolvers: a generic
//! [`AssociationLoader`] that defers per-parent relation requests until a
//! scheduling boundary and flushes each (parent type, policy) group with a
//! single query, plus one [`RelationFetcher`] per media relation.
//!
//! A fresh [`MediaLoaders`] bundle is created for every GraphQL request and
//! injected into the resolution context; no batch state outlives a request.

pub mod association;
pub mod relations;

pub use association::{AssociationLoader, BatchKey, LoadError, LoadResult, Policy, RelationFetcher};
pub use relations::{
    CategoriesFetcher, CharactersFetcher, MappingsFetcher, ProductionsFetcher, QuotesFetcher,
    ReactionsFetcher, StaffFetcher,
};

use sqlx::PgPool;

use crate::models::{MediaKind, MediaRef};

impl BatchKey for MediaRef {
    type Group = MediaKind;

    fn group(&self) -> MediaKind {
        self.kind
    }
}

/// One loader per media relation, scoped to a single GraphQL request
#[derive(Clone)]
pub struct MediaLoaders {
    pub characters: AssociationLoader<CharactersFetcher>,
    pub staff: AssociationLoader<StaffFetcher>,
    pub productions: AssociationLoader<ProductionsFetcher>,
    pub quotes: AssociationLoader<QuotesFetcher>,
    pub categories: AssociationLoader<CategoriesFetcher>,
    pub mappings: AssociationLoader<MappingsFetcher>,
    pub reactions: AssociationLoader<ReactionsFetcher>,
}

impl MediaLoaders {
    /// Create the loader bundle for one request
    pub fn new(pool: PgPool) -> Self {
        Self {
            characters: AssociationLoader::new(CharactersFetcher::new(pool.clone())),
            staff: AssociationLoader::new(StaffFetcher::new(pool.clone())),
            productions: AssociationLoader::new(ProductionsFetcher::new(pool.clone())),
            quotes: AssociationLoader::new(QuotesFetcher::new(pool.clone())),
            categories: AssociationLoader::new(CategoriesFetcher::new(pool.clone())),
            mappings: AssociationLoader::new(MappingsFetcher::new(pool.clone())),
            reactions: AssociationLoader::new(ReactionsFetcher::new(pool)),
        }
    }
}
