//! GraphQL schema and resolvers for Kurabu
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for the media catalog
//! - Mutation resolvers for account management
//! - The batched association loaders behind relation fields
//! - Type definitions for all GraphQL objects

pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::MediaLoaders;
pub use schema::{build_schema, KurabuSchema, SchemaBuilder};
