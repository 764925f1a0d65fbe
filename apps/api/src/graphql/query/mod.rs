//! GraphQL query root

mod media;

use async_graphql::MergedObject;

pub use media::MediaQuery;

/// The merged query root for the Kurabu schema
#[derive(MergedObject, Default)]
pub struct Query(MediaQuery);
