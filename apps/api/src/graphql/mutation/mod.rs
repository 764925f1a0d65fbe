//! GraphQL mutation root

mod account;

use async_graphql::MergedObject;

pub use account::AccountMutation;

/// The merged mutation root for the Kurabu schema
#[derive(MergedObject, Default)]
pub struct Mutation(AccountMutation);
