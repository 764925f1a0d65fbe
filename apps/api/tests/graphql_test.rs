//! Integration tests for the GraphQL schema surface
//!
//! Schema construction and request plumbing are testable without a
//! database; queries that reach the repositories are covered by the
//! loader and repository unit tests.

mod common;

use kurabu_api::build_schema;
use kurabu_api::MediaLoaders;

#[tokio::test]
async fn test_schema_answers_typename_without_database() {
    let schema = build_schema(common::lazy_pool());

    let response = schema.execute("{ __typename }").await;
    assert!(response.errors.is_empty());
    assert_eq!(response.data.to_string(), r#"{__typename: "Query"}"#);
}

#[tokio::test]
async fn test_media_query_surfaces_database_failure_as_error() {
    let schema = build_schema(common::lazy_pool());

    let request =
        async_graphql::Request::new(r#"{ mediaBySlug(slug: "cowboy-bebop") { slug } }"#)
            .data(MediaLoaders::new(common::lazy_pool()));
    let response = schema.execute(request).await;

    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn test_sdl_exposes_catalog_operations() {
    let schema = build_schema(common::lazy_pool());
    let sdl = schema.sdl();

    assert!(sdl.contains("interface Media"));
    assert!(sdl.contains("type Anime implements Media"));
    assert!(sdl.contains("type Manga implements Media"));
    assert!(sdl.contains("mediaBySlug"));
    assert!(sdl.contains("changePassword"));

    // The discriminator field is named `type`, as clients expect
    assert!(sdl.contains("type: String!"));
    assert!(!sdl.contains("mediaType"));
}
