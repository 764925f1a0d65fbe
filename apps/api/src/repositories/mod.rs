//! Database repository layer for Kurabu
//!
//! This module provides the data access layer, centralizing all database
//! operations into reusable repositories. This pattern:
//! - Reduces code duplication across resolvers and middleware
//! - Provides a single source of truth for database queries
//! - Keeps SQL queries consistent across the codebase

pub mod media;
pub mod token;
pub mod user;
pub mod utils;

pub use media::MediaRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
