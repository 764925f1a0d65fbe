//! HTTP route handlers for the Kurabu API
//!
//! This module contains the non-GraphQL endpoint handlers:
//! - Admin dashboard endpoints
//! - Health check and status endpoints

pub mod admin;
pub mod health;

pub use admin::{admin_router, AdminState};
pub use health::{health_router, HealthState};
