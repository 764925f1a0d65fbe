//! Production credit model for Kurabu

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::media::MediaKind;

/// How a company was involved in producing a media, matching PostgreSQL
/// production_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "production_role", rename_all = "lowercase")]
pub enum ProductionRole {
    Producer,
    Licensor,
    Studio,
    Serialization,
}

/// One production credit for a media, joined with the credited company
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionEdge {
    /// Credit row identifier
    pub id: i64,

    /// Parent media kind
    pub media_kind: MediaKind,

    /// Parent media identifier
    pub media_id: i64,

    /// How the company was involved
    pub role: ProductionRole,

    /// Company identifier
    pub company_id: i64,

    /// Company name
    pub company_name: String,

    /// Creation timestamp of the credit
    pub created_at: DateTime<Utc>,
}
