//! Carrier entity model and DTOs.

use freight_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `carriers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Carrier {
    pub id: DbId,
    pub name: String,
    /// Service level codes this carrier offers. Empty means unrestricted.
    pub supported_service_levels: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new carrier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCarrier {
    pub name: String,
    #[serde(default)]
    pub supported_service_levels: Vec<String>,
}
