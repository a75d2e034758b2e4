use serde::Serialize;
use sqlx::FromRow;

/// A row from the `service_levels` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceLevel {
    pub code: String,
    pub name: String,
}
