//! Repository for the `carriers` table.

use freight_core::types::DbId;
use sqlx::PgPool;

use crate::models::carrier::Carrier;

/// Column list for `carriers` queries.
const COLUMNS: &str = "id, name, supported_service_levels, created_at, updated_at";

/// Provides create and lookup operations for carriers.
pub struct CarrierRepo;

impl CarrierRepo {
    /// Insert a carrier. `name` and `supported_service_levels` are expected
    /// to be normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        supported_service_levels: &[String],
    ) -> Result<Carrier, sqlx::Error> {
        let query = format!(
            "INSERT INTO carriers (name, supported_service_levels) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Carrier>(&query)
            .bind(name)
            .bind(supported_service_levels)
            .fetch_one(pool)
            .await
    }

    /// Find a carrier by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Carrier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM carriers WHERE id = $1");
        sqlx::query_as::<_, Carrier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all carriers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Carrier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM carriers ORDER BY name, id");
        sqlx::query_as::<_, Carrier>(&query).fetch_all(pool).await
    }
}
