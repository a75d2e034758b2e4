//! Repository for the `service_levels` lookup table.

use sqlx::PgPool;

use crate::models::service_level::ServiceLevel;

/// Read-only access to the seeded service levels.
pub struct ServiceLevelRepo;

impl ServiceLevelRepo {
    /// List all service levels ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<ServiceLevel>, sqlx::Error> {
        sqlx::query_as::<_, ServiceLevel>(
            "SELECT code, name FROM service_levels ORDER BY code",
        )
        .fetch_all(pool)
        .await
    }

    /// List just the known service level codes.
    pub async fn list_codes(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT code FROM service_levels ORDER BY code")
            .fetch_all(pool)
            .await
    }
}
