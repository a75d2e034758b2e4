//! Repositories for the `companies` and `customers` tables.

use freight_core::types::DbId;
use sqlx::PgPool;

use crate::models::company::{Company, Customer};

/// Column list for `companies` queries.
const COMPANY_COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for `customers` queries.
const CUSTOMER_COLUMNS: &str = "id, company_id, name, created_at, updated_at";

/// Provides create and lookup operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (name) VALUES ($1) RETURNING {COMPANY_COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all companies ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name, id");
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }
}

/// Provides create and lookup operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a customer under `company_id`.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        name: &str,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (company_id, name) VALUES ($1, $2) \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(company_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the customers of one company ordered by name.
    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE company_id = $1 \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}
