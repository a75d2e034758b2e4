//! Repository for the `carrier_eligibility_rules` table.

use freight_core::eligibility::normalize::NormalizedRule;
use freight_core::eligibility::EligibilityRule;
use freight_core::search::{PageRequest, RuleFilter};
use freight_core::types::DbId;
use sqlx::PgPool;

use crate::models::eligibility_rule::{
    EligibilityRulePage, EligibilityRuleRow, EligibilityRuleView, EligibilityRuleViewRow,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for plain rule SELECTs.
const COLUMNS: &str = "\
    id, carrier_id, company_id, customer_id, service_code, \
    from_country, from_state, from_city, from_zip_postal, \
    to_country, to_state, to_city, to_zip_postal, \
    exclude, created_at, updated_at";

/// Column list for INSERT (excludes `id` and timestamps).
const INSERT_COLUMNS: &str = "\
    carrier_id, company_id, customer_id, service_code, \
    from_country, from_state, from_city, from_zip_postal, \
    to_country, to_state, to_city, to_zip_postal, exclude";

/// Column list for view SELECTs; rule columns are qualified with `r`.
const VIEW_COLUMNS: &str = "\
    r.id, r.carrier_id, r.company_id, r.customer_id, r.service_code, \
    r.from_country, r.from_state, r.from_city, r.from_zip_postal, \
    r.to_country, r.to_state, r.to_city, r.to_zip_postal, \
    r.exclude, r.created_at, r.updated_at, \
    ca.name AS carrier_name, co.name AS company_name, \
    cu.name AS customer_name, sl.name AS service_name";

/// Joins that resolve display names for a rule relation aliased `r`.
const VIEW_JOINS: &str = "\
    JOIN carriers ca ON ca.id = r.carrier_id \
    JOIN companies co ON co.id = r.company_id \
    LEFT JOIN customers cu ON cu.id = r.customer_id \
    LEFT JOIN service_levels sl ON sl.code = r.service_code";

/// Isolation for listings whose page and total must agree.
const SNAPSHOT_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Route fields covered by the free-text search.
const SEARCH_FIELDS: &[&str] = &[
    "r.from_country",
    "r.from_state",
    "r.from_city",
    "r.from_zip_postal",
    "r.to_country",
    "r.to_state",
    "r.to_city",
    "r.to_zip_postal",
    "r.service_code",
];

fn view_select(source: &str) -> String {
    format!("SELECT {VIEW_COLUMNS} FROM {source} {VIEW_JOINS}")
}

// ---------------------------------------------------------------------------
// EligibilityRuleRepo
// ---------------------------------------------------------------------------

/// Provides CRUD and match-time queries for carrier eligibility rules.
pub struct EligibilityRuleRepo;

impl EligibilityRuleRepo {
    /// Insert a new rule and return it with display names resolved.
    pub async fn create(
        pool: &PgPool,
        input: &NormalizedRule,
    ) -> Result<EligibilityRuleView, sqlx::Error> {
        let query = format!(
            "WITH saved AS (
                INSERT INTO carrier_eligibility_rules ({INSERT_COLUMNS})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING *
             )
             {}",
            view_select("saved r")
        );
        sqlx::query_as::<_, EligibilityRuleViewRow>(&query)
            .bind(input.carrier_id)
            .bind(input.company_id)
            .bind(input.customer_id.as_exact().copied())
            .bind(input.service_code.as_exact().map(String::as_str))
            .bind(&input.from_country)
            .bind(input.from_state.as_exact().map(String::as_str))
            .bind(input.from_city.as_exact().map(String::as_str))
            .bind(input.from_zip_postal.as_exact().map(String::as_str))
            .bind(&input.to_country)
            .bind(input.to_state.as_exact().map(String::as_str))
            .bind(input.to_city.as_exact().map(String::as_str))
            .bind(input.to_zip_postal.as_exact().map(String::as_str))
            .bind(input.exclude)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    /// Find a rule by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EligibilityRuleView>, sqlx::Error> {
        let query = format!(
            "{} WHERE r.id = $1",
            view_select("carrier_eligibility_rules r")
        );
        sqlx::query_as::<_, EligibilityRuleViewRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Replace every mutable field of a rule. `carrier_id` is never changed.
    ///
    /// Returns `None` if no rule with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NormalizedRule,
    ) -> Result<Option<EligibilityRuleView>, sqlx::Error> {
        let query = format!(
            "WITH saved AS (
                UPDATE carrier_eligibility_rules SET
                    company_id = $2,
                    customer_id = $3,
                    service_code = $4,
                    from_country = $5,
                    from_state = $6,
                    from_city = $7,
                    from_zip_postal = $8,
                    to_country = $9,
                    to_state = $10,
                    to_city = $11,
                    to_zip_postal = $12,
                    exclude = $13,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             {}",
            view_select("saved r")
        );
        sqlx::query_as::<_, EligibilityRuleViewRow>(&query)
            .bind(id)
            .bind(input.company_id)
            .bind(input.customer_id.as_exact().copied())
            .bind(input.service_code.as_exact().map(String::as_str))
            .bind(&input.from_country)
            .bind(input.from_state.as_exact().map(String::as_str))
            .bind(input.from_city.as_exact().map(String::as_str))
            .bind(input.from_zip_postal.as_exact().map(String::as_str))
            .bind(&input.to_country)
            .bind(input.to_state.as_exact().map(String::as_str))
            .bind(input.to_city.as_exact().map(String::as_str))
            .bind(input.to_zip_postal.as_exact().map(String::as_str))
            .bind(input.exclude)
            .fetch_optional(pool)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Delete a rule. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carrier_eligibility_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one page of a carrier's rules, newest first, with the total
    /// number of rules matching the same filter.
    ///
    /// Both queries run in one read-only `REPEATABLE READ` transaction so the
    /// page and the count come from the same snapshot.
    pub async fn list(
        pool: &PgPool,
        carrier_id: DbId,
        filter: &RuleFilter,
        page: PageRequest,
    ) -> Result<EligibilityRulePage, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_rule_filter(carrier_id, filter);

        let mut tx = pool.begin().await?;
        sqlx::query(SNAPSHOT_ISOLATION).execute(&mut *tx).await?;

        let query = format!(
            "{} {where_clause} \
             ORDER BY r.updated_at DESC, r.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            view_select("carrier_eligibility_rules r"),
            bind_idx + 1
        );
        let rows = bind_rule_values(
            sqlx::query_as::<_, EligibilityRuleViewRow>(&query),
            &bind_values,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        let count_query = format!(
            "SELECT COUNT(*)::BIGINT FROM carrier_eligibility_rules r {where_clause}"
        );
        let total_count = bind_rule_values_scalar(
            sqlx::query_scalar::<_, i64>(&count_query),
            &bind_values,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(EligibilityRulePage {
            rules: rows.into_iter().map(Into::into).collect(),
            total_count,
        })
    }

    /// Load every rule of `carrier_id` scoped to `company_id`, ready for the
    /// matcher.
    pub async fn list_for_match(
        pool: &PgPool,
        carrier_id: DbId,
        company_id: DbId,
    ) -> Result<Vec<EligibilityRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carrier_eligibility_rules \
             WHERE carrier_id = $1 AND company_id = $2 \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, EligibilityRuleRow>(&query)
            .bind(carrier_id)
            .bind(company_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// A typed bind value for dynamically built queries.
#[derive(Debug, Clone)]
enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
}

/// Build the WHERE clause for a rule listing.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_rule_filter(carrier_id: DbId, filter: &RuleFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["r.carrier_id = $1".to_string()];
    let mut bind_idx = 2u32;
    let mut bind_values: Vec<BindValue> = vec![BindValue::BigInt(carrier_id)];

    if let Some(customer_id) = filter.customer_id {
        conditions.push(format!("r.customer_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(customer_id));
    }

    if let Some(company_id) = filter.company_id {
        conditions.push(format!("r.company_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(company_id));
    }

    if let Some(ref service_code) = filter.service_code {
        conditions.push(format!("r.service_code = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(service_code.clone()));
    }

    if let Some(exclude) = filter.status.exclude_value() {
        conditions.push(format!("r.exclude = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(exclude));
    }

    if let Some(ref term) = filter.search_term {
        let ors: Vec<String> = SEARCH_FIELDS
            .iter()
            .map(|field| format!("{field} ILIKE ${bind_idx}"))
            .collect();
        conditions.push(format!("({})", ors.join(" OR ")));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{}%", escape_like(term))));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Escape LIKE metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_rule_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_rule_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}
