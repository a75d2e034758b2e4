//! Carrier eligibility rule models.
//!
//! Rows store wildcards as `NULL`; conversion into the core
//! [`EligibilityRule`] turns them back into [`Scope::Any`]. Display names
//! are never stored on the rule, they are joined in at read time and exposed
//! on [`EligibilityRuleView`].

use freight_core::eligibility::EligibilityRule;
use freight_core::scope::Scope;
use freight_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `carrier_eligibility_rules` table.
#[derive(Debug, Clone, FromRow)]
pub struct EligibilityRuleRow {
    pub id: DbId,
    pub carrier_id: DbId,
    pub company_id: DbId,
    pub customer_id: Option<DbId>,
    pub service_code: Option<String>,
    pub from_country: String,
    pub from_state: Option<String>,
    pub from_city: Option<String>,
    pub from_zip_postal: Option<String>,
    pub to_country: String,
    pub to_state: Option<String>,
    pub to_city: Option<String>,
    pub to_zip_postal: Option<String>,
    pub exclude: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EligibilityRuleRow> for EligibilityRule {
    fn from(row: EligibilityRuleRow) -> Self {
        Self {
            id: row.id,
            carrier_id: row.carrier_id,
            company_id: row.company_id,
            customer_id: Scope::from_option(row.customer_id),
            service_code: Scope::from_option(row.service_code),
            from_country: row.from_country,
            from_state: Scope::from_option(row.from_state),
            from_city: Scope::from_option(row.from_city),
            from_zip_postal: Scope::from_option(row.from_zip_postal),
            to_country: row.to_country,
            to_state: Scope::from_option(row.to_state),
            to_city: Scope::from_option(row.to_city),
            to_zip_postal: Scope::from_option(row.to_zip_postal),
            exclude: row.exclude,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A rule row joined with the display names of what it references.
#[derive(Debug, Clone, FromRow)]
pub struct EligibilityRuleViewRow {
    #[sqlx(flatten)]
    pub rule: EligibilityRuleRow,
    pub carrier_name: String,
    pub company_name: String,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
}

/// Read-side shape of a rule: the rule fields plus denormalized names.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityRuleView {
    #[serde(flatten)]
    pub rule: EligibilityRule,
    pub carrier_name: String,
    pub company_name: String,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
}

impl From<EligibilityRuleViewRow> for EligibilityRuleView {
    fn from(row: EligibilityRuleViewRow) -> Self {
        Self {
            rule: row.rule.into(),
            carrier_name: row.carrier_name,
            company_name: row.company_name,
            customer_name: row.customer_name,
            service_name: row.service_name,
        }
    }
}

/// One page of a carrier's rules plus the total matching the filter.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityRulePage {
    pub rules: Vec<EligibilityRuleView>,
    pub total_count: i64,
}
