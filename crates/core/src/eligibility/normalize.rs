//! Write-side validation and normalization of eligibility rules.
//!
//! Every create/update passes through [`normalize_rule`] before reaching the
//! store, so stored rules always satisfy the data-model invariants: concrete
//! countries, wildcard defaults for absent scopes, canonical casing.

use serde::Deserialize;

use crate::error::CoreError;
use crate::eligibility::rule::{Location, ShipmentQuery};
use crate::scope::Scope;
use crate::types::DbId;

/// Maximum length of a state/province code.
pub const MAX_STATE_LEN: u64 = 10;

/// Maximum length of a service level code.
pub const MAX_SERVICE_CODE_LEN: u64 = 50;

/// Maximum length of a city name.
pub const MAX_CITY_LEN: u64 = 100;

/// Maximum length of a postal code, whitespace excluded.
pub const MAX_POSTAL_LEN: u64 = 20;

/// Comparison key for codes and names: trimmed and uppercased.
pub fn text_key(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Comparison key for postal codes: uppercased with all whitespace removed.
pub fn postal_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Rule payload accepted by the CRUD gateway for create and full update.
///
/// Scoping fields default to wildcards when absent, and accept the same
/// wildcard spellings a stored rule serializes to, so a rule read back from
/// the API can be sent unchanged as an update. Display-only fields a client
/// may send alongside (carrier or customer names) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleInput {
    #[serde(default)]
    pub carrier_id: Option<DbId>,
    #[serde(default)]
    pub company_id: Option<DbId>,
    #[serde(default)]
    pub customer_id: Scope<DbId>,
    #[serde(default)]
    pub service_code: Scope<String>,
    #[serde(default)]
    pub from_country: Option<String>,
    #[serde(default)]
    pub from_state: Scope<String>,
    #[serde(default)]
    pub from_city: Scope<String>,
    #[serde(default)]
    pub from_zip_postal: Scope<String>,
    #[serde(default)]
    pub to_country: Option<String>,
    #[serde(default)]
    pub to_state: Scope<String>,
    #[serde(default)]
    pub to_city: Scope<String>,
    #[serde(default)]
    pub to_zip_postal: Scope<String>,
    #[serde(default)]
    pub exclude: bool,
}

/// A validated, canonical rule ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRule {
    pub carrier_id: DbId,
    pub company_id: DbId,
    pub customer_id: Scope<DbId>,
    pub service_code: Scope<String>,
    pub from_country: String,
    pub from_state: Scope<String>,
    pub from_city: Scope<String>,
    pub from_zip_postal: Scope<String>,
    pub to_country: String,
    pub to_state: Scope<String>,
    pub to_city: Scope<String>,
    pub to_zip_postal: Scope<String>,
    pub exclude: bool,
}

/// Validate required fields and length limits, then canonicalize.
pub fn normalize_rule(input: &RuleInput) -> Result<NormalizedRule, CoreError> {
    let carrier_id = input
        .carrier_id
        .ok_or_else(|| missing("carrier_id"))?;
    let company_id = input
        .company_id
        .ok_or_else(|| missing("company_id"))?;
    let from_country = required_text(input.from_country.as_deref(), "from_country")?;
    let to_country = required_text(input.to_country.as_deref(), "to_country")?;

    let service_code = code_scope(&input.service_code, "service_code", MAX_SERVICE_CODE_LEN)?;
    let from_state = code_scope(&input.from_state, "from_state", MAX_STATE_LEN)?;
    let from_city = city_scope(&input.from_city, "from_city")?;
    let from_zip_postal = postal_scope(&input.from_zip_postal, "from_zip_postal")?;
    let to_state = code_scope(&input.to_state, "to_state", MAX_STATE_LEN)?;
    let to_city = city_scope(&input.to_city, "to_city")?;
    let to_zip_postal = postal_scope(&input.to_zip_postal, "to_zip_postal")?;

    Ok(NormalizedRule {
        carrier_id,
        company_id,
        customer_id: input.customer_id.clone(),
        service_code,
        from_country: text_key(&from_country),
        from_state,
        from_city,
        from_zip_postal,
        to_country: text_key(&to_country),
        to_state,
        to_city,
        to_zip_postal,
        exclude: input.exclude,
    })
}

/// Reject an update that tries to move a rule to another carrier.
pub fn ensure_carrier_unchanged(stored: DbId, requested: Option<DbId>) -> Result<(), CoreError> {
    match requested {
        Some(id) if id != stored => Err(CoreError::Validation(format!(
            "carrier_id is immutable (rule belongs to carrier {stored}, got {id})"
        ))),
        _ => Ok(()),
    }
}

/// A concrete service code must be one the carrier supports, unless the
/// carrier declares no service levels at all.
pub fn ensure_service_supported(
    service_code: &Scope<String>,
    supported: &[String],
) -> Result<(), CoreError> {
    let Some(code) = service_code.as_exact() else {
        return Ok(());
    };
    if supported.is_empty() || supported.iter().any(|s| text_key(s) == *code) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Service '{code}' is not supported by this carrier. Supported: {}",
            supported.join(", ")
        )))
    }
}

/// A concrete customer must belong to the rule's company.
pub fn ensure_customer_in_company(
    customer_id: DbId,
    customer_company_id: DbId,
    company_id: DbId,
) -> Result<(), CoreError> {
    if customer_company_id == company_id {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Customer {customer_id} does not belong to company {company_id}"
        )))
    }
}

/// Validate and canonicalize a shipment query the same way rules are stored.
pub fn normalize_query(query: &ShipmentQuery) -> Result<ShipmentQuery, CoreError> {
    Ok(ShipmentQuery {
        carrier_id: query.carrier_id,
        company_id: query.company_id,
        customer_id: query.customer_id,
        service_code: non_blank(query.service_code.as_deref()).map(text_key),
        origin: normalize_location(&query.origin, "origin")?,
        destination: normalize_location(&query.destination, "destination")?,
    })
}

fn normalize_location(location: &Location, side: &str) -> Result<Location, CoreError> {
    let country = non_blank(Some(location.country.as_str()))
        .ok_or_else(|| CoreError::Validation(format!("{side}.country is required")))?;
    Ok(Location {
        country: text_key(country),
        state: non_blank(location.state.as_deref()).map(text_key),
        city: non_blank(location.city.as_deref()).map(|c| c.trim().to_string()),
        zip_postal: non_blank(location.zip_postal.as_deref()).map(postal_key),
    })
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    let value = non_blank(value).ok_or_else(|| missing(field))?.trim();
    if crate::scope::is_wildcard_sentinel(value) {
        return Err(CoreError::Validation(format!(
            "{field} must be a concrete country code"
        )));
    }
    if !(2..=3).contains(&value.chars().count()) {
        return Err(CoreError::Validation(format!(
            "{field} must be a 2-3 letter country code, got '{value}'"
        )));
    }
    Ok(value.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn code_scope(scope: &Scope<String>, field: &str, max_len: u64) -> Result<Scope<String>, CoreError> {
    canonical_scope(scope, field, max_len, text_key)
}

fn city_scope(scope: &Scope<String>, field: &str) -> Result<Scope<String>, CoreError> {
    canonical_scope(scope, field, MAX_CITY_LEN, |c| c.trim().to_string())
}

fn postal_scope(scope: &Scope<String>, field: &str) -> Result<Scope<String>, CoreError> {
    canonical_scope(scope, field, MAX_POSTAL_LEN, postal_key)
}

/// Canonicalize a concrete value with `key`; a value that is blank once
/// canonical becomes a wildcard.
fn canonical_scope(
    scope: &Scope<String>,
    field: &str,
    max_len: u64,
    key: impl Fn(&str) -> String,
) -> Result<Scope<String>, CoreError> {
    let Some(raw) = scope.as_exact() else {
        return Ok(Scope::Any);
    };
    let value = key(raw.as_str());
    if value.is_empty() {
        return Ok(Scope::Any);
    }
    let len = value.chars().count() as u64;
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max_len})"
        )));
    }
    Ok(Scope::Exact(value))
}
