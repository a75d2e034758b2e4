//! Rule compatibility and specificity scoring. Pure logic.
//!
//! A rule is compatible with a query when every concrete field equals the
//! query's value (case-insensitively) and every other field is a wildcard.
//! Compatible rules get a specificity score: the sum of the weights of their
//! concrete fields.

use crate::eligibility::normalize::{postal_key, text_key};
use crate::eligibility::rule::{EligibilityRule, Location, RouteScope, ShipmentQuery};
use crate::scope::Scope;

/// Weight of a concrete customer that matches the query.
pub const CUSTOMER_WEIGHT: u32 = 4;

/// Weight of a concrete service code that matches the query.
pub const SERVICE_WEIGHT: u32 = 2;

/// Weight of each concrete state, city or postal field (per side).
pub const GEOGRAPHY_WEIGHT: u32 = 1;

/// Highest possible score: customer + service + three fields on each side.
pub const MAX_SPECIFICITY: u32 = CUSTOMER_WEIGHT + SERVICE_WEIGHT + 6 * GEOGRAPHY_WEIGHT;

/// Score `rule` against `query`, or `None` if the rule is not compatible.
pub fn specificity(rule: &EligibilityRule, query: &ShipmentQuery) -> Option<u32> {
    if rule.carrier_id != query.carrier_id || rule.company_id != query.company_id {
        return None;
    }

    let customer = scope_score(
        &rule.customer_id,
        query.customer_id.as_ref(),
        |r, q| r == q,
        CUSTOMER_WEIGHT,
    )?;
    let service = scope_score(
        &rule.service_code,
        present(query.service_code.as_deref()),
        text_eq,
        SERVICE_WEIGHT,
    )?;
    let origin = side_score(rule.origin(), &query.origin)?;
    let destination = side_score(rule.destination(), &query.destination)?;

    Some(customer + service + origin + destination)
}

/// Whether `rule` applies to `query` at all.
pub fn is_compatible(rule: &EligibilityRule, query: &ShipmentQuery) -> bool {
    specificity(rule, query).is_some()
}

/// Iterate over the compatible rules together with their scores.
pub fn compatible_rules<'a>(
    rules: &'a [EligibilityRule],
    query: &'a ShipmentQuery,
) -> impl Iterator<Item = (&'a EligibilityRule, u32)> + 'a {
    rules
        .iter()
        .filter_map(move |rule| specificity(rule, query).map(|score| (rule, score)))
}

fn side_score(rule: RouteScope<'_>, location: &Location) -> Option<u32> {
    // Countries are never wildcards.
    if text_key(rule.country) != text_key(&location.country) {
        return None;
    }
    let state = scope_score(
        rule.state,
        present(location.state.as_deref()),
        text_eq,
        GEOGRAPHY_WEIGHT,
    )?;
    let city = scope_score(
        rule.city,
        present(location.city.as_deref()),
        text_eq,
        GEOGRAPHY_WEIGHT,
    )?;
    let postal = scope_score(
        rule.zip_postal,
        present(location.zip_postal.as_deref()),
        postal_eq,
        GEOGRAPHY_WEIGHT,
    )?;
    Some(state + city + postal)
}

/// Wildcards score zero; a concrete field scores `weight` if it equals the
/// query value and disqualifies the rule otherwise (including when the query
/// leaves the field unset).
fn scope_score<T, Q: ?Sized>(
    scope: &Scope<T>,
    value: Option<&Q>,
    eq: impl Fn(&T, &Q) -> bool,
    weight: u32,
) -> Option<u32> {
    match (scope, value) {
        (Scope::Any, _) => Some(0),
        (Scope::Exact(expected), Some(actual)) if eq(expected, actual) => Some(weight),
        _ => None,
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_eq(a: &String, b: &str) -> bool {
    text_key(a) == text_key(b)
}

fn postal_eq(a: &String, b: &str) -> bool {
    postal_key(a) == postal_key(b)
}
