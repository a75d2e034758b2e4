//! Handlers for carrier eligibility rule CRUD.
//!
//! Writes are validated and normalized in `freight_core` first, then checked
//! against reference data (carrier, company, customer, service level) before
//! they reach the store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use freight_core::eligibility::normalize::{
    ensure_carrier_unchanged, ensure_customer_in_company, ensure_service_supported,
    normalize_rule, NormalizedRule, RuleInput,
};
use freight_core::error::CoreError;
use freight_core::reference::ensure_known_service_codes;
use freight_core::types::DbId;
use freight_db::repositories::{
    CarrierRepo, CompanyRepo, CustomerRepo, EligibilityRuleRepo, ServiceLevelRepo,
};
use freight_db::retry::retry_read;

use crate::error::{AppError, AppResult};
use crate::query::RuleListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/carriers/{id}/eligibility-rules
///
/// One page of the carrier's rules plus the total matching the filters.
pub async fn list_rules(
    State(state): State<AppState>,
    Path(carrier_id): Path<DbId>,
    Query(params): Query<RuleListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter()?;
    let page = params.page_request();

    retry_read(&state.read_retry, "carrier.find_by_id", || {
        CarrierRepo::find_by_id(&state.pool, carrier_id)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Carrier",
        id: carrier_id,
    }))?;

    let result = retry_read(&state.read_retry, "eligibility_rule.list", || {
        EligibilityRuleRepo::list(&state.pool, carrier_id, &filter, page)
    })
    .await?;

    tracing::debug!(
        carrier_id,
        page = page.page,
        rows_per_page = page.rows_per_page,
        total_count = result.total_count,
        "Listed eligibility rules"
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/carriers/{id}/eligibility-rules
///
/// Create a rule for the carrier in the path. A `carrier_id` in the body, if
/// present, must agree with the path.
pub async fn create_rule(
    State(state): State<AppState>,
    Path(carrier_id): Path<DbId>,
    Json(mut input): Json<RuleInput>,
) -> AppResult<impl IntoResponse> {
    ensure_carrier_unchanged(carrier_id, input.carrier_id)?;
    input.carrier_id = Some(carrier_id);

    let rule = normalize_rule(&input)?;
    check_references(&state, &rule).await?;

    let created = EligibilityRuleRepo::create(&state.pool, &rule).await?;

    tracing::info!(
        rule_id = created.rule.id,
        carrier_id,
        company_id = created.rule.company_id,
        exclude = created.rule.exclude,
        "Eligibility rule created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/eligibility-rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = retry_read(&state.read_retry, "eligibility_rule.find_by_id", || {
        EligibilityRuleRepo::find_by_id(&state.pool, rule_id)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "EligibilityRule",
        id: rule_id,
    }))?;

    Ok(Json(DataResponse { data: rule }))
}

/// PUT /api/v1/eligibility-rules/{id}
///
/// Full-record replace. Omitted scoping fields become wildcards; the rule's
/// carrier cannot be changed.
pub async fn update_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
    Json(mut input): Json<RuleInput>,
) -> AppResult<impl IntoResponse> {
    let existing = EligibilityRuleRepo::find_by_id(&state.pool, rule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "EligibilityRule",
            id: rule_id,
        }))?;

    ensure_carrier_unchanged(existing.rule.carrier_id, input.carrier_id)?;
    input.carrier_id = Some(existing.rule.carrier_id);

    let rule = normalize_rule(&input)?;
    check_references(&state, &rule).await?;

    let updated = EligibilityRuleRepo::update(&state.pool, rule_id, &rule)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "EligibilityRule",
            id: rule_id,
        }))?;

    tracing::info!(
        rule_id,
        carrier_id = updated.rule.carrier_id,
        exclude = updated.rule.exclude,
        "Eligibility rule updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/eligibility-rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = EligibilityRuleRepo::delete(&state.pool, rule_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "EligibilityRule",
            id: rule_id,
        }));
    }

    tracing::info!(rule_id, "Eligibility rule deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that everything a rule points at exists and fits together.
async fn check_references(state: &AppState, rule: &NormalizedRule) -> AppResult<()> {
    let carrier = CarrierRepo::find_by_id(&state.pool, rule.carrier_id)
        .await?
        .ok_or_else(|| missing_reference("Carrier", rule.carrier_id))?;

    CompanyRepo::find_by_id(&state.pool, rule.company_id)
        .await?
        .ok_or_else(|| missing_reference("Company", rule.company_id))?;

    if let Some(&customer_id) = rule.customer_id.as_exact() {
        let customer = CustomerRepo::find_by_id(&state.pool, customer_id)
            .await?
            .ok_or_else(|| missing_reference("Customer", customer_id))?;
        ensure_customer_in_company(customer_id, customer.company_id, rule.company_id)?;
    }

    if let Some(code) = rule.service_code.as_exact() {
        let known = ServiceLevelRepo::list_codes(&state.pool).await?;
        ensure_known_service_codes(std::slice::from_ref(code), &known)?;
        ensure_service_supported(&rule.service_code, &carrier.supported_service_levels)?;
    }

    Ok(())
}

fn missing_reference(entity: &str, id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "{entity} {id} does not exist"
    )))
}
