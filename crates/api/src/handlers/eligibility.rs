//! Handlers for carrier eligibility evaluation.
//!
//! Evaluation is read-only: load the carrier's rules for the shipping
//! company, then let the precedence resolver pick the controlling rule. A
//! store failure is returned as an error and never treated as "eligible".

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use freight_core::eligibility::normalize::normalize_query;
use freight_core::eligibility::{resolve, EligibilityDecision, Location, ShipmentQuery};
use freight_core::types::DbId;
use freight_db::repositories::EligibilityRuleRepo;
use freight_db::retry::retry_read;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A shipment to evaluate against several carriers at once.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BatchEvaluateRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "carrier_ids must contain between 1 and 100 ids"
    ))]
    pub carrier_ids: Vec<DbId>,
    pub company_id: DbId,
    #[serde(default)]
    pub customer_id: Option<DbId>,
    #[serde(default)]
    pub service_code: Option<String>,
    pub origin: Location,
    pub destination: Location,
}

#[derive(Debug, Serialize)]
pub struct CarrierDecision {
    pub carrier_id: DbId,
    pub decision: EligibilityDecision,
}

#[derive(Debug, Serialize)]
pub struct BatchEvaluateResponse {
    /// One entry per requested carrier, in request order.
    pub decisions: Vec<CarrierDecision>,
    pub eligible_carrier_ids: Vec<DbId>,
}

/// POST /api/v1/eligibility/evaluate
pub async fn evaluate(
    State(state): State<AppState>,
    Json(query): Json<ShipmentQuery>,
) -> AppResult<impl IntoResponse> {
    let query = normalize_query(&query)?;
    let decision = evaluate_carrier(&state, &query).await?;
    Ok(Json(DataResponse { data: decision }))
}

/// POST /api/v1/eligibility/evaluate-batch
///
/// Carriers are evaluated concurrently. If any store read fails the whole
/// request fails; partial results are never returned.
pub async fn evaluate_batch(
    State(state): State<AppState>,
    Json(input): Json<BatchEvaluateRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let queries = input
        .carrier_ids
        .iter()
        .map(|&carrier_id| {
            normalize_query(&ShipmentQuery {
                carrier_id,
                company_id: input.company_id,
                customer_id: input.customer_id,
                service_code: input.service_code.clone(),
                origin: input.origin.clone(),
                destination: input.destination.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let state = &state;
    let decisions = try_join_all(queries.iter().map(|query| async move {
        let decision = evaluate_carrier(state, query).await?;
        Ok::<_, AppError>(CarrierDecision {
            carrier_id: query.carrier_id,
            decision,
        })
    }))
    .await?;

    let eligible_carrier_ids = decisions
        .iter()
        .filter(|d| d.decision.eligible)
        .map(|d| d.carrier_id)
        .collect::<Vec<_>>();

    tracing::debug!(
        company_id = input.company_id,
        carriers = decisions.len(),
        eligible = eligible_carrier_ids.len(),
        "Batch eligibility evaluated"
    );

    Ok(Json(DataResponse {
        data: BatchEvaluateResponse {
            decisions,
            eligible_carrier_ids,
        },
    }))
}

/// Load the rules relevant to `query` and resolve them.
async fn evaluate_carrier(
    state: &AppState,
    query: &ShipmentQuery,
) -> AppResult<EligibilityDecision> {
    let rules = retry_read(&state.read_retry, "eligibility_rule.list_for_match", || {
        EligibilityRuleRepo::list_for_match(&state.pool, query.carrier_id, query.company_id)
    })
    .await?;

    let decision = resolve(query, &rules);

    tracing::debug!(
        carrier_id = query.carrier_id,
        company_id = query.company_id,
        candidates = rules.len(),
        matched = decision.matched_rules,
        eligible = decision.eligible,
        controlling_rule_id = ?decision.controlling_rule_id(),
        "Eligibility evaluated"
    );

    Ok(decision)
}
