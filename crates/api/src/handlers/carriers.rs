//! Handlers for carrier reference data.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use freight_core::error::CoreError;
use freight_core::reference::{ensure_known_service_codes, normalize_service_codes, validate_name};
use freight_core::types::DbId;
use freight_db::models::carrier::CreateCarrier;
use freight_db::repositories::{CarrierRepo, ServiceLevelRepo};
use freight_db::retry::retry_read;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/carriers
pub async fn list_carriers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let carriers = retry_read(&state.read_retry, "carrier.list", || {
        CarrierRepo::list(&state.pool)
    })
    .await?;

    Ok(Json(DataResponse { data: carriers }))
}

/// GET /api/v1/carriers/{id}
pub async fn get_carrier(
    State(state): State<AppState>,
    Path(carrier_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let carrier = retry_read(&state.read_retry, "carrier.find_by_id", || {
        CarrierRepo::find_by_id(&state.pool, carrier_id)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Carrier",
        id: carrier_id,
    }))?;

    Ok(Json(DataResponse { data: carrier }))
}

/// POST /api/v1/carriers
///
/// Every supported service level must be one of the seeded service levels.
/// An empty list means the carrier accepts any service.
pub async fn create_carrier(
    State(state): State<AppState>,
    Json(input): Json<CreateCarrier>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Carrier", &input.name)?;
    let levels = normalize_service_codes(&input.supported_service_levels);

    if !levels.is_empty() {
        let known = ServiceLevelRepo::list_codes(&state.pool).await?;
        ensure_known_service_codes(&levels, &known)?;
    }

    let carrier = CarrierRepo::create(&state.pool, &name, &levels).await?;

    tracing::info!(
        carrier_id = carrier.id,
        name = %carrier.name,
        service_levels = carrier.supported_service_levels.len(),
        "Carrier created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: carrier })))
}
