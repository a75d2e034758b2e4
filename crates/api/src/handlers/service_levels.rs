use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use freight_db::repositories::ServiceLevelRepo;
use freight_db::retry::retry_read;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/service-levels
pub async fn list_service_levels(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let levels = retry_read(&state.read_retry, "service_level.list", || {
        ServiceLevelRepo::list(&state.pool)
    })
    .await?;

    Ok(Json(DataResponse { data: levels }))
}
