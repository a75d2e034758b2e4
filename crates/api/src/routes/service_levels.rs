use axum::routing::get;
use axum::Router;

use crate::handlers::service_levels;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(service_levels::list_service_levels))
}
