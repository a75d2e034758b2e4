//! Route definitions for carriers and their eligibility rules.

use axum::routing::get;
use axum::Router;

use crate::handlers::{carriers, eligibility_rules};
use crate::state::AppState;

/// Carrier routes mounted at `/carriers`.
///
/// ```text
/// GET    /                           -> list_carriers
/// POST   /                           -> create_carrier
/// GET    /{id}                       -> get_carrier
/// GET    /{id}/eligibility-rules     -> list_rules
/// POST   /{id}/eligibility-rules     -> create_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(carriers::list_carriers).post(carriers::create_carrier),
        )
        .route("/{id}", get(carriers::get_carrier))
        .route(
            "/{id}/eligibility-rules",
            get(eligibility_rules::list_rules).post(eligibility_rules::create_rule),
        )
}
