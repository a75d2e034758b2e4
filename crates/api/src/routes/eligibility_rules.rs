use axum::routing::get;
use axum::Router;

use crate::handlers::eligibility_rules;
use crate::state::AppState;

/// Rule routes mounted at `/eligibility-rules`.
///
/// ```text
/// GET    /{id}    -> get_rule
/// PUT    /{id}    -> update_rule
/// DELETE /{id}    -> delete_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(eligibility_rules::get_rule)
            .put(eligibility_rules::update_rule)
            .delete(eligibility_rules::delete_rule),
    )
}
