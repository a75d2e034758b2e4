use axum::routing::post;
use axum::Router;

use crate::handlers::eligibility;
use crate::state::AppState;

/// Evaluation routes mounted at `/eligibility`.
///
/// ```text
/// POST   /evaluate          -> evaluate
/// POST   /evaluate-batch    -> evaluate_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(eligibility::evaluate))
        .route("/evaluate-batch", post(eligibility::evaluate_batch))
}
