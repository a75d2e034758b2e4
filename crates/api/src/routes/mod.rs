pub mod carriers;
pub mod companies;
pub mod eligibility;
pub mod eligibility_rules;
pub mod health;
pub mod service_levels;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /carriers                                  list, create
/// /carriers/{id}                             get
/// /carriers/{id}/eligibility-rules           list (filtered, paged), create
///
/// /eligibility-rules/{id}                    get, replace, delete
///
/// /eligibility/evaluate                      evaluate one carrier (POST)
/// /eligibility/evaluate-batch                evaluate many carriers (POST)
///
/// /companies                                 list, create
/// /companies/{id}/customers                  list, create
///
/// /service-levels                            list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Carriers and their rule collections.
        .nest("/carriers", carriers::router())
        // Individual rules.
        .nest("/eligibility-rules", eligibility_rules::router())
        // Rule matching.
        .nest("/eligibility", eligibility::router())
        // Companies and customers.
        .nest("/companies", companies::router())
        .nest("/service-levels", service_levels::router())
}
