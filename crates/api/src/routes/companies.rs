use axum::routing::get;
use axum::Router;

use crate::handlers::companies;
use crate::state::AppState;

/// Company routes mounted at `/companies`.
///
/// ```text
/// GET    /                  -> list_companies
/// POST   /                  -> create_company
/// GET    /{id}/customers    -> list_customers
/// POST   /{id}/customers    -> create_customer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/{id}/customers",
            get(companies::list_customers).post(companies::create_customer),
        )
}
