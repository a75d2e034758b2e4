//! Handlers for companies and their customers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use freight_core::error::CoreError;
use freight_core::reference::validate_name;
use freight_core::types::DbId;
use freight_db::models::company::{CreateCompany, CreateCustomer};
use freight_db::repositories::{CompanyRepo, CustomerRepo};
use freight_db::retry::retry_read;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// GET /api/v1/companies
pub async fn list_companies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let companies = retry_read(&state.read_retry, "company.list", || {
        CompanyRepo::list(&state.pool)
    })
    .await?;

    Ok(Json(DataResponse { data: companies }))
}

/// POST /api/v1/companies
pub async fn create_company(
    State(state): State<AppState>,
    Json(input): Json<CreateCompany>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Company", &input.name)?;
    let company = CompanyRepo::create(&state.pool, &name).await?;

    tracing::info!(company_id = company.id, name = %company.name, "Company created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: company })))
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{id}/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    retry_read(&state.read_retry, "company.find_by_id", || {
        CompanyRepo::find_by_id(&state.pool, company_id)
    })
    .await?
    .ok_or(company_not_found(company_id))?;

    let customers = retry_read(&state.read_retry, "customer.list_by_company", || {
        CustomerRepo::list_by_company(&state.pool, company_id)
    })
    .await?;

    Ok(Json(DataResponse { data: customers }))
}

/// POST /api/v1/companies/{id}/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Customer", &input.name)?;

    CompanyRepo::find_by_id(&state.pool, company_id)
        .await?
        .ok_or(company_not_found(company_id))?;

    let customer = CustomerRepo::create(&state.pool, company_id, &name).await?;

    tracing::info!(
        customer_id = customer.id,
        company_id,
        name = %customer.name,
        "Customer created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

fn company_not_found(company_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Company",
        id: company_id,
    })
}
