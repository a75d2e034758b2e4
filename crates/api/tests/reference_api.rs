//! HTTP-level integration tests for carriers, companies, customers and
//! service levels.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn service_levels_are_listed(pool: PgPool) {
    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/service-levels").await).await;

    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"GROUND"));
    assert!(codes.contains(&"EXPRESS"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_get_carrier(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/carriers",
        json!({ "name": "  Northern Freight ", "supported_service_levels": ["ground", "GROUND", "express"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["name"], "Northern Freight");
    assert_eq!(
        created["data"]["supported_service_levels"],
        json!(["GROUND", "EXPRESS"])
    );

    let id = created["data"]["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/v1/carriers/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/carriers").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(app, "/api/v1/carriers/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn carrier_validation(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/carriers", json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/carriers",
        json!({ "name": "X", "supported_service_levels": ["TELEPORT"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    post_json(app.clone(), "/api/v1/carriers", json!({ "name": "Dup" })).await;
    let response = post_json(app, "/api/v1/carriers", json!({ "name": "Dup" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn companies_and_customers(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/companies", json!({ "name": "Acme" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let company_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/companies/{company_id}/customers");
    let response = post_json(app.clone(), &uri, json!({ "name": "Globex" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let customer = body_json(response).await;
    assert_eq!(customer["data"]["company_id"], company_id);

    let json = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Globex");

    let json = body_json(get(app.clone(), "/api/v1/companies").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(app.clone(), "/api/v1/companies/999999/customers").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(app, "/api/v1/companies/999999/customers", json!({ "name": "Nobody" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
