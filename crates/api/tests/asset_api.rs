//! Asset CRUD, status, quantity and role checks over HTTP.

mod common;

use assetdesk_core::roles::Role;
use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

/// Create an asset as `token` and return the response body's `data`.
async fn create_asset(
    app: Router,
    token: &str,
    unique_id: &str,
    qty: i32,
) -> serde_json::Value {
    let body = serde_json::json!({
        "unique_id": unique_id,
        "name": "ThinkPad T14",
        "brand": "Lenovo",
        "category": "Laptop",
        "type": "it",
        "qty": qty,
    });
    let response = post_json_auth(app, "/api/v1/assets", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_and_reads_asset(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;

    let asset = create_asset(app.clone(), &admin, "AST-001", 3).await;
    assert_eq!(asset["unique_id"], "AST-001");
    assert_eq!(asset["qty"], 3);
    assert_eq!(asset["status"], "available");
    assert_eq!(asset["type"], "it");

    let uri = format!("/api/v1/assets/{}", asset["id"].as_str().unwrap());
    let response = get_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "ThinkPad T14");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quantity_defaults_to_one(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;

    let body = serde_json::json!({ "unique_id": "AST-002", "name": "Chair" });
    let response = post_json_auth(app, "/api/v1/assets", &admin, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["qty"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_unique_id_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    create_asset(app.clone(), &admin, "AST-001", 1).await;

    let body = serde_json::json!({ "unique_id": "AST-001", "name": "Another" });
    let response = post_json_auth(app, "/api/v1/assets", &admin, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_name_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;

    let body = serde_json::json!({ "unique_id": "AST-003", "name": "" });
    let response = post_json_auth(app, "/api/v1/assets", &admin, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_asset_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;

    let uri = format!("/api/v1/assets/{}", uuid::Uuid::new_v4());
    let response = get_auth(app, &uri, &admin).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_id_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;

    let response = get_auth(app, "/api/v1/assets/not-a-uuid", &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_changes_only_given_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 2).await;
    let uri = format!("/api/v1/assets/{}", asset["id"].as_str().unwrap());

    let body = serde_json::json!({ "name": "ThinkPad T14 Gen 3" });
    let response = put_json_auth(app, &uri, &admin, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "ThinkPad T14 Gen 3");
    assert_eq!(json["data"]["brand"], "Lenovo");
    assert_eq!(json["data"]["qty"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_and_paginates(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    create_asset(app.clone(), &admin, "AST-001", 1).await;
    create_asset(app.clone(), &admin, "AST-002", 1).await;
    let body = serde_json::json!({ "unique_id": "AST-003", "name": "Desk", "type": "non_it" });
    post_json_auth(app.clone(), "/api/v1/assets", &admin, body).await;

    let response = get_auth(app.clone(), "/api/v1/assets?type=it&limit=1", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["pagination"]["total"], 2);
    assert_eq!(json["data"]["pagination"]["has_more"], true);

    let response = get_auth(app, "/api/v1/assets?brand=lenovo", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["pagination"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn offset_past_the_end_is_an_empty_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    create_asset(app.clone(), &admin, "AST-001", 1).await;

    let uri = format!("/api/v1/assets?offset={}", i64::MAX);
    let response = get_auth(app, &uri, &admin).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["pagination"]["total"], 1);
    assert_eq!(json["data"]["pagination"]["has_more"], false);
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/assets").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employee_reads_but_cannot_write(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let employee = token_for(&pool, app.clone(), "emp@test.com", Role::Employee).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 1).await;
    let uri = format!("/api/v1/assets/{}", asset["id"].as_str().unwrap());

    let response = get_auth(app.clone(), &uri, &employee).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "unique_id": "AST-009", "name": "Nope" });
    let response = post_json_auth(app.clone(), "/api/v1/assets", &employee, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &employee).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = serde_json::json!({ "qty": 1 });
    let response =
        post_json_auth(app, &format!("{uri}/quantity/decrease"), &employee, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Status and quantity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn status_can_be_overwritten(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 1).await;
    let uri = format!("/api/v1/assets/{}/status", asset["id"].as_str().unwrap());

    let body = serde_json::json!({ "status": "repair" });
    let response = put_json_auth(app.clone(), &uri, &admin, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "repair");

    let body = serde_json::json!({ "status": "lost" });
    let response = put_json_auth(app, &uri, &admin, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quantity_goes_down_and_back_up(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 5).await;
    let base = format!("/api/v1/assets/{}/quantity", asset["id"].as_str().unwrap());

    let response = post_json_auth(
        app.clone(),
        &format!("{base}/decrease"),
        &admin,
        serde_json::json!({ "qty": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["qty"], 2);

    let response = post_json_auth(
        app.clone(),
        &format!("{base}/decrease"),
        &admin,
        serde_json::json!({ "qty": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INSUFFICIENT_QUANTITY");

    let response = post_json_auth(
        app.clone(),
        &format!("{base}/increase"),
        &admin,
        serde_json::json!({ "qty": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["qty"], 6);

    let response = post_json_auth(
        app,
        &format!("{base}/increase"),
        &admin,
        serde_json::json!({ "qty": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn asset_with_tickets_cannot_be_deleted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 1).await;
    let asset_id = asset["id"].as_str().unwrap().to_string();

    let ticket = serde_json::json!({
        "asset_id": asset_id,
        "category": "Hardware",
        "severity": "high",
        "comment": "Screen flickers",
    });
    let response = post_json_auth(app.clone(), "/api/v1/tickets", &admin, ticket).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(app, &format!("/api/v1/assets/{asset_id}"), &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn asset_without_tickets_is_deleted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin@test.com", Role::Admin).await;
    let asset = create_asset(app.clone(), &admin, "AST-001", 1).await;
    let uri = format!("/api/v1/assets/{}", asset["id"].as_str().unwrap());

    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Asset deleted");

    let response = get_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
