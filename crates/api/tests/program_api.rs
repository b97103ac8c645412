//! HTTP-level integration tests for the `/api/programs` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use sqlx::PgPool;

async fn create_college(pool: &PgPool, code: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/colleges",
            serde_json::json!({"code": code, "name": name}),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_program_requires_a_college(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/programs",
        serde_json::json!({"code": "BSCS", "name": "Computer Science"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "College selection is required.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_program_rejects_unknown_college(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": 999999, "code": "BSCS", "name": "Computer Science"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "College not found.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_program_returns_201(pool: PgPool) {
    let college_id = create_college(&pool, "CCS", "Computer Studies").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": college_id, "code": "BSCS", "name": "Computer Science"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["college_id"], college_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_program_code_returns_409(pool: PgPool) {
    let college_id = create_college(&pool, "CCS", "Computer Studies").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": college_id, "code": "BSCS", "name": "Computer Science"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": college_id, "code": " bscs ", "name": "Other"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("already exists"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_college_leaves_program_with_placeholder(pool: PgPool) {
    let college_id = create_college(&pool, "CCS", "Computer Studies").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": college_id, "code": "BSCS", "name": "Computer Science"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/colleges/{college_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/programs").await).await;
    let rows = json["programs"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["college_id"].is_null());
    assert_eq!(rows[0]["college_name"], "Not Applicable");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn program_list_searches_by_college_code(pool: PgPool) {
    let ccs = create_college(&pool, "CCS", "Computer Studies").await;
    let coe = create_college(&pool, "COE", "Engineering").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": ccs, "code": "BSCS", "name": "Computer Science"}),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/programs",
        serde_json::json!({"college_id": coe, "code": "BSCE", "name": "Civil Engineering"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/programs?search=coe&search_by=college").await).await;

    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["programs"][0]["code"], "BSCE");
}
