//! HTTP-level integration tests for the `/api/students` endpoints, including
//! the scoped program lookup and the photo workflow.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, delete_json, get, post_json, post_multipart_file, put_json};
use sqlx::PgPool;

async fn seed_program(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let college = body_json(
        post_json(
            app,
            "/api/colleges",
            serde_json::json!({"code": "CCS", "name": "Computer Studies"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let program = body_json(
        post_json(
            app,
            "/api/programs",
            serde_json::json!({
                "college_id": college["id"],
                "code": "BSCS",
                "name": "Computer Science",
            }),
        )
        .await,
    )
    .await;
    program["id"].as_i64().unwrap()
}

async fn seed_student(pool: &PgPool, id: &str, program_id: i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "id": id,
            "first_name": "Ana",
            "last_name": "Reyes",
            "program_id": program_id,
            "year_level": 1,
            "gender": "Female",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_student_id_is_rejected(pool: PgPool) {
    let program_id = seed_program(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "id": "2024-1",
            "first_name": "Ana",
            "last_name": "Reyes",
            "program_id": program_id,
            "year_level": 1,
            "gender": "Female",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Student ID must be in format NNNN-NNNN.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_student_id_returns_409(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "id": "2024-0001",
            "first_name": "Ben",
            "last_name": "Cruz",
            "program_id": program_id,
            "year_level": 2,
            "gender": "Male",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Student ID '2024-0001' already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_a_program(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "id": "2024-0001",
            "first_name": "Ana",
            "last_name": "Reyes",
            "year_level": 1,
            "gender": "Female",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Program must be selected.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn year_level_out_of_range_is_rejected(pool: PgPool) {
    let program_id = seed_program(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "id": "2024-0001",
            "first_name": "Ana",
            "last_name": "Reyes",
            "program_id": program_id,
            "year_level": 6,
            "gender": "Female",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Year level must be between 1 and 5.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_id_can_change_on_update(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/students/2024-0001",
        serde_json::json!({"id": "2025-0001"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "2025-0001");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/students/2024-0001").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_null_program_detaches(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/students/2024-0001",
        serde_json::json!({"program_id": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["program_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_list_carries_denormalized_program_fields(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/students?search=computer").await).await;

    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["students"][0]["program_name"], "Computer Science");
    assert_eq!(json["students"][0]["program_code"], "BSCS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn programs_by_college_is_a_bare_array(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    let _ = program_id;

    let app = common::build_test_app(pool.clone());
    let colleges = body_json(get(app, "/api/colleges").await).await;
    let college_id = colleges["colleges"][0]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/students/programs/{college_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json.is_array());
    assert_eq!(json[0]["code"], "BSCS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_rejects_non_image_files(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_multipart_file(
        app,
        "/api/students/upload-photo",
        "resume.pdf",
        "application/pdf",
        b"%PDF-1.4",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Only image files are allowed.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_then_attach_then_sentinel_removal(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    // Phase 2: upload the photo bytes.
    let app = common::build_test_app(pool.clone());
    let uploaded = body_json(
        post_multipart_file(
            app,
            "/api/students/upload-photo",
            "me.png",
            "image/png",
            b"fake-png-bytes",
        )
        .await,
    )
    .await;
    let path = uploaded["path"].as_str().unwrap().to_string();
    assert!(uploaded["public_url"].as_str().unwrap().ends_with(&path));

    // Phase 3: attach via a second update.
    let app = common::build_test_app(pool.clone());
    let attached = body_json(
        put_json(
            app,
            "/api/students/2024-0001",
            serde_json::json!({"photo": path}),
        )
        .await,
    )
    .await;
    assert_eq!(attached["photo"].as_str().unwrap(), path);

    // Removal sentinel: empty string clears the column.
    let app = common::build_test_app(pool);
    let cleared = body_json(
        put_json(
            app,
            "/api/students/2024-0001",
            serde_json::json!({"photo": ""}),
        )
        .await,
    )
    .await;
    assert!(cleared["photo"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn compensating_photo_delete_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let uploaded = body_json(
        post_multipart_file(
            app,
            "/api/students/upload-photo",
            "me.png",
            "image/png",
            b"fake-png-bytes",
        )
        .await,
    )
    .await;
    let path = uploaded["path"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = delete_json(
        app,
        "/api/students/photo",
        serde_json::json!({"path": path}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again is not an error.
    let app = common::build_test_app(pool);
    let response = delete_json(
        app,
        "/api/students/photo",
        serde_json::json!({"path": path}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_student_returns_204(pool: PgPool) {
    let program_id = seed_program(&pool).await;
    seed_student(&pool, "2024-0001", program_id).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/students/2024-0001").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/students/2024-0001").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
