//! HTTP-level integration tests for `/api/Department`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_department, create_employee, delete, get, post_json, post_raw, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_allocates_code_and_returns_department(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Department",
        json!({ "departmentName": "Sales" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["departmentCode"], "001");
    assert_eq!(json["departmentName"], "Sales");

    let response = get(build_test_app(pool), "/api/Department/001").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["departmentName"], "Sales");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_supplied_code_is_ignored(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/Department",
        json!({ "departmentCode": "500", "departmentName": "Sales" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["departmentCode"], "001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_departments_in_code_order(pool: PgPool) {
    create_department(&pool, "Sales").await;
    create_department(&pool, "Support").await;

    let response = get(build_test_app(pool), "/api/Department").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let codes: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["departmentCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["001", "002"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unpadded_path_code_resolves(pool: PgPool) {
    create_department(&pool, "Sales").await;

    let response = get(build_test_app(pool), "/api/Department/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["departmentCode"], "001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_department_returns_404_with_message(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/Department/042").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Department not found.");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_path_code_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/Department/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_name_is_rejected_without_a_row(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Department",
        json!({ "departmentName": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let list = body_json(get(build_test_app(pool), "/api/Department").await).await;
    assert_eq!(list, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_name_is_a_validation_error(pool: PgPool) {
    let response = post_json(build_test_app(pool), "/api/Department", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_returns_400_json_body(pool: PgPool) {
    let response = post_raw(build_test_app(pool), "/api/Department", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_renames_without_changing_code(pool: PgPool) {
    let code = create_department(&pool, "Sales").await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/Department/{code}"),
        json!({ "departmentCode": "999", "departmentName": "Field Sales" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["departmentCode"], code);
    assert_eq!(json["departmentName"], "Field Sales");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_department_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/api/Department/007",
        json!({ "departmentName": "Nobody" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_is_idempotent(pool: PgPool) {
    let code = create_department(&pool, "Sales").await;
    let uri = format!("/api/Department/{code}");

    for _ in 0..2 {
        let response = delete(build_test_app(pool.clone()), &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Department deleted successfully."
        );
    }

    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_with_malformed_code_succeeds(pool: PgPool) {
    let response = delete(build_test_app(pool), "/api/Department/not-a-code").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_keeps_referencing_employees(pool: PgPool) {
    let code = create_department(&pool, "Sales").await;
    let id = create_employee(&pool, "Ann", &code).await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/Department/{code}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), &format!("/api/Employee/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["departmentCode"], code);
}

// ---------------------------------------------------------------------------
// Employees of a department
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn department_employees_lists_only_members(pool: PgPool) {
    let sales = create_department(&pool, "Sales").await;
    let support = create_department(&pool, "Support").await;
    let ann = create_employee(&pool, "Ann", &sales).await;
    create_employee(&pool, "Bob", &support).await;

    let response = get(build_test_app(pool), &format!("/api/Department/{sales}/Employees")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employeeID"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [ann.as_str()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn department_employees_for_missing_department_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/Department/009/Employees").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
