#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use personnel_api::config::ServerConfig;
use personnel_api::router::build_app_router;
use personnel_api::state::AppState;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        id_allocation_max_attempts: 5,
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a department through the API and return its code.
pub async fn create_department(pool: &PgPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Department",
        serde_json::json!({ "departmentName": name }),
    )
    .await;
    let json = body_json(response).await;
    json["departmentCode"].as_str().unwrap().to_string()
}

/// A complete, valid employee payload for the given department.
pub fn employee_body(first_name: &str, department_code: &str) -> serde_json::Value {
    serde_json::json!({
        "firstName": first_name,
        "lastName": "Lee",
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "DOB": "1990-01-01",
        "salary": 50000,
        "departmentCode": department_code,
    })
}

/// Create an employee through the API and return its id.
pub async fn create_employee(pool: &PgPool, first_name: &str, department_code: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Employee",
        employee_body(first_name, department_code),
    )
    .await;
    let json = body_json(response).await;
    json["employeeID"].as_str().unwrap().to_string()
}
