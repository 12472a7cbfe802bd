//! HTTP surface tests driven through the router without a socket.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use db_docs::db::ConnectionProvider;
use db_docs::output::OutputDir;
use db_docs::server::{AppState, router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(dir: &TempDir) -> axum::Router {
    let state = AppState::new(
        ConnectionProvider::new(Duration::from_secs(2)),
        OutputDir::init(dir.path()).unwrap(),
    );
    router(Arc::new(state), "/db-docs", None)
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Port 1 on loopback refuses connections, so introspection fails fast.
const UNREACHABLE_CONFIG: &str =
    r#"{"host":"127.0.0.1","port":1,"user":"postgres","password":"pw","database":"app"}"#;

#[tokio::test]
async fn test_missing_config_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir)
        .oneshot(post("/db-docs", r#"{"schemas":[]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("config"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir)
        .oneshot(post("/db-docs", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["message"].is_string());
}

#[tokio::test]
async fn test_empty_schema_name_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(r#"{{"config":{},"schemas":[{{"name":""}}]}}"#, UNREACHABLE_CONFIG);
    let response = app(&dir).oneshot(post("/db-docs", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "\"schemas[0].name\" is not allowed to be empty"
    );
}

#[tokio::test]
async fn test_no_schemas_returns_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(r#"{{"config":{},"schemas":[]}}"#, UNREACHABLE_CONFIG);
    let response = app(&dir)
        .oneshot(post("/db-docs?export_as=pdf", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_unreachable_database_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        r#"{{"config":{},"schemas":[{{"name":"public"}}]}}"#,
        UNREACHABLE_CONFIG
    );
    let response = app(&dir).oneshot(post("/db-docs", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_docx_export_downloads_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(r#"{{"config":{},"schemas":[]}}"#, UNREACHABLE_CONFIG);
    let response = app(&dir)
        .oneshot(post("/db-docs?export_as=docx", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"db_docs_"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
    // the temporary artifact is gone once delivered
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_get_is_not_routed() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .uri("/db-docs")
        .body(Body::empty())
        .unwrap();
    let response = app(&dir).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
