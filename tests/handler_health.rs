mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use tinyurl::AppError;
use tinyurl::api::dto::health::HealthResponse;
use tinyurl::domain::entities::{CounterField, Record};
use tinyurl::domain::repositories::RecordStore;
use tinyurl::routes::router;
use tinyurl::state::AppState;

/// Store whose backend is always down.
struct UnreachableStore;

#[async_trait]
impl RecordStore for UnreachableStore {
    async fn put_if_absent(&self, _record: &Record) -> Result<bool, AppError> {
        Err(AppError::store("connection refused"))
    }

    async fn get(&self, _short_id: &str) -> Result<Option<Record>, AppError> {
        Err(AppError::store("connection refused"))
    }

    async fn increment_counter(
        &self,
        _short_id: &str,
        _field: CounterField,
        _delta: u64,
    ) -> Result<Option<u64>, AppError> {
        Err(AppError::store("connection refused"))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn unreachable_server() -> TestServer {
    let state = AppState::new(Arc::new(UnreachableStore), common::TEST_DOMAIN, 5);
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(body.checks.store.status, "ok");
}

#[tokio::test]
async fn test_health_degraded() {
    let server = unreachable_server();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "degraded");
    assert_eq!(body.checks.store.status, "error");
}

#[tokio::test]
async fn test_store_failure_hides_details() {
    let server = unreachable_server();

    let shorten = server
        .post("/shorten")
        .json(&serde_json::json!({ "url": "https://example.com/secret-path" }))
        .await;
    shorten.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    shorten.assert_json(&serde_json::json!({ "error": "Internal server error" }));

    let redirect = server.get("/abc123").await;
    redirect.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let text = redirect.text();
    assert!(!text.contains("connection refused"));
    assert!(!text.contains("abc123"));
}
