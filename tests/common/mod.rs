//! Common test utilities

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use simple_bank::api::{self, AppState};
use simple_bank::ledger::{AccountDirectory, LedgerEngine, PlainCredential};
use simple_bank::store::MemoryStore;

/// Build the app over a fresh in-memory store.
pub fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let engine = LedgerEngine::new(store.clone());
    let directory = AccountDirectory::new(store, Arc::new(PlainCredential));

    Router::new()
        .nest("/api/account", api::create_router())
        .with_state(AppState { engine, directory })
}

/// Fire one request at the app and return (status, parsed JSON body).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, value)
}
