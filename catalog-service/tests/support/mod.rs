#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use catalog_service::models::{Item, ItemPatch, NewItem, NewStock, Stock, StockPatch};
use catalog_service::store::{ItemStore, StockStore, StoreError, StoreResult};
use catalog_service::{build_router, AppState};
use common_observability::CatalogMetrics;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or_else(|e| panic!("body was not JSON ({e}): {}", self.text))
    }

    pub fn error_code(&self) -> Option<&str> {
        self.headers.get("X-Error-Code").and_then(|v| v.to_str().ok())
    }
}

/// Router over fresh in-memory gateways; clones share the same data.
pub fn memory_app() -> (Router, AppState) {
    let metrics = Arc::new(CatalogMetrics::new().expect("metrics registry"));
    let state = AppState::in_memory(metrics);
    (build_router(state.clone()), state)
}

/// Gateway whose every call fails the way an exhausted pool does.
pub struct UnavailableStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ItemStore for UnavailableStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        unavailable()
    }
    async fn get(&self, _id: i64) -> StoreResult<Item> {
        unavailable()
    }
    async fn create(&self, _new: NewItem) -> StoreResult<Item> {
        unavailable()
    }
    async fn update(&self, _id: i64, _patch: ItemPatch) -> StoreResult<Item> {
        unavailable()
    }
    async fn delete(&self, _id: i64) -> StoreResult<()> {
        unavailable()
    }
}

#[async_trait]
impl StockStore for UnavailableStore {
    async fn list(&self) -> StoreResult<Vec<Stock>> {
        unavailable()
    }
    async fn get(&self, _id: i64) -> StoreResult<Stock> {
        unavailable()
    }
    async fn create(&self, _new: NewStock) -> StoreResult<Stock> {
        unavailable()
    }
    async fn update(&self, _id: i64, _patch: StockPatch) -> StoreResult<Stock> {
        unavailable()
    }
    async fn delete(&self, _id: i64) -> StoreResult<()> {
        unavailable()
    }
}

/// Router whose database is unreachable.
pub fn failing_app() -> Router {
    let metrics = Arc::new(CatalogMetrics::new().expect("metrics registry"));
    let state = AppState::new(Arc::new(UnavailableStore), Arc::new(UnavailableStore), metrics);
    build_router(state)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let req = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let collected = resp.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(collected.to_vec()).unwrap();
    TestResponse { status, headers, text }
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> TestResponse {
    send(app, method, uri, Some(&body.to_string())).await
}
