use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use common_http_errors::{ApiError, ERROR_CODE_HEADER};
use common_observability::{CatalogMetrics, METRICS_CONTENT_TYPE};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::item_handlers::{create_item, delete_item, get_item, list_items, update_item};
use crate::stock_handlers::{create_stock, delete_stock, get_stock, list_stocks, update_stock};

pub const SERVICE_NAME: &str = "catalog-service";

async fn health() -> &'static str {
    "ok"
}

async fn metrics_endpoint(State(metrics): State<Arc<CatalogMetrics>>) -> Response {
    match metrics.render() {
        Ok(text) => (
            [(header::CONTENT_TYPE, HeaderValue::from_static(METRICS_CONTENT_TYPE))],
            text,
        )
            .into_response(),
        Err(err) => ApiError::internal(format!("metrics encode error: {err}")).into_response(),
    }
}

async fn record_metrics(
    State(metrics): State<Arc<CatalogMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let resp = next.run(req).await;
    let code = resp
        .headers()
        .get(ERROR_CODE_HEADER)
        .and_then(|v| v.to_str().ok());
    metrics.observe(SERVICE_NAME, method.as_str(), resp.status().as_u16(), code);
    resp
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).put(update_item).delete(delete_item))
}

fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/stocks", get(list_stocks).post(create_stock))
        .route("/stocks/:id", get(get_stock).put(update_stock).delete(delete_stock))
}

/// Full route table plus request logging, panic recovery and response counters.
pub fn build_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .merge(item_routes())
        .merge(stock_routes())
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(metrics, record_metrics))
        .layer(TraceLayer::new_for_http())
}
