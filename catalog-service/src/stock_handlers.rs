use crate::app_state::AppState;
use crate::extract::{parse_id, JsonBody};
use crate::models::{Message, NewStock, Stock, StockPatch};
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common_http_errors::{ApiError, ApiResult};

pub(crate) const STOCK_ENTITY: &str = "Stock";
pub(crate) const STOCK_NOT_FOUND_CODE: &str = "stock_not_found";

fn api_error(err: StoreError) -> ApiError {
    err.into_api(STOCK_ENTITY, STOCK_NOT_FOUND_CODE)
}

fn lookup_id(raw: &str) -> ApiResult<i64> {
    parse_id(raw).ok_or_else(|| api_error(StoreError::NotFound))
}

pub async fn list_stocks(State(state): State<AppState>) -> ApiResult<Json<Vec<Stock>>> {
    let stocks = state.stocks.list().await.map_err(api_error)?;
    Ok(Json(stocks))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Stock>> {
    let id = lookup_id(&raw_id)?;
    let stock = state.stocks.get(id).await.map_err(api_error)?;
    Ok(Json(stock))
}

pub async fn create_stock(
    State(state): State<AppState>,
    JsonBody(new_stock): JsonBody<NewStock>,
) -> ApiResult<(StatusCode, Json<Stock>)> {
    let stock = state.stocks.create(new_stock).await.map_err(api_error)?;
    tracing::info!(stock_id = stock.id, item_id = stock.item_id, "Created stock");
    Ok((StatusCode::CREATED, Json(stock)))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(patch): JsonBody<StockPatch>,
) -> ApiResult<Json<Stock>> {
    let id = lookup_id(&raw_id)?;
    let stock = state.stocks.update(id, patch).await.map_err(api_error)?;
    Ok(Json(stock))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Message>> {
    if let Some(id) = parse_id(&raw_id) {
        state.stocks.delete(id).await.map_err(api_error)?;
    }
    Ok(Json(Message { message: "Stock deleted" }))
}
