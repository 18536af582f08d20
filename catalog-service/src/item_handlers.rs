use crate::app_state::AppState;
use crate::extract::{parse_id, JsonBody};
use crate::models::{Item, ItemPatch, Message, NewItem};
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common_http_errors::{ApiError, ApiResult};

pub(crate) const ITEM_ENTITY: &str = "Item";
pub(crate) const ITEM_NOT_FOUND_CODE: &str = "item_not_found";

fn api_error(err: StoreError) -> ApiError {
    err.into_api(ITEM_ENTITY, ITEM_NOT_FOUND_CODE)
}

fn lookup_id(raw: &str) -> ApiResult<i64> {
    parse_id(raw).ok_or_else(|| api_error(StoreError::NotFound))
}

pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.items.list().await.map_err(api_error)?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Item>> {
    let id = lookup_id(&raw_id)?;
    let item = state.items.get(id).await.map_err(api_error)?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(new_item): JsonBody<NewItem>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state.items.create(new_item).await.map_err(api_error)?;
    tracing::info!(item_id = item.id(), "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(patch): JsonBody<ItemPatch>,
) -> ApiResult<Json<Item>> {
    let id = lookup_id(&raw_id)?;
    let item = state.items.update(id, patch).await.map_err(api_error)?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Message>> {
    if let Some(id) = parse_id(&raw_id) {
        state.items.delete(id).await.map_err(api_error)?;
    }
    Ok(Json(Message { message: "Item deleted" }))
}
