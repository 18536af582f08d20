use async_trait::async_trait;
use common_http_errors::ApiError;
use thiserror::Error;

use crate::models::{Item, ItemPatch, NewItem, NewStock, Stock, StockPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{field} is larger than the storage column allows")]
    OutOfRange { field: &'static str },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Maps a gateway failure onto the HTTP envelope for `entity` ("Item" or "Stock").
    pub fn into_api(self, entity: &'static str, not_found_code: &'static str) -> ApiError {
        match self {
            StoreError::NotFound => ApiError::not_found(not_found_code, format!("{entity} not found")),
            StoreError::OutOfRange { .. } => ApiError::bad_request("value_out_of_range", self.to_string()),
            StoreError::Database(err) => {
                tracing::error!(error = %err, entity, "Catalog database call failed");
                ApiError::internal(err)
            }
        }
    }
}

/// Persistence gateway for items. Soft-deleted rows are invisible to every method.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Item>>;
    async fn get(&self, id: i64) -> StoreResult<Item>;
    async fn create(&self, new: NewItem) -> StoreResult<Item>;
    async fn update(&self, id: i64, patch: ItemPatch) -> StoreResult<Item>;
    /// Marks the row deleted. Unknown ids are a no-op.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Persistence gateway for stocks. `item_id` is stored as given, without checking the item exists.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Stock>>;
    async fn get(&self, id: i64) -> StoreResult<Stock>;
    async fn create(&self, new: NewStock) -> StoreResult<Stock>;
    async fn update(&self, id: i64, patch: StockPatch) -> StoreResult<Stock>;
    /// Removes the row. Unknown ids are a no-op.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Converts an unsigned wire value to the signed BIGINT column type.
pub(crate) fn to_column(value: u64, field: &'static str) -> StoreResult<i64> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange { field })
}
