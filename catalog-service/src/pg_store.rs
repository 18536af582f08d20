use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, PgPool};

use crate::config::ServiceConfig;
use crate::models::{Item, ItemPatch, NewItem, NewStock, Stock, StockPatch};
use crate::store::{to_column, ItemStore, StockStore, StoreError, StoreResult};

/// Creates `items` and `stocks`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) const LIST_ITEMS_SQL: &str =
    "SELECT id, created_at, updated_at, deleted_at, name, description, price, stock FROM items WHERE deleted_at IS NULL ORDER BY id";
pub(crate) const GET_ITEM_SQL: &str =
    "SELECT id, created_at, updated_at, deleted_at, name, description, price, stock FROM items WHERE id = $1 AND deleted_at IS NULL";
pub(crate) const INSERT_ITEM_SQL: &str =
    "INSERT INTO items (name, description, price, stock) VALUES ($1, $2, $3, $4) \
     RETURNING id, created_at, updated_at, deleted_at, name, description, price, stock";
pub(crate) const SAVE_ITEM_SQL: &str =
    "UPDATE items SET name = $2, description = $3, price = $4, stock = $5, updated_at = now() \
     WHERE id = $1 AND deleted_at IS NULL \
     RETURNING id, created_at, updated_at, deleted_at, name, description, price, stock";
pub(crate) const SOFT_DELETE_ITEM_SQL: &str =
    "UPDATE items SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL";

pub(crate) const LIST_STOCKS_SQL: &str = "SELECT id, quantit, item_id FROM stocks ORDER BY id";
pub(crate) const GET_STOCK_SQL: &str = "SELECT id, quantit, item_id FROM stocks WHERE id = $1";
pub(crate) const INSERT_STOCK_SQL: &str =
    "INSERT INTO stocks (quantit, item_id) VALUES ($1, $2) RETURNING id, quantit, item_id";
pub(crate) const SAVE_STOCK_SQL: &str =
    "UPDATE stocks SET quantit = $2, item_id = $3 WHERE id = $1 RETURNING id, quantit, item_id";
pub(crate) const DELETE_STOCK_SQL: &str = "DELETE FROM stocks WHERE id = $1";

/// Opens the shared pool. Callers treat failure as fatal.
pub async fn connect(config: &ServiceConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

#[derive(Clone)]
pub struct PgItemStore {
    db: PgPool,
}

impl PgItemStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = query_as::<_, Item>(LIST_ITEMS_SQL).fetch_all(&self.db).await?;
        Ok(items)
    }

    async fn get(&self, id: i64) -> StoreResult<Item> {
        query_as::<_, Item>(GET_ITEM_SQL)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        let item = query_as::<_, Item>(INSERT_ITEM_SQL)
            .bind(new.name)
            .bind(new.description)
            .bind(new.price)
            .bind(new.stock)
            .fetch_one(&self.db)
            .await?;
        Ok(item)
    }

    async fn update(&self, id: i64, patch: ItemPatch) -> StoreResult<Item> {
        let mut item = self.get(id).await?;
        patch.apply(&mut item);
        // A concurrent delete between the read and the save surfaces as NotFound.
        query_as::<_, Item>(SAVE_ITEM_SQL)
            .bind(id)
            .bind(item.name)
            .bind(item.description)
            .bind(item.price)
            .bind(item.stock)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = query(SOFT_DELETE_ITEM_SQL).bind(id).execute(&self.db).await?;
        tracing::debug!(item_id = id, rows = result.rows_affected(), "Soft-deleted item");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgStockStore {
    db: PgPool,
}

impl PgStockStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn list(&self) -> StoreResult<Vec<Stock>> {
        let stocks = query_as::<_, Stock>(LIST_STOCKS_SQL).fetch_all(&self.db).await?;
        Ok(stocks)
    }

    async fn get(&self, id: i64) -> StoreResult<Stock> {
        query_as::<_, Stock>(GET_STOCK_SQL)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewStock) -> StoreResult<Stock> {
        let stock = query_as::<_, Stock>(INSERT_STOCK_SQL)
            .bind(to_column(new.quantity, "quantit")?)
            .bind(to_column(new.item_id, "item_id")?)
            .fetch_one(&self.db)
            .await?;
        Ok(stock)
    }

    async fn update(&self, id: i64, patch: StockPatch) -> StoreResult<Stock> {
        let mut stock = self.get(id).await?;
        patch.apply(&mut stock);
        query_as::<_, Stock>(SAVE_STOCK_SQL)
            .bind(id)
            .bind(to_column(stock.quantity, "quantit")?)
            .bind(to_column(stock.item_id, "item_id")?)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = query(DELETE_STOCK_SQL).bind(id).execute(&self.db).await?;
        tracing::debug!(stock_id = id, rows = result.rows_affected(), "Deleted stock");
        Ok(())
    }
}
