//! In-process gateways for tests and local runs without Postgres.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::{Audit, Item, ItemPatch, NewItem, NewStock, Stock, StockPatch};
use crate::store::{to_column, ItemStore, StockStore, StoreError, StoreResult};

struct Table<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { last_id: 0, rows: BTreeMap::new() }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    inner: Arc<Mutex<Table<Item>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let table = self.inner.lock().await;
        Ok(table.rows.values().filter(|i| !i.audit.is_deleted()).cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Item> {
        let table = self.inner.lock().await;
        table
            .rows
            .get(&id)
            .filter(|i| !i.audit.is_deleted())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        let mut table = self.inner.lock().await;
        let id = table.next_id();
        let item = Item {
            audit: Audit::new(id, Utc::now()),
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
        };
        table.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, patch: ItemPatch) -> StoreResult<Item> {
        let mut table = self.inner.lock().await;
        let item = table
            .rows
            .get_mut(&id)
            .filter(|i| !i.audit.is_deleted())
            .ok_or(StoreError::NotFound)?;
        patch.apply(item);
        item.audit.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut table = self.inner.lock().await;
        if let Some(item) = table.rows.get_mut(&id) {
            if !item.audit.is_deleted() {
                item.audit.deleted_at = Some(Utc::now());
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStockStore {
    inner: Arc<Mutex<Table<Stock>>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn list(&self) -> StoreResult<Vec<Stock>> {
        let table = self.inner.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Stock> {
        let table = self.inner.lock().await;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewStock) -> StoreResult<Stock> {
        // Same range limits as the BIGINT columns.
        to_column(new.quantity, "quantit")?;
        to_column(new.item_id, "item_id")?;
        let mut table = self.inner.lock().await;
        let id = table.next_id();
        let stock = Stock { id, quantity: new.quantity, item_id: new.item_id };
        table.rows.insert(id, stock.clone());
        Ok(stock)
    }

    async fn update(&self, id: i64, patch: StockPatch) -> StoreResult<Stock> {
        let mut table = self.inner.lock().await;
        let mut next = table.rows.get(&id).cloned().ok_or(StoreError::NotFound)?;
        patch.apply(&mut next);
        to_column(next.quantity, "quantit")?;
        to_column(next.item_id, "item_id")?;
        table.rows.insert(id, next.clone());
        Ok(next)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.inner.lock().await.rows.remove(&id);
        Ok(())
    }
}
