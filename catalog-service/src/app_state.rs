use std::sync::Arc;

use axum::extract::FromRef;
use common_observability::CatalogMetrics;
use sqlx::PgPool;

use crate::memory_store::{InMemoryItemStore, InMemoryStockStore};
use crate::pg_store::{PgItemStore, PgStockStore};
use crate::store::{ItemStore, StockStore};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
    pub stocks: Arc<dyn StockStore>,
    pub metrics: Arc<CatalogMetrics>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemStore>, stocks: Arc<dyn StockStore>, metrics: Arc<CatalogMetrics>) -> Self {
        Self { items, stocks, metrics }
    }

    /// Both gateways share the one pool.
    pub fn postgres(db: PgPool, metrics: Arc<CatalogMetrics>) -> Self {
        Self::new(
            Arc::new(PgItemStore::new(db.clone())),
            Arc::new(PgStockStore::new(db)),
            metrics,
        )
    }

    pub fn in_memory(metrics: Arc<CatalogMetrics>) -> Self {
        Self::new(
            Arc::new(InMemoryItemStore::new()),
            Arc::new(InMemoryStockStore::new()),
            metrics,
        )
    }
}

impl FromRef<AppState> for Arc<CatalogMetrics> {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}
