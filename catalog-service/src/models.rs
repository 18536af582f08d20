use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and lifecycle columns shared by soft-deletable records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Audit {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Audit {
    pub fn new(id: i64, now: DateTime<Utc>) -> Self {
        Self { id, created_at: now, updated_at: now, deleted_at: None }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: Audit,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl Item {
    pub fn id(&self) -> i64 {
        self.audit.id
    }
}

/// POST /items body. Absent fields take zero values; `id` and timestamps in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

/// PUT /items/:id body. A present field overwrites (zero included), an absent or null one is kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl ItemPatch {
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(stock) = self.stock {
            item.stock = stock;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Stock {
    pub id: i64,
    // Wire and column name keep the legacy "quantit" spelling.
    #[serde(rename = "quantit")]
    #[sqlx(rename = "quantit", try_from = "i64")]
    pub quantity: u64,
    #[sqlx(try_from = "i64")]
    pub item_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewStock {
    #[serde(rename = "quantit")]
    pub quantity: u64,
    pub item_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockPatch {
    #[serde(rename = "quantit")]
    pub quantity: Option<u64>,
    pub item_id: Option<u64>,
}

impl StockPatch {
    pub fn apply(self, stock: &mut Stock) {
        if let Some(quantity) = self.quantity {
            stock.quantity = quantity;
        }
        if let Some(item_id) = self.item_id {
            stock.item_id = item_id;
        }
    }
}

/// Acknowledgement body returned by DELETE.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
