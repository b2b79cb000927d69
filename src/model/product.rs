/// Catalog and ledger records for a product.
///
/// # Actor Framework
/// [`StockLevel`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be served by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for StockLevel`](#impl-ActorEntity-for-StockLevel) for details on:
/// - Reads (`fetch`, backed by the ledger's quantity lookup)
/// - Actions ([`StockAction`](crate::ledger_actor::StockAction))
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Current stock of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// One row of the stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub name: String,
    pub quantity: i64,
}
