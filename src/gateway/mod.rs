//! # Persistence Gateway
//!
//! Durable storage for the catalog and the stock ledger.
//!
//! [`PersistenceGateway`] is the seam the rest of the crate depends on; [`SqliteGateway`]
//! is the relational implementation. Every operation obtains its own connection and gives
//! it back on every exit path, and every write is a single atomic statement computed by
//! storage (`stock = stock + delta`), never a read followed by a write.

pub mod error;
pub mod sqlite;

pub use error::*;
pub use sqlite::*;

use crate::model::{Product, ProductId, StockEntry};
use async_trait::async_trait;

/// What a delta update did to the ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// The row was updated and now holds `new_quantity`.
    Applied { new_quantity: i64 },
    /// No row has this id; nothing was written.
    Missing,
    /// The update would have taken stock below zero and was filtered out.
    Insufficient { available: i64 },
    /// `current + delta` does not fit in an `i64`; nothing was written.
    OutOfRange { current: i64 },
}

/// Storage contract consumed by the catalog and the ledger actor.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All products, in storage order.
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    /// Name and quantity of every product, in storage order.
    async fn list_stock(&self) -> Result<Vec<StockEntry>, GatewayError>;

    /// Current quantity of one product, `None` if the id is unknown.
    async fn get_quantity(&self, id: ProductId) -> Result<Option<i64>, GatewayError>;

    /// Adds `delta` to the product's stock in one atomic statement.
    ///
    /// With `allow_negative == false` the statement only matches when the result stays
    /// at or above zero.
    async fn apply_delta(
        &self,
        id: ProductId,
        delta: i64,
        allow_negative: bool,
    ) -> Result<DeltaOutcome, GatewayError>;

    /// Releases every resource held by the gateway.
    async fn close(&self) {}
}
