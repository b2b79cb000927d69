//! # Catalog Client
//!
//! Read-only access to the product catalog and the stock report.
//!
//! Reads do not go through the ledger actor: they never write, so there is nothing to
//! serialize. The `list_*` methods never fail; a storage error is logged and reported as an
//! empty list. The `try_list_*` variants return the error for callers that need to tell
//! "empty" apart from "unreachable".
use crate::gateway::PersistenceGateway;
use crate::ledger_actor::StockError;
use crate::model::{Product, StockEntry};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Client for the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    gateway: Arc<dyn PersistenceGateway>,
}

impl CatalogClient {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn try_list_products(&self) -> Result<Vec<Product>, StockError> {
        let products = self.gateway.list_products().await?;
        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    /// All known products, or an empty list when storage fails.
    pub async fn list_products(&self) -> Vec<Product> {
        self.try_list_products().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not list products");
            Vec::new()
        })
    }

    #[instrument(skip(self))]
    pub async fn try_list_stock(&self) -> Result<Vec<StockEntry>, StockError> {
        let stock = self.gateway.list_stock().await?;
        debug!(count = stock.len(), "Stock listed");
        Ok(stock)
    }

    /// Name and quantity of every product, or an empty list when storage fails.
    pub async fn list_stock(&self) -> Vec<StockEntry> {
        self.try_list_stock().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not list stock");
            Vec::new()
        })
    }
}
