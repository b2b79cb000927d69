//! # Stock Ledger Actor
//!
//! The adjustment engine: the only writer of stock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`StockLevel`]
//! - [`error`] - [`StockError`] and its [`ErrorKind`]
//! - [`actions`] - [`StockAction`] and [`StockActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cobra_stock::clients::StockClient;
//! use cobra_stock::gateway::{GatewayConfig, SqliteGateway};
//! use cobra_stock::ledger_actor::{self, LedgerContext};
//! use cobra_stock::model::{AdjustmentKind, AdjustmentPolicy, AdjustmentRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = SqliteGateway::connect(&GatewayConfig::in_memory())?;
//!     gateway.ensure_schema().await?;
//!     let widget = gateway.insert_product("Widget", 10).await?;
//!
//!     let (actor, generic_client) = ledger_actor::new();
//!     let client = StockClient::new(generic_client);
//!     tokio::spawn(actor.run(LedgerContext::new(Arc::new(gateway), AdjustmentPolicy::guarded())));
//!
//!     let request = AdjustmentRequest::parse(AdjustmentKind::Purchase, &widget.0.to_string(), "3")?;
//!     let result = client.apply_adjustment(request).await?;
//!     assert_eq!(result.new_quantity, Some(13));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::gateway::PersistenceGateway;
use crate::model::{AdjustmentPolicy, StockLevel};
use std::sync::Arc;

/// Dependencies injected into the ledger actor when it starts.
#[derive(Clone)]
pub struct LedgerContext {
    pub gateway: Arc<dyn PersistenceGateway>,
    pub policy: AdjustmentPolicy,
}

impl LedgerContext {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, policy: AdjustmentPolicy) -> Self {
        Self { gateway, policy }
    }
}

/// Creates a new ledger actor and its client.
pub fn new() -> (ResourceActor<StockLevel>, ResourceClient<StockLevel>) {
    ResourceActor::new(32)
}
