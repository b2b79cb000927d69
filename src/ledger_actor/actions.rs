//! Custom actions for the stock ledger actor.
//!
//! Actions are the only write path to stock. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action); see
//! [`impl ActorEntity for StockLevel`](crate::model::StockLevel#impl-ActorEntity-for-StockLevel).

use crate::model::AdjustmentResult;

/// Custom actions for StockLevel entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAction {
    /// Adds a signed, non-zero quantity to the product's stock in one atomic update.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` or `NotFound` depending on the ledger's policy.
    ApplyDelta(i64),
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockActionResult {
    ApplyDelta(AdjustmentResult),
}
