//! ActorEntity trait implementation for [`StockLevel`].
//!
//! Reads go to the gateway's quantity lookup. The `ApplyDelta` action issues one atomic
//! delta update and maps the outcome through the ledger's [`AdjustmentPolicy`].
//!
//! [`AdjustmentPolicy`]: crate::model::AdjustmentPolicy

use super::actions::{StockAction, StockActionResult};
use super::error::StockError;
use super::LedgerContext;
use crate::framework::ActorEntity;
use crate::gateway::DeltaOutcome;
use crate::model::adjustment::check_delta;
use crate::model::{AdjustmentResult, ProductId, StockLevel};
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
impl ActorEntity for StockLevel {
    type Id = ProductId;
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Context = LedgerContext;
    type Error = StockError;

    async fn fetch(id: &ProductId, ctx: &LedgerContext) -> Result<Option<Self>, StockError> {
        let quantity = ctx.gateway.get_quantity(*id).await?;
        Ok(quantity.map(|quantity| StockLevel {
            product_id: *id,
            quantity,
        }))
    }

    /// Handles custom actions for the ledger.
    ///
    /// # Actions
    /// - `ApplyDelta`: `stock = stock + delta` in storage. Under the guarded policy a sale
    ///   larger than the stock fails with `InsufficientStock` and an unknown id with
    ///   `NotFound`; under the legacy policy both go through.
    async fn handle_action(
        id: &ProductId,
        action: StockAction,
        ctx: &LedgerContext,
    ) -> Result<StockActionResult, StockError> {
        match action {
            StockAction::ApplyDelta(delta) => {
                // Actions can arrive without going through AdjustmentRequest.
                check_delta(delta)?;

                let allow_negative = !ctx.policy.reject_negative_stock;
                let outcome = ctx.gateway.apply_delta(*id, delta, allow_negative).await?;

                let result = match outcome {
                    DeltaOutcome::Applied { new_quantity } => AdjustmentResult {
                        success: true,
                        new_quantity: Some(new_quantity),
                    },
                    DeltaOutcome::Missing if ctx.policy.reject_unknown_product => {
                        return Err(StockError::NotFound(*id));
                    }
                    DeltaOutcome::Missing => {
                        warn!(%id, delta, "No product matched the adjustment; nothing written");
                        AdjustmentResult {
                            success: true,
                            new_quantity: None,
                        }
                    }
                    DeltaOutcome::OutOfRange { current } => {
                        return Err(StockError::InvalidInput(format!(
                            "adjusting {id} by {delta} leaves the stock range (currently {current})"
                        )));
                    }
                    DeltaOutcome::Insufficient { available } => {
                        return Err(StockError::InsufficientStock {
                            product_id: *id,
                            requested: -delta,
                            available,
                        });
                    }
                };
                Ok(StockActionResult::ApplyDelta(result))
            }
        }
    }
}
