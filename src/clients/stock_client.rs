//! # Stock Client
//!
//! High-level API of the adjustment engine. Wraps a `ResourceClient<StockLevel>` and
//! exposes the ledger operations with typed [`StockError`]s.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::ledger_actor::{StockAction, StockActionResult, StockError};
use crate::model::{AdjustmentKind, AdjustmentRequest, AdjustmentResult, ProductId, StockLevel};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the stock ledger actor.
#[derive(Clone)]
pub struct StockClient {
    inner: ResourceClient<StockLevel>,
}

impl StockClient {
    pub fn new(inner: ResourceClient<StockLevel>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<StockLevel> for StockClient {
    type Error = StockError;

    fn inner(&self) -> &ResourceClient<StockLevel> {
        &self.inner
    }

    /// Entity errors come back typed; anything else means the actor is gone.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<StockError>() {
            Ok(typed) => typed,
            Err(other) => StockError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl StockClient {
    /// Applies a validated adjustment.
    ///
    /// Exactly one durable write happens on success; none on any error.
    #[instrument(skip(self))]
    pub async fn apply_adjustment(
        &self,
        request: AdjustmentRequest,
    ) -> Result<AdjustmentResult, StockError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(
                request.product_id(),
                StockAction::ApplyDelta(request.signed_quantity()),
            )
            .await
        {
            Ok(StockActionResult::ApplyDelta(result)) => {
                info!(new_quantity = ?result.new_quantity, "Adjustment recorded");
                Ok(result)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Validates raw operator entry and applies it.
    ///
    /// Invalid entry fails with `InvalidInput` before any request reaches the ledger.
    #[instrument(skip(self))]
    pub async fn record(
        &self,
        kind: AdjustmentKind,
        raw_product_id: &str,
        raw_quantity: &str,
    ) -> Result<AdjustmentResult, StockError> {
        let request = AdjustmentRequest::parse(kind, raw_product_id, raw_quantity)?;
        self.apply_adjustment(request).await
    }

    /// Ledger row of one product, `None` if the id is unknown.
    pub async fn stock_level(&self, id: ProductId) -> Result<Option<StockLevel>, StockError> {
        self.get(id).await
    }

    /// Current quantity of one product.
    #[instrument(skip(self))]
    pub async fn get_quantity(&self, id: ProductId) -> Result<i64, StockError> {
        self.get(id)
            .await?
            .map(|level| level.quantity)
            .ok_or(StockError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_apply_adjustment_sends_signed_delta() {
        let (client, mut receiver) = create_mock_client::<StockLevel>(10);
        let stock_client = StockClient::new(client);

        let task = tokio::spawn(async move {
            stock_client
                .record(AdjustmentKind::Sale, "1", "4")
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, StockAction::ApplyDelta(-4));

        responder
            .send(Ok(StockActionResult::ApplyDelta(AdjustmentResult {
                success: true,
                new_quantity: Some(6),
            })))
            .unwrap();

        let result = task.await.unwrap().unwrap();
        assert_eq!(result.new_quantity, Some(6));
    }

    #[tokio::test]
    async fn test_invalid_entry_never_reaches_the_actor() {
        let (client, mut receiver) = create_mock_client::<StockLevel>(10);
        let stock_client = StockClient::new(client);

        let err = stock_client
            .record(AdjustmentKind::Purchase, "1", "0")
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InvalidInput(_)));

        drop(stock_client);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let mut mock = MockClient::<StockLevel>::new();
        mock.expect_action(ProductId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                StockError::InsufficientStock {
                    product_id: ProductId(1),
                    requested: 20,
                    available: 13,
                },
            )));
        let stock_client = StockClient::new(mock.client());

        let request = AdjustmentRequest::new(ProductId(1), -20).unwrap();
        let err = stock_client.apply_adjustment(request).await.unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                product_id: ProductId(1),
                requested: 20,
                available: 13,
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_quantity_maps_missing_to_not_found() {
        let mut mock = MockClient::<StockLevel>::new();
        mock.expect_get(ProductId(5)).return_ok(Some(StockLevel {
            product_id: ProductId(5),
            quantity: 42,
        }));
        mock.expect_get(ProductId(6)).return_ok(None);
        let stock_client = StockClient::new(mock.client());

        assert_eq!(stock_client.get_quantity(ProductId(5)).await.unwrap(), 42);
        assert_eq!(
            stock_client.get_quantity(ProductId(6)).await.unwrap_err(),
            StockError::NotFound(ProductId(6))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<StockLevel>(1);
        drop(receiver);
        let stock_client = StockClient::new(client);

        let err = stock_client.get_quantity(ProductId(1)).await.unwrap_err();
        assert_eq!(
            err.kind(),
            crate::ledger_actor::ErrorKind::ActorCommunication
        );
    }
}
