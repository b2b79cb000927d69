use crate::clients::{CatalogClient, StockClient};
use crate::gateway::{PersistenceGateway, SqliteGateway};
use crate::ledger_actor::{self, LedgerContext, StockError};
use crate::lifecycle::StockConfig;
use crate::model::AdjustmentPolicy;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Products created when `seed_demo` is on and the catalog is empty.
const DEMO_CATALOG: &[(&str, i64)] = &[("Widget", 10), ("Gadget", 25), ("Sprocket", 40)];

/// The runtime orchestrator of the stock tracker.
///
/// `StockSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the ledger actor
/// - **Dependency Wiring**: injecting the gateway and policy into the actor's context
/// - **Resource Coordination**: closing the gateway once the actor has stopped
///
/// # Example
///
/// ```ignore
/// let system = StockSystem::connect(&StockConfig::from_env()).await?;
///
/// let products = system.catalog.list_products().await;
/// let result = system.stock_client.record(AdjustmentKind::Purchase, "1", "5").await?;
///
/// system.shutdown().await?;
/// ```
pub struct StockSystem {
    /// Client for the adjustment engine (ledger actor)
    pub stock_client: StockClient,

    /// Read-only catalog and stock report
    pub catalog: CatalogClient,

    gateway: Arc<dyn PersistenceGateway>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StockSystem {
    /// Starts the ledger actor over `gateway`. Must be called inside a Tokio runtime.
    pub fn new(gateway: Arc<dyn PersistenceGateway>, policy: AdjustmentPolicy) -> Self {
        // 1. Create actor (no dependencies)
        let (ledger_actor, ledger_client) = ledger_actor::new();

        // 2. Start it with the storage context injected
        let ledger_handle = tokio::spawn(
            ledger_actor.run(LedgerContext::new(gateway.clone(), policy)),
        );
        info!(?policy, "Stock system started");

        Self {
            stock_client: StockClient::new(ledger_client),
            catalog: CatalogClient::new(gateway.clone()),
            gateway,
            handles: vec![ledger_handle],
        }
    }

    /// Opens the SQLite gateway described by `config` and starts the system.
    ///
    /// Only a malformed database URL is an error. If the database cannot be reached yet,
    /// the failure is logged and the system still starts; each operation then reports
    /// `Connection` on its own.
    pub async fn connect(config: &StockConfig) -> Result<Self, StockError> {
        let gateway = SqliteGateway::connect(&config.gateway)?;

        if let Err(e) = gateway.ensure_schema().await {
            warn!(error = %e, "Could not prepare the products table");
        } else if config.seed_demo {
            seed_demo_catalog(&gateway).await;
        }

        Ok(Self::new(Arc::new(gateway), config.policy))
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops the clients so the ledger actor's channel closes, waits for the actor to
    /// drain, then closes the gateway. Fails only if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), StockError> {
        info!("Shutting down stock system...");

        drop(self.stock_client);
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                self.gateway.close().await;
                return Err(StockError::ActorCommunicationError(format!(
                    "Actor task failed: {e:?}"
                )));
            }
        }

        self.gateway.close().await;
        info!("Stock system shutdown complete.");
        Ok(())
    }
}

async fn seed_demo_catalog(gateway: &SqliteGateway) {
    match gateway.product_count().await {
        Ok(0) => {
            for (name, stock) in DEMO_CATALOG {
                if let Err(e) = gateway.insert_product(name, *stock).await {
                    warn!(error = %e, name, "Could not seed product");
                    return;
                }
            }
            info!(count = DEMO_CATALOG.len(), "Seeded demo catalog");
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Could not count products"),
    }
}
