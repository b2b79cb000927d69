use async_trait::async_trait;
use cobra_stock::clients::actor_client::ActorClient;
use cobra_stock::gateway::{
    DeltaOutcome, GatewayConfig, GatewayError, PersistenceGateway, SqliteGateway,
};
use cobra_stock::clients::StockClient;
use cobra_stock::ledger_actor::{self, ErrorKind, LedgerContext, StockAction, StockError};
use cobra_stock::lifecycle::{StockConfig, StockSystem};
use cobra_stock::model::{
    AdjustmentKind, AdjustmentPolicy, AdjustmentRequest, Product, ProductId, StockEntry,
    StockLevel, MAX_ADJUSTMENT,
};
use std::sync::Arc;

/// Starts a system over a private in-memory database holding `products`.
async fn system_with(products: &[(&str, i64)], policy: AdjustmentPolicy) -> StockSystem {
    let gateway = SqliteGateway::connect(&GatewayConfig::in_memory()).expect("valid url");
    gateway.ensure_schema().await.expect("schema");
    for (name, stock) in products {
        gateway.insert_product(name, *stock).await.expect("insert");
    }
    StockSystem::new(Arc::new(gateway), policy)
}

/// A gateway whose database is never reachable.
struct UnreachableGateway;

#[async_trait]
impl PersistenceGateway for UnreachableGateway {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        Err(GatewayError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn list_stock(&self) -> Result<Vec<StockEntry>, GatewayError> {
        Err(GatewayError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn get_quantity(&self, _id: ProductId) -> Result<Option<i64>, GatewayError> {
        Err(GatewayError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn apply_delta(
        &self,
        _id: ProductId,
        _delta: i64,
        _allow_negative: bool,
    ) -> Result<DeltaOutcome, GatewayError> {
        Err(GatewayError::Connection(sqlx::Error::PoolTimedOut))
    }
}

/// Widget starts at 10, a purchase of 3 takes it to 13, then a sale of 20 arrives.
#[tokio::test]
async fn test_oversell_is_refused_when_guarded() {
    let system = system_with(&[("Widget", 10)], AdjustmentPolicy::guarded()).await;
    let widget = ProductId(1);

    let purchase = system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", "3")
        .await
        .expect("purchase should succeed");
    assert!(purchase.success);
    assert_eq!(purchase.new_quantity, Some(13));

    let err = system
        .stock_client
        .record(AdjustmentKind::Sale, "1", "20")
        .await
        .expect_err("sale beyond stock must fail");
    assert_eq!(
        err,
        StockError::InsufficientStock {
            product_id: widget,
            requested: 20,
            available: 13,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);

    // Nothing was written by the refused sale
    assert_eq!(system.stock_client.get_quantity(widget).await, Ok(13));

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_oversell_goes_negative_under_legacy_policy() {
    let system = system_with(&[("Widget", 10)], AdjustmentPolicy::legacy()).await;

    system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", "3")
        .await
        .expect("purchase");
    let sale = system
        .stock_client
        .record(AdjustmentKind::Sale, "1", "20")
        .await
        .expect("legacy policy accepts any sale");
    assert_eq!(sale.new_quantity, Some(-7));

    let stock = system.catalog.list_stock().await;
    assert_eq!(
        stock,
        vec![StockEntry {
            name: "Widget".to_string(),
            quantity: -7
        }]
    );

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_unknown_product_depends_on_policy() {
    let guarded = system_with(&[("Widget", 10)], AdjustmentPolicy::guarded()).await;
    let err = guarded
        .stock_client
        .record(AdjustmentKind::Purchase, "99", "5")
        .await
        .unwrap_err();
    assert_eq!(err, StockError::NotFound(ProductId(99)));
    guarded.shutdown().await.expect("shutdown");

    let legacy = system_with(&[("Widget", 10)], AdjustmentPolicy::legacy()).await;
    let result = legacy
        .stock_client
        .record(AdjustmentKind::Purchase, "99", "5")
        .await
        .expect("legacy reports success for an unknown id");
    assert!(result.success);
    assert_eq!(result.new_quantity, None);
    let widget = legacy.stock_client.get(ProductId(1)).await.unwrap();
    assert_eq!(widget.map(|level| level.quantity), Some(10));
    legacy.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_purchase_then_sale_restores_quantity() {
    let system = system_with(&[("Gadget", 25)], AdjustmentPolicy::guarded()).await;
    let gadget = ProductId(1);

    let up = AdjustmentRequest::new(gadget, 5).unwrap();
    let down = AdjustmentRequest::new(gadget, -5).unwrap();
    assert_eq!(up.kind(), AdjustmentKind::Purchase);
    assert_eq!(down.kind(), AdjustmentKind::Sale);

    assert_eq!(
        system.stock_client.apply_adjustment(up).await.unwrap().new_quantity,
        Some(30)
    );
    assert_eq!(
        system.stock_client.apply_adjustment(down).await.unwrap().new_quantity,
        Some(25)
    );

    // The generic read path agrees with the ledger
    let level = system.stock_client.stock_level(gadget).await.unwrap();
    assert_eq!(
        level,
        Some(StockLevel {
            product_id: gadget,
            quantity: 25
        })
    );

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_invalid_entry_changes_nothing() {
    let system = system_with(&[("Widget", 10)], AdjustmentPolicy::guarded()).await;

    let entries = [
        ("", "3"),
        ("1", ""),
        ("one", "3"),
        ("1", "-3"),
        ("1", "0"),
        ("1", "2.5"),
    ];
    for (raw_id, raw_qty) in entries {
        let err = system
            .stock_client
            .record(AdjustmentKind::Purchase, raw_id, raw_qty)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{raw_id:?} {raw_qty:?}");
    }

    assert_eq!(system.stock_client.get_quantity(ProductId(1)).await, Ok(10));
    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_empty_catalog_lists_nothing() {
    let system = system_with(&[], AdjustmentPolicy::guarded()).await;

    assert!(system.catalog.list_products().await.is_empty());
    assert!(system.catalog.list_stock().await.is_empty());
    assert_eq!(system.catalog.try_list_products().await, Ok(vec![]));

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_unreachable_storage_reports_connection() {
    let system = StockSystem::new(Arc::new(UnreachableGateway), AdjustmentPolicy::guarded());

    let err = system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", "5")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);

    // Reads degrade to empty lists
    assert!(system.catalog.list_products().await.is_empty());
    assert!(system.catalog.list_stock().await.is_empty());
    let err = system.catalog.try_list_stock().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_connect_starts_even_when_database_is_unreachable() {
    let mut config = StockConfig::default();
    config.gateway = GatewayConfig::new("sqlite:///nonexistent-cobra-dir/cobra.db");
    config.gateway.acquire_timeout = std::time::Duration::from_millis(200);

    let system = StockSystem::connect(&config)
        .await
        .expect("only a malformed url fails startup");

    let err = system
        .stock_client
        .record(AdjustmentKind::Sale, "1", "1")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(system.catalog.list_products().await.is_empty());

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_connect_seeds_demo_catalog_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("cobra.db").display());
    let config = StockConfig {
        gateway: GatewayConfig::new(url),
        ..StockConfig::default()
    };

    let first = StockSystem::connect(&config).await.expect("connect");
    let products = first.catalog.list_products().await;
    assert_eq!(
        products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Widget", "Gadget", "Sprocket"]
    );
    first
        .stock_client
        .record(AdjustmentKind::Sale, "1", "4")
        .await
        .expect("sale");
    first.shutdown().await.expect("shutdown");

    // A second start over the same file keeps the data and does not seed again
    let second = StockSystem::connect(&config).await.expect("reconnect");
    assert_eq!(second.catalog.list_products().await.len(), 3);
    assert_eq!(second.stock_client.get_quantity(ProductId(1)).await, Ok(6));
    second.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_out_of_range_delta_leaves_the_actor_running() {
    assert_eq!(
        AdjustmentRequest::new(ProductId(1), i64::MIN).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );

    // A raw action skips AdjustmentRequest; the ledger must still refuse it.
    let gateway = SqliteGateway::connect(&GatewayConfig::in_memory()).expect("valid url");
    gateway.ensure_schema().await.expect("schema");
    let widget = gateway.insert_product("Widget", 10).await.expect("insert");
    let gateway: Arc<dyn PersistenceGateway> = Arc::new(gateway);

    let (actor, generic_client) = ledger_actor::new();
    let handle = tokio::spawn(actor.run(LedgerContext::new(
        gateway.clone(),
        AdjustmentPolicy::guarded(),
    )));

    for delta in [i64::MIN, -(MAX_ADJUSTMENT + 1)] {
        let err = generic_client
            .perform_action(widget, StockAction::ApplyDelta(delta))
            .await
            .expect_err("oversized delta must fail");
        let err = err.downcast_entity::<StockError>().expect("typed error");
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "delta {delta}");
    }

    let client = StockClient::new(generic_client);
    let result = client
        .record(AdjustmentKind::Purchase, "1", "1")
        .await
        .expect("the actor keeps serving");
    assert_eq!(result.new_quantity, Some(11));

    drop(client);
    handle.await.expect("actor task");
    gateway.close().await;
}

#[tokio::test]
async fn test_overflowing_purchase_is_invalid_input() {
    let system = system_with(
        &[("Widget", 10), ("Bolts", i64::MAX - 1)],
        AdjustmentPolicy::guarded(),
    )
    .await;

    let err = system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", &i64::MAX.to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // Within the per-adjustment bound, but past the top of the stock range
    let err = system
        .stock_client
        .record(AdjustmentKind::Purchase, "2", "5")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(
        system.stock_client.get_quantity(ProductId(2)).await,
        Ok(i64::MAX - 1)
    );

    let sale = system
        .stock_client
        .record(AdjustmentKind::Sale, "1", "1")
        .await
        .expect("sale");
    assert_eq!(sale.new_quantity, Some(9));

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_storage_failure_rolls_back_and_frees_the_connection() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("cobra.db").display());

    let gateway = SqliteGateway::connect(&GatewayConfig {
        max_connections: 1,
        ..GatewayConfig::new(url.clone())
    })
    .expect("valid url");
    gateway.ensure_schema().await.expect("schema");
    gateway.insert_product("Widget", 10).await.expect("insert");

    // A second session installs a rule the adjustment will trip over after connecting
    let admin = sqlx::sqlite::SqlitePool::connect(&url).await.expect("admin pool");
    sqlx::query(
        "CREATE TRIGGER cap_stock BEFORE UPDATE ON products \
         WHEN NEW.stock > 100 BEGIN SELECT RAISE(ABORT, 'stock cap exceeded'); END",
    )
    .execute(&admin)
    .await
    .expect("trigger");
    admin.close().await;

    let system = StockSystem::new(Arc::new(gateway), AdjustmentPolicy::guarded());

    let err = system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", "500")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(system.stock_client.get_quantity(ProductId(1)).await, Ok(10));

    let result = system
        .stock_client
        .record(AdjustmentKind::Purchase, "1", "5")
        .await
        .expect("the only connection was released");
    assert_eq!(result.new_quantity, Some(15));

    system.shutdown().await.expect("shutdown");
}
