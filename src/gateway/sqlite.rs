//! SQLite implementation of the persistence gateway.

use crate::gateway::{DeltaOutcome, GatewayError, PersistenceGateway};
use crate::model::{Product, ProductId, StockEntry};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Connection, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Connection settings for [`SqliteGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub create_if_missing: bool,
}

impl GatewayConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(3),
            create_if_missing: true,
        }
    }

    /// A private in-memory database, mostly for tests.
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            ..Self::new("sqlite::memory:")
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Gateway over a lazily connected `SqlitePool`.
///
/// Nothing touches the database until the first operation, so an unreachable database is
/// reported per call as [`GatewayError::Connection`] instead of failing construction.
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Builds the pool. Only a malformed URL fails here.
    pub fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(GatewayError::Connection)?
            .create_if_missing(config.create_if_missing);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);
        if config.is_in_memory() {
            // The database lives only as long as a connection does.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        info!(
            url = %config.database_url,
            max_connections = config.max_connections,
            "Storage pool configured"
        );
        Ok(Self {
            pool: pool_options.connect_lazy_with(options),
        })
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, GatewayError> {
        self.pool.acquire().await.map_err(GatewayError::Connection)
    }

    /// Creates the `products` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), GatewayError> {
        let mut conn = self.acquire().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id    INTEGER PRIMARY KEY AUTOINCREMENT,
                name  TEXT    NOT NULL CHECK (name <> ''),
                stock INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&mut *conn)
        .await
        .map_err(GatewayError::Storage)?;
        Ok(())
    }

    /// Adds a catalog entry. Used to seed the catalog; products are otherwise managed
    /// outside this crate.
    #[instrument(skip(self))]
    pub async fn insert_product(&self, name: &str, stock: i64) -> Result<ProductId, GatewayError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("INSERT INTO products (name, stock) VALUES (?1, ?2)")
            .bind(name)
            .bind(stock)
            .execute(&mut *conn)
            .await
            .map_err(GatewayError::Storage)?;
        let id = ProductId(result.last_insert_rowid());
        debug!(%id, "Product inserted");
        Ok(id)
    }

    pub async fn product_count(&self) -> Result<i64, GatewayError> {
        let mut conn = self.acquire().await?;
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *conn)
            .await
            .map_err(GatewayError::Storage)
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query("SELECT id, name FROM products ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(GatewayError::Storage)?;

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                let name: String = row.try_get("name")?;
                Ok(Product::new(ProductId(id), name))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(GatewayError::Storage)
    }

    async fn list_stock(&self) -> Result<Vec<StockEntry>, GatewayError> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query("SELECT name, stock FROM products ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(GatewayError::Storage)?;

        rows.iter()
            .map(|row| {
                Ok(StockEntry {
                    name: row.try_get("name")?,
                    quantity: row.try_get("stock")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(GatewayError::Storage)
    }

    async fn get_quantity(&self, id: ProductId) -> Result<Option<i64>, GatewayError> {
        let mut conn = self.acquire().await?;
        sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&mut *conn)
            .await
            .map_err(GatewayError::Storage)
    }

    #[instrument(skip(self))]
    async fn apply_delta(
        &self,
        id: ProductId,
        delta: i64,
        allow_negative: bool,
    ) -> Result<DeltaOutcome, GatewayError> {
        let mut conn = self.acquire().await?;
        // Dropping the transaction without commit rolls it back.
        let mut tx = conn.begin().await.map_err(GatewayError::Storage)?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
               SET stock = stock + ?1
             WHERE id = ?2
               AND typeof(stock + ?1) = 'integer'
               AND (?3 OR stock + ?1 >= 0)
            RETURNING stock
            "#,
        )
        .bind(delta)
        .bind(id.0)
        .bind(allow_negative)
        .fetch_optional(&mut *tx)
        .await
        .map_err(GatewayError::Storage)?;

        let outcome = match updated {
            Some(new_quantity) => DeltaOutcome::Applied { new_quantity },
            None => {
                // Zero rows: unknown id, integer overflow (SQLite promotes it to REAL),
                // or a filtered-out sale.
                let current: Option<i64> =
                    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                        .bind(id.0)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(GatewayError::Storage)?;
                match current {
                    Some(current) if current.checked_add(delta).is_none() => {
                        DeltaOutcome::OutOfRange { current }
                    }
                    Some(available) => DeltaOutcome::Insufficient { available },
                    None => DeltaOutcome::Missing,
                }
            }
        };

        tx.commit().await.map_err(GatewayError::Storage)?;
        debug!(?outcome, "Delta committed");
        Ok(outcome)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Storage pool closed");
    }
}
