//! Type-safe wrappers around the ledger actor and the catalog.

pub mod actor_client;
pub mod catalog_client;
pub mod stock_client;

pub use actor_client::*;
pub use catalog_client::*;
pub use stock_client::*;
