//! # Cobra Stock
//!
//! > **Purchase and sale recording for the Cobra distributor.**
//!
//! An operator picks a product, enters a quantity, and the system adjusts that
//! product's stock in a SQLite database: purchases add, sales subtract. A stock
//! report lists every product with its current quantity.
//!
//! ## 🏗️ Design
//!
//! Adjustments are serialized through a single ledger actor built on the generic
//! [`ResourceActor`](framework::ResourceActor), and every change is committed as one
//! atomic `UPDATE ... RETURNING` statement. Two processes sharing the same database file
//! therefore cannot lose each other's updates, and a sale that would take stock below
//! zero is refused inside that same statement.
//!
//! Reads (product list, stock report) go straight to the gateway through
//! [`CatalogClient`](clients::CatalogClient); they do not need serialization.
//!
//! ## 📦 Module Guide
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor loop, its client, typed errors and test mocks.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor).
//!
//! ### 2. The Ledger ([`ledger_actor`])
//! `StockLevel` as an `ActorEntity`: reads a quantity, applies a signed delta under an
//! [`AdjustmentPolicy`](model::AdjustmentPolicy).
//! - **Key items**: [`StockError`](ledger_actor::StockError), [`StockAction`](ledger_actor::StockAction).
//!
//! ### 3. Storage ([`gateway`])
//! The [`PersistenceGateway`](gateway::PersistenceGateway) trait and its SQLite
//! implementation.
//!
//! ### 4. The Interface ([`clients`])
//! - [`StockClient`](clients::StockClient) applies adjustments.
//! - [`CatalogClient`](clients::CatalogClient) lists products and stock.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, startup wiring and graceful shutdown.
//! - **Key items**: [`StockSystem`](lifecycle::StockSystem), [`StockConfig`](lifecycle::StockConfig).
//!
//! ### 6. The Console ([`console`])
//! A line-oriented operator shell driving the clients.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run against ./cobra.db, seeding a demo catalog on first start
//! RUST_LOG=info cargo run
//!
//! # Allow sales to take stock below zero
//! COBRA_ALLOW_NEGATIVE_STOCK=true cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod console;
pub mod framework;
pub mod gateway;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
