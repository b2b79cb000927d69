//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the stock tracker.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`StockConfig`] from the environment
//! 2. **Actor Creation & Dependency Injection** - [`StockSystem::new`] spawns the ledger
//!    actor and binds the gateway and policy at `run()`
//! 3. **Graceful Shutdown** - [`StockSystem::shutdown`] drops the clients, awaits the
//!    actor, and closes the gateway
//! 4. **Observability Setup** - [`setup_tracing`]
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of the ledger channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` after the queued
//!    requests are handled
//! 3. **Await completion** - Wait for the actor task to finish
//! 4. **Close storage** - The pool is closed last, so no in-flight adjustment loses
//!    its connection

pub mod config;
pub mod stock_system;
pub mod tracing;

pub use config::*;
pub use stock_system::*;
pub use self::tracing::*;
