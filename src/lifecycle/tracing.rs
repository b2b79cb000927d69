//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`).
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: ledger actor startup and shutdown, with the number of requests handled
//! - **Ledger Operations**: `Get` and `Action` requests, their outcome, and the product id
//! - **Client Calls**: one span per client method via `#[instrument]`
//! - **Storage**: pool configuration, committed deltas (`debug`), pool close
//!
//! ```bash
//! RUST_LOG=info cargo run     # outcomes only
//! RUST_LOG=debug cargo run    # requests, payloads and delta outcomes
//! ```
//!
//! With `RUST_LOG=debug`, recording a sale looks like:
//!
//! ```text
//! DEBUG record:apply_adjustment: Sending request kind=Sale
//! DEBUG Action entity_type="StockLevel" id=product_1 action=ApplyDelta(-4)
//! DEBUG apply_delta: Delta committed outcome=Applied { new_quantity: 6 }
//! INFO  Action ok entity_type="StockLevel" id=product_1
//! INFO  record:apply_adjustment: Adjustment recorded new_quantity=Some(6)
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes logging for the process. Later calls are no-ops.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type and span names carry the context
        .compact()
        .try_init();
}
