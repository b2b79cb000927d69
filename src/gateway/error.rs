//! Error types for the persistence gateway.

use thiserror::Error;

/// Errors raised by a [`PersistenceGateway`](crate::gateway::PersistenceGateway).
///
/// The split follows the phase in which the failure happened: before a connection was
/// obtained, or after.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No connection could be obtained (bad URL, missing file, pool exhausted or closed).
    #[error("storage unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement or commit failed on an open connection.
    #[error("storage operation failed: {0}")]
    Storage(#[source] sqlx::Error),
}
