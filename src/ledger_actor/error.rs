//! Error types for the stock ledger.

use crate::gateway::GatewayError;
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur while reading or adjusting stock.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    /// Storage could not be reached; nothing was read or written.
    #[error("Storage unreachable: {0}")]
    Connection(String),

    /// The product selection or quantity entry is malformed. Raised before storage is touched.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A statement or commit failed after connecting; the transaction was rolled back.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The adjustment targets a product that does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A sale would take stock below zero.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The ledger actor is no longer running.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failure category of a [`StockError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    InvalidInput,
    Storage,
    NotFound,
    InsufficientStock,
    ActorCommunication,
}

impl StockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::Connection(_) => ErrorKind::Connection,
            StockError::InvalidInput(_) => ErrorKind::InvalidInput,
            StockError::Storage(_) => ErrorKind::Storage,
            StockError::NotFound(_) => ErrorKind::NotFound,
            StockError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            StockError::ActorCommunicationError(_) => ErrorKind::ActorCommunication,
        }
    }

    /// Short message for the operator.
    pub fn notification(&self) -> String {
        match self {
            StockError::Connection(_) => {
                "Could not reach the database. Please try again later.".to_string()
            }
            StockError::InvalidInput(_) => {
                "Please select a product and enter a valid quantity.".to_string()
            }
            StockError::Storage(_) => {
                "The database rejected the change. Stock was not modified.".to_string()
            }
            StockError::NotFound(_) => "The selected product does not exist.".to_string(),
            StockError::InsufficientStock { available, .. } => {
                format!("Not enough stock: only {available} available.")
            }
            StockError::ActorCommunicationError(_) => {
                "The stock service is not running.".to_string()
            }
        }
    }
}

impl From<GatewayError> for StockError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Connection(e) => StockError::Connection(e.to_string()),
            GatewayError::Storage(e) => StockError::Storage(e.to_string()),
        }
    }
}
