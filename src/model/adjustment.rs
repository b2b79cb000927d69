//! Stock adjustments: what the operator asked for and what the ledger did with it.

use crate::ledger_actor::StockError;
use crate::model::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Direction of an adjustment. The sign is fixed here, once, instead of being
/// re-derived from a label at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Stock comes in.
    Purchase,
    /// Stock goes out.
    Sale,
}

impl AdjustmentKind {
    pub fn sign(self) -> i64 {
        match self {
            AdjustmentKind::Purchase => 1,
            AdjustmentKind::Sale => -1,
        }
    }

    /// Operator-facing title of the form for this kind.
    pub fn title(self) -> &'static str {
        match self {
            AdjustmentKind::Purchase => "Record Purchase",
            AdjustmentKind::Sale => "Record Sale",
        }
    }
}

impl Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::Purchase => write!(f, "purchase"),
            AdjustmentKind::Sale => write!(f, "sale"),
        }
    }
}

/// Largest quantity a single purchase or sale may move.
pub const MAX_ADJUSTMENT: i64 = 1_000_000_000;

/// A validated request to move a product's stock by `signed_quantity`.
///
/// Fields are private so that every instance went through one of the constructors:
/// the id is positive and the quantity is non-zero with a magnitude of at most
/// [`MAX_ADJUSTMENT`]. Not `Deserialize` for the same reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjustmentRequest {
    product_id: ProductId,
    signed_quantity: i64,
}

impl AdjustmentRequest {
    /// Builds a request from an already signed quantity.
    pub fn new(product_id: ProductId, signed_quantity: i64) -> Result<Self, StockError> {
        if product_id.0 <= 0 {
            return Err(StockError::InvalidInput(format!(
                "product id must be positive, got {}",
                product_id.0
            )));
        }
        check_delta(signed_quantity)?;
        Ok(Self {
            product_id,
            signed_quantity,
        })
    }

    /// Builds a request from raw operator entry.
    ///
    /// The product id is checked first, then the quantity. The quantity is the magnitude
    /// typed by the operator (a positive whole number); `kind` supplies the sign.
    pub fn parse(
        kind: AdjustmentKind,
        raw_product_id: &str,
        raw_quantity: &str,
    ) -> Result<Self, StockError> {
        let raw_product_id = raw_product_id.trim();
        if raw_product_id.is_empty() {
            return Err(StockError::InvalidInput("no product selected".to_string()));
        }
        let product_id = raw_product_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(ProductId)
            .ok_or_else(|| {
                StockError::InvalidInput(format!("invalid product id: {raw_product_id:?}"))
            })?;

        let raw_quantity = raw_quantity.trim();
        if raw_quantity.is_empty() {
            return Err(StockError::InvalidInput("no quantity entered".to_string()));
        }
        let magnitude = raw_quantity
            .parse::<i64>()
            .ok()
            .filter(|qty| *qty > 0)
            .ok_or_else(|| {
                StockError::InvalidInput(format!(
                    "quantity must be a positive whole number, got {raw_quantity:?}"
                ))
            })?;

        Self::new(product_id, kind.sign() * magnitude)
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn signed_quantity(&self) -> i64 {
        self.signed_quantity
    }

    pub fn kind(&self) -> AdjustmentKind {
        if self.signed_quantity > 0 {
            AdjustmentKind::Purchase
        } else {
            AdjustmentKind::Sale
        }
    }
}

/// Rejects a zero delta and any delta whose magnitude exceeds [`MAX_ADJUSTMENT`].
pub(crate) fn check_delta(delta: i64) -> Result<(), StockError> {
    if delta == 0 {
        return Err(StockError::InvalidInput(
            "quantity must not be zero".to_string(),
        ));
    }
    if delta.unsigned_abs() > MAX_ADJUSTMENT.unsigned_abs() {
        return Err(StockError::InvalidInput(format!(
            "quantity must be at most {MAX_ADJUSTMENT}, got {}",
            delta.unsigned_abs()
        )));
    }
    Ok(())
}

/// Outcome of a committed adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    pub success: bool,
    /// `None` only when the legacy policy let an adjustment through that matched no product.
    pub new_quantity: Option<i64>,
}

/// Rules applied on top of the raw delta update.
///
/// The default is the guarded policy. [`AdjustmentPolicy::legacy`] reproduces the
/// unguarded behaviour: stock may go negative, and an unknown product id is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentPolicy {
    pub reject_negative_stock: bool,
    pub reject_unknown_product: bool,
}

impl AdjustmentPolicy {
    pub fn guarded() -> Self {
        Self {
            reject_negative_stock: true,
            reject_unknown_product: true,
        }
    }

    pub fn legacy() -> Self {
        Self {
            reject_negative_stock: false,
            reject_unknown_product: false,
        }
    }
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self::guarded()
    }
}
