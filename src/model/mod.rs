//! Pure data structures shared by the catalog, the ledger actor and the console.

pub mod adjustment;
pub mod product;

pub use adjustment::*;
pub use product::*;
