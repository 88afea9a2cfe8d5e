//! Line item and order totals calculation.
//!
//! An order's monetary fields are all derived: each line item carries a
//! computed discount and subtotal, and the order aggregates them into
//! `subtotal / discount / tax / total`. Nothing here touches stock or
//! credit; recomputation is a pure function over the current line items.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::TotalsError;
pub use service::TotalsService;
pub use types::{LineAmounts, LineItemInput, OrderTotals};
