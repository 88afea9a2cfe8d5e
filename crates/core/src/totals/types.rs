//! Totals domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw inputs of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemInput {
    /// Units ordered; must be strictly positive.
    pub quantity: i32,
    /// Price per unit; must not be negative.
    pub unit_price: Decimal,
    /// Line discount percentage in [0, 100].
    pub discount_pct: Decimal,
}

/// Derived monetary fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// Discount amount: `qty * price * pct / 100`, rounded to 2 dp.
    pub discount: Decimal,
    /// Line subtotal: `qty * price - discount`, rounded to 2 dp.
    pub subtotal: Decimal,
}

/// Derived monetary fields of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Order-level discount amount.
    pub discount: Decimal,
    /// Tax amount over the discounted base.
    pub tax: Decimal,
    /// Final total: `(subtotal - discount) + tax`.
    pub total: Decimal,
}

impl OrderTotals {
    /// Totals for an order with no line items.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}
