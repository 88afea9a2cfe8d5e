//! Totals validation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating line items or percentages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// Line item quantity must be strictly positive.
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(i32),

    /// Unit price must not be negative.
    #[error("Unit price cannot be negative, got {0}")]
    NegativeUnitPrice(Decimal),

    /// A percentage must lie within [0, 100].
    #[error("Percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(Decimal),
}
