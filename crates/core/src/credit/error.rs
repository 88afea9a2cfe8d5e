//! Credit error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during credit operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    /// Requested credit use would exceed the party's limit.
    #[error("Credit exceeded: requested {requested}, available {available}")]
    Exceeded {
        /// The amount the caller attempted to use.
        requested: Decimal,
        /// The credit still available before the attempt.
        available: Decimal,
    },

    /// Credit amounts must not be negative.
    #[error("Credit amount cannot be negative: {0}")]
    NegativeAmount(Decimal),
}
