//! Lifecycle error types.

use comercia_shared::types::ProductId;
use thiserror::Error;

use super::types::OrderStatus;

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// Transition attempted from a state that does not allow it.
    #[error("Only pending orders can be completed, current status is {current:?}")]
    InvalidState {
        /// The order's current status.
        current: OrderStatus,
    },

    /// The order was already voided.
    #[error("Order is already voided")]
    AlreadyVoided,

    /// Completing a sale would drive a product's stock negative.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// The product short of stock.
        product_id: ProductId,
        /// Units currently in stock.
        available: i32,
        /// Units the sale requires.
        requested: i32,
    },

    /// Completing a purchase would push a product's stock past the
    /// representable maximum.
    #[error("Stock overflow for product {product_id}")]
    StockOverflow {
        /// The product whose stock would overflow.
        product_id: ProductId,
    },
}
