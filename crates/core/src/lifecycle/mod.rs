//! Order state machine and compensating effects.
//!
//! Orders move `Pending -> Completed -> Voided` (voiding a pending order
//! is also allowed). Completion applies stock and credit effects;
//! voiding a completed order reverses them exactly. The guards and the
//! effect arithmetic live here as pure functions; the database layer
//! wraps them in a single transaction.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use service::{LifecycleService, VoidPlan};
pub use types::{OrderKind, OrderStatus, PaymentMode};
