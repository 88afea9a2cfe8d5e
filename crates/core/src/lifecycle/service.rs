//! Lifecycle transition guards and effect arithmetic.

use chrono::NaiveDate;
use comercia_shared::types::ProductId;

use super::error::LifecycleError;
use super::types::{OrderKind, OrderStatus, PaymentMode};

/// What a void transition must do, determined by the prior status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidPlan {
    /// Order was completed: reverse stock and any credit use.
    ReverseEffects,
    /// Order was still pending: only the status changes.
    StatusOnly,
}

/// Stateless lifecycle service.
///
/// All functions are pure; callers execute the resulting plan inside one
/// database transaction so a failure at any step leaves every row as it
/// was before the call.
pub struct LifecycleService;

impl LifecycleService {
    /// Validates that an order can be completed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidState`] unless the order is
    /// `Pending`.
    pub fn validate_complete(status: OrderStatus) -> Result<(), LifecycleError> {
        if status == OrderStatus::Pending {
            Ok(())
        } else {
            Err(LifecycleError::InvalidState { current: status })
        }
    }

    /// Validates that an order can be voided and says what the void must
    /// reverse.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyVoided`] if the order is already
    /// `Voided`.
    pub fn validate_void(status: OrderStatus) -> Result<VoidPlan, LifecycleError> {
        match status {
            OrderStatus::Voided => Err(LifecycleError::AlreadyVoided),
            OrderStatus::Completed => Ok(VoidPlan::ReverseEffects),
            OrderStatus::Pending => Ok(VoidPlan::StatusOnly),
        }
    }

    /// Stock level after completing one line item.
    ///
    /// Purchases receive stock (`+qty`); sales issue stock (`-qty`) and
    /// must not drive it negative.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InsufficientStock`] when a sale asks for
    /// more units than are available, and
    /// [`LifecycleError::StockOverflow`] when a purchase would push the
    /// level past `i32::MAX`.
    pub fn completion_stock(
        kind: OrderKind,
        product_id: ProductId,
        stock: i32,
        quantity: i32,
    ) -> Result<i32, LifecycleError> {
        match kind {
            OrderKind::Purchase => stock
                .checked_add(quantity)
                .ok_or(LifecycleError::StockOverflow { product_id }),
            OrderKind::Sale => {
                if stock < quantity {
                    return Err(LifecycleError::InsufficientStock {
                        product_id,
                        available: stock,
                        requested: quantity,
                    });
                }
                Ok(stock - quantity)
            }
        }
    }

    /// Stock level after reversing one completed line item: the inverse
    /// of [`Self::completion_stock`]. Saturates at the `i32` bounds so a
    /// void never fails on arithmetic.
    #[must_use]
    pub fn reversal_stock(kind: OrderKind, stock: i32, quantity: i32) -> i32 {
        match kind {
            OrderKind::Purchase => stock.saturating_sub(quantity),
            OrderKind::Sale => stock.saturating_add(quantity),
        }
    }

    /// True only for credit orders with a due date strictly in the past.
    #[must_use]
    pub fn is_overdue(
        payment_mode: PaymentMode,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> bool {
        if !payment_mode.is_credit() {
            return false;
        }
        due_date.is_some_and(|due| due < today)
    }

    /// Signed days until the due date (negative means overdue).
    ///
    /// `None` for cash orders or when no due date is set.
    #[must_use]
    pub fn days_until_due(
        payment_mode: PaymentMode,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<i64> {
        if !payment_mode.is_credit() {
            return None;
        }
        due_date.map(|due| (due - today).num_days())
    }
}
