//! Property tests for lifecycle guards and stock arithmetic.

use proptest::prelude::*;

use comercia_shared::types::ProductId;

use super::error::LifecycleError;
use super::service::{LifecycleService, VoidPlan};
use super::types::{OrderKind, OrderStatus};

fn status_strategy() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Completed),
        Just(OrderStatus::Voided),
    ]
}

fn kind_strategy() -> impl Strategy<Value = OrderKind> {
    prop_oneof![Just(OrderKind::Purchase), Just(OrderKind::Sale)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Completion is allowed from exactly one state.
    #[test]
    fn prop_complete_only_from_pending(status in status_strategy()) {
        let result = LifecycleService::validate_complete(status);
        prop_assert_eq!(result.is_ok(), status == OrderStatus::Pending);
    }

    /// Voiding is idempotent at the guard: only an already-voided order
    /// is rejected, and only a completed one requires reversal.
    #[test]
    fn prop_void_plan_matches_status(status in status_strategy()) {
        match LifecycleService::validate_void(status) {
            Err(LifecycleError::AlreadyVoided) => {
                prop_assert_eq!(status, OrderStatus::Voided);
            }
            Ok(VoidPlan::ReverseEffects) => prop_assert_eq!(status, OrderStatus::Completed),
            Ok(VoidPlan::StatusOnly) => prop_assert_eq!(status, OrderStatus::Pending),
            Err(_) => prop_assert!(false, "unexpected error"),
        }
    }

    /// Reversal after a successful completion restores the exact stock.
    #[test]
    fn prop_reversal_restores_stock(
        kind in kind_strategy(),
        stock in 0i32..1_000_000,
        quantity in 1i32..10_000,
    ) {
        let id = ProductId::new();
        if let Ok(after) = LifecycleService::completion_stock(kind, id, stock, quantity) {
            prop_assert!(after >= 0);
            prop_assert_eq!(LifecycleService::reversal_stock(kind, after, quantity), stock);
        }
    }

    /// A sale never leaves negative stock; it fails instead.
    #[test]
    fn prop_sale_never_negative(
        stock in 0i32..1_000_000,
        quantity in 1i32..10_000,
    ) {
        let id = ProductId::new();
        match LifecycleService::completion_stock(OrderKind::Sale, id, stock, quantity) {
            Ok(after) => {
                prop_assert!(after >= 0);
                prop_assert_eq!(after, stock - quantity);
            }
            Err(LifecycleError::InsufficientStock { available, requested, .. }) => {
                prop_assert_eq!(available, stock);
                prop_assert_eq!(requested, quantity);
                prop_assert!(stock < quantity);
            }
            Err(_) => prop_assert!(false, "unexpected error"),
        }
    }
}
