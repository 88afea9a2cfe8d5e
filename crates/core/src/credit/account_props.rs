//! Property tests for credit account operations.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::account::CreditAccount;
use super::error::CreditError;

/// Strategy for non-negative monetary amounts with 2 decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn account_strategy() -> impl Strategy<Value = CreditAccount> {
    (amount_strategy(), amount_strategy(), 0i32..365, any::<bool>()).prop_map(
        |(limit, used_raw, days, active)| CreditAccount {
            credit_limit: limit,
            // Keep the invariant 0 <= used <= limit in generated accounts
            credit_used: used_raw.min(limit),
            credit_days: days,
            active,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful `use_credit` keeps usage within `[0, limit]`.
    #[test]
    fn prop_use_credit_preserves_invariant(
        account in account_strategy(),
        amount in amount_strategy(),
    ) {
        if let Ok(new_used) = account.use_credit(amount) {
            prop_assert!(new_used >= Decimal::ZERO);
            prop_assert!(new_used <= account.credit_limit);
            prop_assert_eq!(new_used, account.credit_used + amount);
        }
    }

    /// `use_credit` fails exactly when the amount does not fit.
    #[test]
    fn prop_use_credit_fails_iff_over_limit(
        account in account_strategy(),
        amount in amount_strategy(),
    ) {
        let result = account.use_credit(amount);
        if account.credit_used + amount > account.credit_limit {
            prop_assert!(
                matches!(result, Err(CreditError::Exceeded { .. })),
                "expected CreditError::Exceeded",
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// `release_credit` never produces a negative usage.
    #[test]
    fn prop_release_credit_floors_at_zero(
        account in account_strategy(),
        amount in amount_strategy(),
    ) {
        let new_used = account.release_credit(amount);
        prop_assert!(new_used >= Decimal::ZERO);
        prop_assert!(new_used <= account.credit_used);
    }

    /// Releasing exactly what was used restores the starting point:
    /// use followed by release of the same amount is an identity.
    #[test]
    fn prop_use_then_release_round_trips(
        account in account_strategy(),
        amount in amount_strategy(),
    ) {
        if let Ok(after_use) = account.use_credit(amount) {
            let restored = CreditAccount { credit_used: after_use, ..account };
            prop_assert_eq!(restored.release_credit(amount), account.credit_used);
        }
    }

    /// Any interleaving of successful uses and releases stays within bounds.
    #[test]
    fn prop_sequence_of_ops_preserves_invariant(
        limit in amount_strategy(),
        ops in prop::collection::vec((any::<bool>(), amount_strategy()), 0..20),
    ) {
        let mut account = CreditAccount {
            credit_limit: limit,
            credit_used: Decimal::ZERO,
            credit_days: 30,
            active: true,
        };

        for (is_use, amount) in ops {
            if is_use {
                if let Ok(new_used) = account.use_credit(amount) {
                    account.credit_used = new_used;
                }
            } else {
                account.credit_used = account.release_credit(amount);
            }
            prop_assert!(account.credit_used >= Decimal::ZERO);
            prop_assert!(account.credit_used <= account.credit_limit);
        }
    }

    /// `can_buy_on_credit` is consistent with `use_credit` for active
    /// parties with credit terms.
    #[test]
    fn prop_can_buy_matches_use(
        account in account_strategy(),
        amount in amount_strategy(),
    ) {
        if account.can_buy_on_credit(amount) {
            prop_assert!(account.use_credit(amount).is_ok());
        }
    }
}
