//! Property tests for totals calculation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::TotalsService;
use super::types::LineItemInput;

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn pct_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn line_strategy() -> impl Strategy<Value = LineItemInput> {
    (1i32..10_000, price_strategy(), pct_strategy()).prop_map(
        |(quantity, unit_price, discount_pct)| LineItemInput {
            quantity,
            unit_price,
            discount_pct,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Valid line inputs always produce a non-negative subtotal no larger
    /// than the undiscounted base.
    #[test]
    fn prop_line_amounts_bounds(line in line_strategy()) {
        let amounts = TotalsService::line_amounts(&line).unwrap();
        let base = Decimal::from(line.quantity) * line.unit_price;

        prop_assert!(amounts.discount >= Decimal::ZERO);
        prop_assert!(amounts.subtotal >= Decimal::ZERO);
        prop_assert!(amounts.subtotal <= base);
        prop_assert_eq!(
            amounts.subtotal,
            TotalsService::round_money(base - amounts.discount)
        );
    }

    /// A 100% line discount yields a zero subtotal.
    #[test]
    fn prop_full_discount_zeroes_line(
        quantity in 1i32..10_000,
        unit_price in price_strategy(),
    ) {
        let amounts = TotalsService::line_amounts(&LineItemInput {
            quantity,
            unit_price,
            discount_pct: Decimal::ONE_HUNDRED,
        })
        .unwrap();
        prop_assert_eq!(amounts.subtotal, Decimal::ZERO);
    }

    /// The order total invariant `total = (subtotal - discount) + tax`
    /// holds exactly at 2 decimal places for any line combination.
    #[test]
    fn prop_order_total_invariant(
        subtotals in prop::collection::vec(price_strategy(), 0..20),
        discount_pct in pct_strategy(),
        tax_pct in pct_strategy(),
    ) {
        let totals = TotalsService::order_totals(&subtotals, discount_pct, tax_pct).unwrap();

        prop_assert_eq!(
            totals.total,
            TotalsService::round_money(totals.subtotal - totals.discount + totals.tax)
        );
        prop_assert!(totals.discount >= Decimal::ZERO);
        prop_assert!(totals.tax >= Decimal::ZERO);
        prop_assert!(totals.total >= Decimal::ZERO);
        // Round-trip: all outputs already sit on 2 decimal places
        prop_assert_eq!(totals.total, TotalsService::round_money(totals.total));
    }

    /// Recomputation is deterministic: the same lines give the same totals.
    #[test]
    fn prop_order_totals_deterministic(
        subtotals in prop::collection::vec(price_strategy(), 0..20),
        discount_pct in pct_strategy(),
        tax_pct in pct_strategy(),
    ) {
        let first = TotalsService::order_totals(&subtotals, discount_pct, tax_pct).unwrap();
        let second = TotalsService::order_totals(&subtotals, discount_pct, tax_pct).unwrap();
        prop_assert_eq!(first, second);
    }
}
