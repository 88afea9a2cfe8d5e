//! Totals calculation service.
//!
//! Pure functions over line item values. The database layer calls these
//! after every line item write so the persisted order totals are never
//! stale relative to its own items.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::TotalsError;
use super::types::{LineAmounts, LineItemInput, OrderTotals};

/// Stateless totals calculation service.
pub struct TotalsService;

impl TotalsService {
    /// Rounds a monetary amount to 2 decimal places, midpoint away from
    /// zero. Banker's rounding (the `Decimal` default) would differ on
    /// exact midpoints like 0.125.
    #[must_use]
    pub fn round_money(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Validates a percentage input.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::InvalidPercentage`] outside [0, 100].
    pub fn validate_percentage(pct: Decimal) -> Result<(), TotalsError> {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(TotalsError::InvalidPercentage(pct));
        }
        Ok(())
    }

    /// Computes a line item's derived discount and subtotal.
    ///
    /// `base = qty * unit_price`; `discount = base * pct / 100`;
    /// `subtotal = base - discount`; both rounded to 2 dp.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] for a non-positive quantity, negative
    /// unit price, or out-of-range discount percentage.
    pub fn line_amounts(input: &LineItemInput) -> Result<LineAmounts, TotalsError> {
        if input.quantity <= 0 {
            return Err(TotalsError::NonPositiveQuantity(input.quantity));
        }
        if input.unit_price < Decimal::ZERO {
            return Err(TotalsError::NegativeUnitPrice(input.unit_price));
        }
        Self::validate_percentage(input.discount_pct)?;

        let base = Decimal::from(input.quantity) * input.unit_price;
        let discount = Self::round_money(base * input.discount_pct / Decimal::ONE_HUNDRED);
        let subtotal = Self::round_money(base - discount);

        Ok(LineAmounts { discount, subtotal })
    }

    /// Recomputes an order's totals from its line subtotals.
    ///
    /// `subtotal = Σ line.subtotal`; `discount = subtotal * discount_pct /
    /// 100`; `base = subtotal - discount`; `tax = base * tax_pct / 100`;
    /// `total = base + tax`. All outputs rounded to 2 dp.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::InvalidPercentage`] for an out-of-range
    /// discount or tax percentage.
    pub fn order_totals(
        line_subtotals: &[Decimal],
        discount_pct: Decimal,
        tax_pct: Decimal,
    ) -> Result<OrderTotals, TotalsError> {
        Self::validate_percentage(discount_pct)?;
        Self::validate_percentage(tax_pct)?;

        let subtotal: Decimal = line_subtotals.iter().copied().sum();
        let discount = Self::round_money(subtotal * discount_pct / Decimal::ONE_HUNDRED);
        let base = subtotal - discount;
        let tax = Self::round_money(base * tax_pct / Decimal::ONE_HUNDRED);
        let total = Self::round_money(base + tax);

        Ok(OrderTotals {
            subtotal: Self::round_money(subtotal),
            discount,
            tax,
            total,
        })
    }
}
