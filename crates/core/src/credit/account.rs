//! Credit account state and operations.

use rust_decimal::Decimal;

use super::error::CreditError;

/// Snapshot of a party's credit fields.
///
/// Loaded from a client or supplier row; the operations here are pure and
/// return the new `credit_used` value for the caller to persist inside its
/// own transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditAccount {
    /// Maximum credit the party may hold.
    pub credit_limit: Decimal,
    /// Credit currently consumed.
    pub credit_used: Decimal,
    /// Payment term in days; zero means no credit terms.
    pub credit_days: i32,
    /// Whether the party is active.
    pub active: bool,
}

impl CreditAccount {
    /// Credit still available: `max(0, limit - used)`.
    #[must_use]
    pub fn credit_available(&self) -> Decimal {
        (self.credit_limit - self.credit_used).max(Decimal::ZERO)
    }

    /// True when the party has both available credit and credit terms.
    #[must_use]
    pub fn has_available_credit(&self) -> bool {
        self.credit_available() > Decimal::ZERO && self.credit_days > 0
    }

    /// Share of the limit currently consumed, as a percentage rounded to
    /// 2 decimal places. Zero when the limit is zero.
    #[must_use]
    pub fn credit_used_pct(&self) -> Decimal {
        if self.credit_limit == Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.credit_used / self.credit_limit * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Whether a credit purchase of `amount` is allowed:
    /// the party is active, has at least `amount` available, and has
    /// credit terms.
    #[must_use]
    pub fn can_buy_on_credit(&self, amount: Decimal) -> bool {
        self.active && self.credit_available() >= amount && self.credit_days > 0
    }

    /// Consumes `amount` of credit.
    ///
    /// Returns the new `credit_used` value. Fails without any partial
    /// application when the amount would push usage past the limit.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::Exceeded`] if `used + amount > limit`, or
    /// [`CreditError::NegativeAmount`] for a negative amount.
    pub fn use_credit(&self, amount: Decimal) -> Result<Decimal, CreditError> {
        if amount < Decimal::ZERO {
            return Err(CreditError::NegativeAmount(amount));
        }
        let new_used = self.credit_used + amount;
        if new_used > self.credit_limit {
            return Err(CreditError::Exceeded {
                requested: amount,
                available: self.credit_available(),
            });
        }
        Ok(new_used)
    }

    /// Releases `amount` of credit, flooring at zero.
    ///
    /// Never fails and never goes negative: releasing more than was used
    /// (e.g. a double reversal) clamps to zero.
    #[must_use]
    pub fn release_credit(&self, amount: Decimal) -> Decimal {
        (self.credit_used - amount).max(Decimal::ZERO)
    }
}
