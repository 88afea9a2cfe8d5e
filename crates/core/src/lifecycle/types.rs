//! Order lifecycle domain types.

use serde::{Deserialize, Serialize};

/// Whether an order buys from a supplier or sells to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Purchase from a supplier; completion increases product stock.
    Purchase,
    /// Sale to a client; completion decreases product stock.
    Sale,
}

impl OrderKind {
    /// Stable string form used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
        }
    }
}

/// Order status in the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state; totals and items can still change.
    Pending,
    /// Effects applied; reversible only by voiding.
    Completed,
    /// Terminal state; all effects reversed or never applied.
    Voided,
}

impl OrderStatus {
    /// True while line items may still be added, updated, or removed.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once the order has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Voided)
    }

    /// Stable string form used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Voided => "voided",
        }
    }
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Paid immediately; no credit ledger involvement.
    Cash,
    /// Paid on credit terms; completion consumes the party's credit.
    Credit,
}

impl PaymentMode {
    /// True for credit-funded orders.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Stable string form used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Credit => "credit",
        }
    }
}
