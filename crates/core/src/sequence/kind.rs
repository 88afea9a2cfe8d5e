//! Entity kinds that receive sequential codes.

use serde::{Deserialize, Serialize};

/// An entity type with its own independent code sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// Client codes (`CLI...`).
    Client,
    /// Supplier codes (`SUP...`).
    Supplier,
    /// Product codes (`PRO...`).
    Product,
    /// Purchase order codes (`PUR...`).
    Purchase,
    /// Sale order codes (`SAL...`).
    Sale,
}

impl SequenceKind {
    /// The code prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Client => "CLI",
            Self::Supplier => "SUP",
            Self::Product => "PRO",
            Self::Purchase => "PUR",
            Self::Sale => "SAL",
        }
    }

    /// Stable key used for the counter row in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Supplier => "supplier",
            Self::Product => "product",
            Self::Purchase => "purchase",
            Self::Sale => "sale",
        }
    }
}

impl std::fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes = [
            SequenceKind::Client.prefix(),
            SequenceKind::Supplier.prefix(),
            SequenceKind::Product.prefix(),
            SequenceKind::Purchase.prefix(),
            SequenceKind::Sale.prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_matches_storage_key() {
        assert_eq!(SequenceKind::Purchase.to_string(), "purchase");
        assert_eq!(SequenceKind::Sale.as_str(), "sale");
    }
}
