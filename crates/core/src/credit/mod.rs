//! Credit ledger rules shared by clients and suppliers.
//!
//! Both parties carry the same credit capability: a limit, a used amount,
//! credit days, and an active flag. This module implements the rules once
//! so the two record types cannot drift apart:
//! - Available credit and usage percentage
//! - Atomic use/release calculations with limit enforcement
//! - Credit purchase eligibility

pub mod account;
pub mod error;

#[cfg(test)]
mod account_props;

pub use account::CreditAccount;
pub use error::CreditError;
