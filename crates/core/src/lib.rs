//! Core business logic for Comercia.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `credit` - Credit ledger rules shared by clients and suppliers
//! - `totals` - Line item and order totals calculation
//! - `lifecycle` - Order state machine and compensating effects
//! - `sequence` - Sequential document code formatting

pub mod credit;
pub mod lifecycle;
pub mod sequence;
pub mod totals;
