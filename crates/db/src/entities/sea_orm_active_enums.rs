//! String-backed active enums shared by the order entities.
//!
//! Stored as plain strings so the same entities work on Postgres and on
//! the SQLite backend used by the integration tests. Conversions to and
//! from the `comercia-core` lifecycle enums live here so repositories
//! can hand core the pure types it expects.

use comercia_core::lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether an order buys from a supplier or sells to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Purchase from a supplier.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Sale to a client.
    #[sea_orm(string_value = "sale")]
    Sale,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Effects applied.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Terminal state.
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Paid immediately.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Paid on credit terms.
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<OrderKind> for lifecycle::OrderKind {
    fn from(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Purchase => Self::Purchase,
            OrderKind::Sale => Self::Sale,
        }
    }
}

impl From<lifecycle::OrderKind> for OrderKind {
    fn from(kind: lifecycle::OrderKind) -> Self {
        match kind {
            lifecycle::OrderKind::Purchase => Self::Purchase,
            lifecycle::OrderKind::Sale => Self::Sale,
        }
    }
}

impl From<OrderStatus> for lifecycle::OrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Completed => Self::Completed,
            OrderStatus::Voided => Self::Voided,
        }
    }
}

impl From<lifecycle::OrderStatus> for OrderStatus {
    fn from(status: lifecycle::OrderStatus) -> Self {
        match status {
            lifecycle::OrderStatus::Pending => Self::Pending,
            lifecycle::OrderStatus::Completed => Self::Completed,
            lifecycle::OrderStatus::Voided => Self::Voided,
        }
    }
}

impl From<PaymentMode> for lifecycle::PaymentMode {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::Credit => Self::Credit,
        }
    }
}

impl From<lifecycle::PaymentMode> for PaymentMode {
    fn from(mode: lifecycle::PaymentMode) -> Self {
        match mode {
            lifecycle::PaymentMode::Cash => Self::Cash,
            lifecycle::PaymentMode::Credit => Self::Credit,
        }
    }
}
