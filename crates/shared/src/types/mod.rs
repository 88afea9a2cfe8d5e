//! Shared domain-agnostic types.

pub mod id;
pub mod pagination;

pub use id::{ClientId, OrderId, OrderItemId, ProductId, SupplierId};
pub use pagination::{Page, PageParams};
