//! Repository layer for database operations.
//!
//! Each repository owns a `DatabaseConnection` and runs every multi-step
//! mutation inside a single database transaction. Rows that are read,
//! checked, and then written are locked with `SELECT ... FOR UPDATE`
//! first so concurrent writers serialize instead of clobbering each
//! other.

pub mod client;
pub mod credit;
pub mod order;
pub mod order_item;
pub mod product;
pub mod sequence;
pub mod supplier;

pub use client::{ClientRepository, CreateClientInput, PartyRepoError, UpdateClientInput};
pub use credit::{CreditRepository, PartyError, PartyKind, PartyRef};
pub use order::{CreateOrderInput, OrderError, OrderFilter, OrderRepository, OrderWithItems, UpdateOrderInput};
pub use order_item::{AddItemInput, OrderItemError, OrderItemRepository, UpdateItemInput};
pub use product::{CreateProductInput, ProductRepository, UpdateProductInput};
pub use sequence::{SequenceError, SequenceRepository};
pub use supplier::{CreateSupplierInput, SupplierRepository, UpdateSupplierInput};

/// True when a database error is Postgres refusing to grant a row lock
/// within `lock_timeout` (SQLSTATE 55P03).
pub(crate) fn is_lock_timeout(err: &sea_orm::DbErr) -> bool {
    let message = err.to_string();
    message.contains("55P03") || message.contains("lock timeout")
}
