//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every multi-step financial mutation (code allocation, credit use,
//! lifecycle transitions, totals recomputation) runs inside a single
//! database transaction holding exclusive row locks on the rows it
//! read-checks-writes.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AddItemInput, ClientRepository, CreateClientInput, CreateOrderInput, CreateProductInput,
    CreateSupplierInput, CreditRepository, OrderError, OrderFilter, OrderItemError,
    OrderItemRepository, OrderRepository, OrderWithItems, PartyError, PartyKind, PartyRef,
    PartyRepoError, ProductRepository, SequenceError, SequenceRepository, SupplierRepository,
    UpdateClientInput, UpdateItemInput, UpdateOrderInput, UpdateProductInput, UpdateSupplierInput,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

pub use sea_orm::ConnectOptions;

/// Establishes a connection to the database.
///
/// Accepts a plain URL or a [`ConnectOptions`] carrying pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect<C>(options: C) -> Result<DatabaseConnection, DbErr>
where
    C: Into<ConnectOptions>,
{
    Database::connect(options).await
}
