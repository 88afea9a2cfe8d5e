//! Shared test harness: an in-memory SQLite database with the schema
//! built from the entity definitions, plus fixture helpers.

#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, ConnectionTrait, DatabaseConnection, DbBackend, Schema};

use comercia_db::entities::{clients, order_items, orders, products, sequences, suppliers};
use comercia_db::{
    ClientRepository, CreateClientInput, CreateProductInput, CreateSupplierInput,
    ProductRepository, SupplierRepository,
};

/// Connects to a fresh in-memory SQLite database and creates all tables.
///
/// A single pooled connection keeps the in-memory database alive and
/// shared across the whole test.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = comercia_db::connect(options)
        .await
        .expect("failed to connect to sqlite");

    let schema = Schema::new(DbBackend::Sqlite);
    let statements = [
        schema.create_table_from_entity(clients::Entity),
        schema.create_table_from_entity(suppliers::Entity),
        schema.create_table_from_entity(products::Entity),
        schema.create_table_from_entity(sequences::Entity),
        schema.create_table_from_entity(orders::Entity),
        schema.create_table_from_entity(order_items::Entity),
    ];
    for statement in statements {
        db.execute(DbBackend::Sqlite.build(&statement))
            .await
            .expect("failed to create table");
    }

    db
}

/// Creates a client with the given credit terms.
pub async fn create_client(
    db: &DatabaseConnection,
    name: &str,
    credit_limit: Decimal,
    credit_days: i32,
) -> clients::Model {
    ClientRepository::new(db.clone())
        .create(CreateClientInput {
            name: name.to_owned(),
            credit_limit,
            credit_days,
        })
        .await
        .expect("failed to create client")
}

/// Creates a supplier with the given credit terms.
pub async fn create_supplier(
    db: &DatabaseConnection,
    name: &str,
    credit_limit: Decimal,
    credit_days: i32,
) -> suppliers::Model {
    SupplierRepository::new(db.clone())
        .create(CreateSupplierInput {
            name: name.to_owned(),
            credit_limit,
            credit_days,
        })
        .await
        .expect("failed to create supplier")
}

/// Creates a product with the given price and opening stock.
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    initial_stock: i32,
) -> products::Model {
    ProductRepository::new(db.clone())
        .create(CreateProductInput {
            name: name.to_owned(),
            price,
            initial_stock,
        })
        .await
        .expect("failed to create product")
}
