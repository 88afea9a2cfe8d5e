//! Database seeder for Comercia development and testing.
//!
//! Seeds demo clients, suppliers, and products through the repositories
//! so every row gets a real sequential code.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use comercia_db::entities::clients;
use comercia_db::{
    ClientRepository, CreateClientInput, CreateProductInput, CreateSupplierInput,
    ProductRepository, SupplierRepository,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = comercia_db::connect(database_url.as_str())
        .await
        .expect("Failed to connect to database");

    let existing = clients::Entity::find()
        .count(&db)
        .await
        .expect("Failed to query clients");
    if existing > 0 {
        println!("Database already seeded, skipping.");
        return;
    }

    println!("Seeding clients...");
    seed_clients(&db).await;

    println!("Seeding suppliers...");
    seed_suppliers(&db).await;

    println!("Seeding products...");
    seed_products(&db).await;

    println!("Seeding complete!");
}

async fn seed_clients(db: &DatabaseConnection) {
    let repo = ClientRepository::new(db.clone());
    let demo: [(&str, Decimal, i32); 3] = [
        ("Acme Retail", dec!(1000.00), 30),
        ("Blue Harbor Trading", dec!(5000.00), 45),
        ("Walk-in Customer", Decimal::ZERO, 0),
    ];

    for (name, credit_limit, credit_days) in demo {
        let client = repo
            .create(CreateClientInput {
                name: name.to_string(),
                credit_limit,
                credit_days,
            })
            .await
            .expect("Failed to seed client");
        println!("  Created client {}: {}", client.code, client.name);
    }
}

async fn seed_suppliers(db: &DatabaseConnection) {
    let repo = SupplierRepository::new(db.clone());
    let demo: [(&str, Decimal, i32); 2] = [
        ("Norte Distribution", dec!(10000.00), 60),
        ("Cash & Carry Wholesale", Decimal::ZERO, 0),
    ];

    for (name, credit_limit, credit_days) in demo {
        let supplier = repo
            .create(CreateSupplierInput {
                name: name.to_string(),
                credit_limit,
                credit_days,
            })
            .await
            .expect("Failed to seed supplier");
        println!("  Created supplier {}: {}", supplier.code, supplier.name);
    }
}

async fn seed_products(db: &DatabaseConnection) {
    let repo = ProductRepository::new(db.clone());
    let demo: [(&str, Decimal, i32); 4] = [
        ("Espresso Beans 1kg", dec!(18.50), 40),
        ("Ceramic Mug", dec!(6.75), 120),
        ("Pour-over Kettle", dec!(42.00), 15),
        ("Filter Papers x100", dec!(4.20), 200),
    ];

    for (name, price, initial_stock) in demo {
        let product = repo
            .create(CreateProductInput {
                name: name.to_string(),
                price,
                initial_stock,
            })
            .await
            .expect("Failed to seed product");
        println!("  Created product {}: {}", product.code, product.name);
    }
}
