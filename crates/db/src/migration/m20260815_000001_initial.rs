//! Initial database migration.
//!
//! Creates the parties, products, sequences, and order tables. Enum-like
//! columns are stored as text with CHECK constraints so the same schema
//! shape works on both Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PARTIES
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;

        // ============================================================
        // PART 2: CATALOG
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;

        // ============================================================
        // PART 3: CODE SEQUENCES
        // ============================================================
        db.execute_unprepared(SEQUENCES_SQL).await?;

        // ============================================================
        // PART 4: ORDERS & LINE ITEMS
        // ============================================================
        db.execute_unprepared(ORDERS_SQL).await?;
        db.execute_unprepared(ORDER_ITEMS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    credit_limit NUMERIC(12, 2) NOT NULL DEFAULT 0,
    credit_used NUMERIC(12, 2) NOT NULL DEFAULT 0,
    credit_days INTEGER NOT NULL DEFAULT 0,
    total_transacted NUMERIC(14, 2) NOT NULL DEFAULT 0,
    last_transaction_date DATE,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_clients_credit_limit CHECK (credit_limit >= 0),
    CONSTRAINT chk_clients_credit_used CHECK (credit_used >= 0),
    CONSTRAINT chk_clients_credit_days CHECK (credit_days >= 0)
);

CREATE INDEX idx_clients_active ON clients(active);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    credit_limit NUMERIC(12, 2) NOT NULL DEFAULT 0,
    credit_used NUMERIC(12, 2) NOT NULL DEFAULT 0,
    credit_days INTEGER NOT NULL DEFAULT 0,
    total_transacted NUMERIC(14, 2) NOT NULL DEFAULT 0,
    last_transaction_date DATE,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_suppliers_credit_limit CHECK (credit_limit >= 0),
    CONSTRAINT chk_suppliers_credit_used CHECK (credit_used >= 0),
    CONSTRAINT chk_suppliers_credit_days CHECK (credit_days >= 0)
);

CREATE INDEX idx_suppliers_active ON suppliers(active);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    price NUMERIC(12, 2) NOT NULL DEFAULT 0,
    stock INTEGER NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_products_price CHECK (price >= 0)
);

CREATE INDEX idx_products_active ON products(active);
";

const SEQUENCES_SQL: &str = r"
CREATE TABLE sequences (
    entity VARCHAR(20) PRIMARY KEY,
    last_number BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_sequences_last_number CHECK (last_number >= 0)
);

INSERT INTO sequences (entity, last_number) VALUES
('client', 0),
('supplier', 0),
('product', 0),
('purchase', 0),
('sale', 0);
";

const ORDERS_SQL: &str = r"
CREATE TABLE orders (
    id UUID PRIMARY KEY,
    kind VARCHAR(10) NOT NULL,
    code VARCHAR(20) NOT NULL UNIQUE,
    party_id UUID NOT NULL,
    order_date DATE NOT NULL,
    due_date DATE,
    payment_mode VARCHAR(10) NOT NULL,
    status VARCHAR(10) NOT NULL DEFAULT 'pending',
    subtotal NUMERIC(12, 2) NOT NULL DEFAULT 0,
    discount_pct NUMERIC(5, 2) NOT NULL DEFAULT 0,
    discount NUMERIC(12, 2) NOT NULL DEFAULT 0,
    tax_pct NUMERIC(5, 2) NOT NULL DEFAULT 0,
    tax NUMERIC(12, 2) NOT NULL DEFAULT 0,
    total NUMERIC(12, 2) NOT NULL DEFAULT 0,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_orders_kind CHECK (kind IN ('purchase', 'sale')),
    CONSTRAINT chk_orders_payment_mode CHECK (payment_mode IN ('cash', 'credit')),
    CONSTRAINT chk_orders_status CHECK (status IN ('pending', 'completed', 'voided')),
    CONSTRAINT chk_orders_discount_pct CHECK (discount_pct >= 0 AND discount_pct <= 100),
    CONSTRAINT chk_orders_tax_pct CHECK (tax_pct >= 0 AND tax_pct <= 100)
);

CREATE INDEX idx_orders_kind_status ON orders(kind, status);
CREATE INDEX idx_orders_party ON orders(party_id);
CREATE INDEX idx_orders_date ON orders(order_date);
";

const ORDER_ITEMS_SQL: &str = r"
CREATE TABLE order_items (
    id UUID PRIMARY KEY,
    order_id UUID NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    quantity INTEGER NOT NULL,
    unit_price NUMERIC(12, 2) NOT NULL,
    discount_pct NUMERIC(5, 2) NOT NULL DEFAULT 0,
    discount NUMERIC(12, 2) NOT NULL DEFAULT 0,
    subtotal NUMERIC(12, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_order_items_quantity CHECK (quantity > 0),
    CONSTRAINT chk_order_items_unit_price CHECK (unit_price >= 0),
    CONSTRAINT chk_order_items_discount_pct CHECK (discount_pct >= 0 AND discount_pct <= 100)
);

CREATE INDEX idx_order_items_order ON order_items(order_id);
CREATE INDEX idx_order_items_product ON order_items(product_id);
";

const DROP_ALL_SQL: &str = r"
-- Reverse order of creation so foreign keys do not block the drops
DROP TABLE IF EXISTS order_items CASCADE;
DROP TABLE IF EXISTS orders CASCADE;
DROP TABLE IF EXISTS sequences CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS suppliers CASCADE;
DROP TABLE IF EXISTS clients CASCADE;
";
