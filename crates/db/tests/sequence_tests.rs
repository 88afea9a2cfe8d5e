//! Integration tests for sequence code allocation.

mod common;

use rust_decimal_macros::dec;

use comercia_core::lifecycle::{OrderKind, PaymentMode};
use comercia_core::sequence::SequenceKind;
use comercia_db::{CreateOrderInput, OrderRepository, SequenceRepository};

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[tokio::test]
async fn allocates_sequential_codes() {
    let db = common::setup_db().await;
    let sequences = SequenceRepository::new(db);

    let first = sequences.allocate(SequenceKind::Purchase).await.unwrap();
    let second = sequences.allocate(SequenceKind::Purchase).await.unwrap();
    let third = sequences.allocate(SequenceKind::Purchase).await.unwrap();

    assert_eq!(first, "PUR000001");
    assert_eq!(second, "PUR000002");
    assert_eq!(third, "PUR000003");
}

#[tokio::test]
async fn kinds_have_independent_counters() {
    let db = common::setup_db().await;
    let sequences = SequenceRepository::new(db);

    assert_eq!(
        sequences.allocate(SequenceKind::Purchase).await.unwrap(),
        "PUR000001"
    );
    assert_eq!(
        sequences.allocate(SequenceKind::Sale).await.unwrap(),
        "SAL000001"
    );
    assert_eq!(
        sequences.allocate(SequenceKind::Sale).await.unwrap(),
        "SAL000002"
    );
    assert_eq!(
        sequences.allocate(SequenceKind::Purchase).await.unwrap(),
        "PUR000002"
    );
}

#[tokio::test]
async fn concurrent_allocations_yield_distinct_codes() {
    let db = common::setup_db().await;
    let sequences = SequenceRepository::new(db);

    let allocations = (0..8).map(|_| {
        let sequences = sequences.clone();
        async move { sequences.allocate(SequenceKind::Sale).await.unwrap() }
    });
    let mut codes = futures::future::join_all(allocations).await;

    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 8);
}

#[tokio::test]
async fn voided_order_code_is_never_reissued() {
    let db = common::setup_db().await;
    let supplier = common::create_supplier(&db, "Acme Supplies", dec!(0), 0).await;
    let orders = OrderRepository::new(db.clone());

    let order_input = |party_id| CreateOrderInput {
        kind: OrderKind::Purchase,
        party_id,
        order_date: today(),
        due_date: None,
        payment_mode: PaymentMode::Cash,
        discount_pct: dec!(0),
        tax_pct: dec!(0),
        notes: None,
    };

    let first = orders.create(order_input(supplier.id)).await.unwrap();
    assert_eq!(first.code, "PUR000001");

    orders.void(first.id).await.unwrap();

    let second = orders.create(order_input(supplier.id)).await.unwrap();
    assert_eq!(second.code, "PUR000002");
}

#[tokio::test]
async fn entity_codes_come_from_the_same_counters() {
    let db = common::setup_db().await;

    let client = common::create_client(&db, "First Client", dec!(0), 0).await;
    assert_eq!(client.code, "CLI000001");

    let client = common::create_client(&db, "Second Client", dec!(0), 0).await;
    assert_eq!(client.code, "CLI000002");

    let supplier = common::create_supplier(&db, "First Supplier", dec!(0), 0).await;
    assert_eq!(supplier.code, "SUP000001");

    let product = common::create_product(&db, "Widget", dec!(10), 0).await;
    assert_eq!(product.code, "PRO000001");
}
