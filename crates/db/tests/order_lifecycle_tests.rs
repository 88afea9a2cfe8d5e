//! Integration tests for order completion and voiding.

mod common;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use comercia_core::credit::CreditError;
use comercia_core::lifecycle::{LifecycleError, OrderKind, PaymentMode};
use comercia_db::entities::sea_orm_active_enums::OrderStatus;
use comercia_db::{
    AddItemInput, ClientRepository, CreateOrderInput, OrderError, OrderItemRepository,
    OrderRepository, ProductRepository, SupplierRepository,
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Creates a pending order with one line item.
async fn order_with_item(
    db: &DatabaseConnection,
    kind: OrderKind,
    party_id: Uuid,
    payment_mode: PaymentMode,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
) -> comercia_db::entities::orders::Model {
    let orders = OrderRepository::new(db.clone());
    let order = orders
        .create(CreateOrderInput {
            kind,
            party_id,
            order_date: today(),
            due_date: None,
            payment_mode,
            discount_pct: dec!(0),
            tax_pct: dec!(0),
            notes: None,
        })
        .await
        .expect("failed to create order");

    OrderItemRepository::new(db.clone())
        .add_item(
            order.id,
            AddItemInput {
                product_id,
                quantity,
                unit_price: Some(unit_price),
                discount_pct: dec!(0),
            },
        )
        .await
        .expect("failed to add item");

    orders.get(order.id).await.expect("failed to reload").order
}

#[tokio::test]
async fn completing_a_purchase_receives_stock() {
    let db = common::setup_db().await;
    let supplier = common::create_supplier(&db, "Acme", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Purchase,
        supplier.id,
        PaymentMode::Cash,
        product.id,
        5,
        dec!(4),
    )
    .await;

    let completed = OrderRepository::new(db.clone())
        .complete(order.id)
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);

    let product = ProductRepository::new(db.clone()).get(product.id).await.unwrap();
    assert_eq!(product.stock, 15);

    let supplier = SupplierRepository::new(db).get(supplier.id).await.unwrap();
    assert_eq!(supplier.total_transacted, dec!(20.00));
    assert_eq!(supplier.last_transaction_date, Some(today()));
}

#[tokio::test]
async fn completing_a_sale_issues_stock() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Cash,
        product.id,
        10,
        dec!(4),
    )
    .await;

    OrderRepository::new(db.clone()).complete(order.id).await.unwrap();

    let product = ProductRepository::new(db).get(product.id).await.unwrap();
    assert_eq!(product.stock, 0);
}

#[tokio::test]
async fn sale_with_insufficient_stock_fails_atomically() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Cash,
        product.id,
        15,
        dec!(4),
    )
    .await;

    let orders = OrderRepository::new(db.clone());
    let err = orders.complete(order.id).await.unwrap_err();
    match err {
        OrderError::Lifecycle(LifecycleError::InsufficientStock {
            available,
            requested,
            ..
        }) => {
            assert_eq!(available, 10);
            assert_eq!(requested, 15);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // Nothing moved: still pending, stock and stats untouched.
    let reloaded = orders.get(order.id).await.unwrap().order;
    assert_eq!(reloaded.status, OrderStatus::Pending);
    let product = ProductRepository::new(db.clone()).get(product.id).await.unwrap();
    assert_eq!(product.stock, 10);
    let client = ClientRepository::new(db).get(client.id).await.unwrap();
    assert_eq!(client.total_transacted, dec!(0));
}

#[tokio::test]
async fn completion_is_only_allowed_from_pending() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Cash,
        product.id,
        2,
        dec!(4),
    )
    .await;

    let orders = OrderRepository::new(db.clone());
    orders.complete(order.id).await.unwrap();

    let err = orders.complete(order.id).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Lifecycle(LifecycleError::InvalidState { .. })
    ));

    // Completing twice must not double the stock effect.
    let product = ProductRepository::new(db).get(product.id).await.unwrap();
    assert_eq!(product.stock, 8);
}

#[tokio::test]
async fn credit_sale_consumes_the_client_credit() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Credit Buyer", dec!(1000), 30).await;
    let product = common::create_product(&db, "Widget", dec!(250), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Credit,
        product.id,
        1,
        dec!(250),
    )
    .await;

    OrderRepository::new(db.clone()).complete(order.id).await.unwrap();

    let client = ClientRepository::new(db).get(client.id).await.unwrap();
    assert_eq!(client.credit_used, dec!(250.00));
    assert_eq!(client.total_transacted, dec!(250.00));
}

#[tokio::test]
async fn credit_sale_over_the_limit_fails_atomically() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Credit Buyer", dec!(1000), 30).await;
    let product = common::create_product(&db, "Widget", dec!(250), 10).await;

    comercia_db::CreditRepository::new(db.clone())
        .use_credit(comercia_db::PartyRef::client(client.id), dec!(800))
        .await
        .unwrap();

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Credit,
        product.id,
        1,
        dec!(250),
    )
    .await;

    let orders = OrderRepository::new(db.clone());
    let err = orders.complete(order.id).await.unwrap_err();
    match err {
        OrderError::Credit(CreditError::Exceeded {
            requested,
            available,
        }) => {
            assert_eq!(requested, dec!(250.00));
            assert_eq!(available, dec!(200));
        }
        other => panic!("expected Exceeded, got {other:?}"),
    }

    // The stock move from the same transaction was rolled back too.
    let reloaded = orders.get(order.id).await.unwrap().order;
    assert_eq!(reloaded.status, OrderStatus::Pending);
    let product = ProductRepository::new(db.clone()).get(product.id).await.unwrap();
    assert_eq!(product.stock, 10);
    let client = ClientRepository::new(db).get(client.id).await.unwrap();
    assert_eq!(client.credit_used, dec!(800));
}

#[tokio::test]
async fn voiding_a_completed_sale_reverses_its_effects() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Credit Buyer", dec!(1000), 30).await;
    let product = common::create_product(&db, "Widget", dec!(100), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Credit,
        product.id,
        4,
        dec!(100),
    )
    .await;

    let orders = OrderRepository::new(db.clone());
    orders.complete(order.id).await.unwrap();
    let voided = orders.void(order.id).await.unwrap();
    assert_eq!(voided.status, OrderStatus::Voided);

    let product = ProductRepository::new(db.clone()).get(product.id).await.unwrap();
    assert_eq!(product.stock, 10);
    let client = ClientRepository::new(db).get(client.id).await.unwrap();
    assert_eq!(client.credit_used, dec!(0.00));
}

#[tokio::test]
async fn voiding_a_pending_order_only_changes_status() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Cash,
        product.id,
        3,
        dec!(4),
    )
    .await;

    let voided = OrderRepository::new(db.clone()).void(order.id).await.unwrap();
    assert_eq!(voided.status, OrderStatus::Voided);

    let product = ProductRepository::new(db).get(product.id).await.unwrap();
    assert_eq!(product.stock, 10);
}

#[tokio::test]
async fn voiding_twice_is_rejected() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(4), 10).await;

    let order = order_with_item(
        &db,
        OrderKind::Sale,
        client.id,
        PaymentMode::Cash,
        product.id,
        3,
        dec!(4),
    )
    .await;

    let orders = OrderRepository::new(db);
    orders.void(order.id).await.unwrap();
    let err = orders.void(order.id).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Lifecycle(LifecycleError::AlreadyVoided)
    ));
}

#[tokio::test]
async fn credit_order_due_date_defaults_to_party_terms() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Credit Buyer", dec!(1000), 30).await;

    let order = OrderRepository::new(db)
        .create(CreateOrderInput {
            kind: OrderKind::Sale,
            party_id: client.id,
            order_date: today(),
            due_date: None,
            payment_mode: PaymentMode::Credit,
            discount_pct: dec!(0),
            tax_pct: dec!(0),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(order.due_date, Some(today() + Duration::days(30)));
}

#[tokio::test]
async fn creating_an_order_for_a_missing_party_fails() {
    let db = common::setup_db().await;
    let missing = Uuid::now_v7();

    let err = OrderRepository::new(db)
        .create(CreateOrderInput {
            kind: OrderKind::Sale,
            party_id: missing,
            order_date: today(),
            due_date: None,
            payment_mode: PaymentMode::Cash,
            discount_pct: dec!(0),
            tax_pct: dec!(0),
            notes: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::PartyNotFound(id) if id == missing));
}
