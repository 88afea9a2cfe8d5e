//! Integration tests for line item edits and totals recomputation.

mod common;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use comercia_core::lifecycle::{OrderKind, PaymentMode};
use comercia_core::totals::TotalsError;
use comercia_db::{
    AddItemInput, CreateOrderInput, OrderItemError, OrderItemRepository, OrderRepository,
    UpdateItemInput, UpdateOrderInput,
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Creates a pending cash sale with the given tax percentage.
async fn pending_sale(db: &DatabaseConnection, client_id: Uuid, tax_pct: rust_decimal::Decimal) -> Uuid {
    OrderRepository::new(db.clone())
        .create(CreateOrderInput {
            kind: OrderKind::Sale,
            party_id: client_id,
            order_date: today(),
            due_date: None,
            payment_mode: PaymentMode::Cash,
            discount_pct: dec!(0),
            tax_pct,
            notes: None,
        })
        .await
        .expect("failed to create order")
        .id
}

#[tokio::test]
async fn adding_items_recomputes_order_totals() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let widget = common::create_product(&db, "Widget", dec!(10), 100).await;
    let gadget = common::create_product(&db, "Gadget", dec!(5), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(12)).await;
    let items = OrderItemRepository::new(db.clone());

    // 2 x 10.00 with no discount.
    items
        .add_item(
            order_id,
            AddItemInput {
                product_id: widget.id,
                quantity: 2,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    // 1 x 5.00 with a 10% line discount.
    let second = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: gadget.id,
                quantity: 1,
                unit_price: None,
                discount_pct: dec!(10),
            },
        )
        .await
        .unwrap();
    assert_eq!(second.discount, dec!(0.50));
    assert_eq!(second.subtotal, dec!(4.50));

    let order = OrderRepository::new(db).get(order_id).await.unwrap().order;
    assert_eq!(order.subtotal, dec!(24.50));
    assert_eq!(order.discount, dec!(0.00));
    assert_eq!(order.tax, dec!(2.94));
    assert_eq!(order.total, dec!(27.44));
}

#[tokio::test]
async fn item_unit_price_defaults_to_product_price() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(7.25), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(0)).await;

    let item = OrderItemRepository::new(db)
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 3,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    assert_eq!(item.unit_price, dec!(7.25));
    assert_eq!(item.subtotal, dec!(21.75));
}

#[tokio::test]
async fn updating_an_item_recomputes_order_totals() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(10), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(0)).await;
    let items = OrderItemRepository::new(db.clone());

    let item = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 2,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    let updated = items
        .update_item(
            order_id,
            item.id,
            UpdateItemInput {
                quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.subtotal, dec!(50.00));

    let order = OrderRepository::new(db).get(order_id).await.unwrap().order;
    assert_eq!(order.subtotal, dec!(50.00));
    assert_eq!(order.total, dec!(50.00));
}

#[tokio::test]
async fn removing_an_item_recomputes_order_totals() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(10), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(0)).await;
    let items = OrderItemRepository::new(db.clone());

    let item = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 2,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    items.remove_item(order_id, item.id).await.unwrap();

    let with_items = OrderRepository::new(db).get(order_id).await.unwrap();
    assert!(with_items.items.is_empty());
    assert_eq!(with_items.order.subtotal, dec!(0));
    assert_eq!(with_items.order.total, dec!(0));
}

#[tokio::test]
async fn items_cannot_change_after_completion() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(10), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(0)).await;
    let items = OrderItemRepository::new(db.clone());

    let item = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 1,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    OrderRepository::new(db).complete(order_id).await.unwrap();

    let err = items
        .update_item(
            order_id,
            item.id,
            UpdateItemInput {
                quantity: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderItemError::NotEditable { .. }));

    let err = items.remove_item(order_id, item.id).await.unwrap_err();
    assert!(matches!(err, OrderItemError::NotEditable { .. }));
}

#[tokio::test]
async fn invalid_line_inputs_are_rejected() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(10), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(0)).await;
    let items = OrderItemRepository::new(db);

    let err = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 0,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderItemError::Totals(TotalsError::NonPositiveQuantity(0))
    ));

    let err = items
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 1,
                unit_price: None,
                discount_pct: dec!(101),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderItemError::Totals(TotalsError::InvalidPercentage(_))
    ));
}

#[tokio::test]
async fn header_discount_change_recomputes_totals() {
    let db = common::setup_db().await;
    let client = common::create_client(&db, "Buyer", dec!(0), 0).await;
    let product = common::create_product(&db, "Widget", dec!(100), 100).await;

    let order_id = pending_sale(&db, client.id, dec!(10)).await;
    OrderItemRepository::new(db.clone())
        .add_item(
            order_id,
            AddItemInput {
                product_id: product.id,
                quantity: 1,
                unit_price: None,
                discount_pct: dec!(0),
            },
        )
        .await
        .unwrap();

    let order = OrderRepository::new(db.clone())
        .update(
            order_id,
            UpdateOrderInput {
                discount_pct: Some(dec!(20)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 100 - 20% = 80, plus 10% tax = 88.
    assert_eq!(order.subtotal, dec!(100.00));
    assert_eq!(order.discount, dec!(20.00));
    assert_eq!(order.tax, dec!(8.00));
    assert_eq!(order.total, dec!(88.00));
}
