//! Order routes: headers, lifecycle transitions, and line items.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use comercia_core::lifecycle::{self, LifecycleService};
use comercia_db::entities::{order_items, orders};
use comercia_db::{
    AddItemInput, CreateOrderInput, OrderFilter, OrderItemRepository, OrderRepository,
    UpdateItemInput, UpdateOrderInput,
};
use comercia_shared::types::{Page, PageParams};

use crate::AppState;
use crate::error::ApiError;

/// Creates the order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders", post(create_order))
        .route("/orders/{order_id}", get(get_order))
        .route("/orders/{order_id}", patch(update_order))
        .route("/orders/{order_id}/complete", post(complete_order))
        .route("/orders/{order_id}/void", post(void_order))
        .route("/orders/{order_id}/items", post(add_item))
        .route("/orders/{order_id}/items/{item_id}", patch(update_item))
        .route("/orders/{order_id}/items/{item_id}", delete(remove_item))
}

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Purchase or sale.
    pub kind: lifecycle::OrderKind,
    /// Supplier ID for purchases, client ID for sales.
    pub party_id: Uuid,
    /// Document date; defaults to today.
    pub order_date: Option<NaiveDate>,
    /// Due date; credit orders default to the document date plus the
    /// party's credit days when omitted.
    pub due_date: Option<NaiveDate>,
    /// Cash or credit settlement.
    pub payment_mode: lifecycle::PaymentMode,
    /// Order-level discount percentage; defaults to zero.
    #[serde(default)]
    pub discount_pct: Decimal,
    /// Tax percentage; defaults to zero.
    #[serde(default)]
    pub tax_pct: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for updating a pending order header.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateOrderRequest {
    /// New document date.
    pub order_date: Option<NaiveDate>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New order-level discount percentage.
    pub discount_pct: Option<Decimal>,
    /// New tax percentage.
    pub tax_pct: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Query parameters for listing orders.
#[derive(Debug, Deserialize, Default)]
pub struct ListOrdersQuery {
    /// Filter by kind.
    pub kind: Option<lifecycle::OrderKind>,
    /// Filter by status.
    pub status: Option<lifecycle::OrderStatus>,
    /// Filter by party.
    pub party_id: Option<Uuid>,
    /// Document date range start, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Document date range end, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
}

/// Request body for adding a line item.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// The product being bought or sold.
    pub product_id: Uuid,
    /// Units ordered; must be strictly positive.
    pub quantity: i32,
    /// Price per unit; defaults to the product's current price.
    pub unit_price: Option<Decimal>,
    /// Line discount percentage; defaults to zero.
    #[serde(default)]
    pub discount_pct: Decimal,
}

/// Request body for updating a line item.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateItemRequest {
    /// New quantity.
    pub quantity: Option<i32>,
    /// New unit price.
    pub unit_price: Option<Decimal>,
    /// New line discount percentage.
    pub discount_pct: Option<Decimal>,
}

/// Response for an order header.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Purchase or sale.
    pub kind: lifecycle::OrderKind,
    /// Assigned `PUR` or `SAL` code.
    pub code: String,
    /// Supplier ID for purchases, client ID for sales.
    pub party_id: Uuid,
    /// Document date.
    pub order_date: NaiveDate,
    /// Due date, when one applies.
    pub due_date: Option<NaiveDate>,
    /// Cash or credit settlement.
    pub payment_mode: lifecycle::PaymentMode,
    /// Lifecycle status.
    pub status: lifecycle::OrderStatus,
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Order-level discount amount.
    pub discount: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Grand total.
    pub total: Decimal,
    /// Order-level discount percentage.
    pub discount_pct: Decimal,
    /// Tax percentage.
    pub tax_pct: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// True when a credit order's due date has passed.
    pub is_overdue: bool,
    /// Days until the due date; negative once overdue, absent for cash
    /// orders and credit orders without a due date.
    pub days_until_due: Option<i64>,
}

impl From<orders::Model> for OrderResponse {
    fn from(model: orders::Model) -> Self {
        let payment_mode = lifecycle::PaymentMode::from(model.payment_mode);
        let today = Utc::now().date_naive();
        Self {
            id: model.id,
            kind: model.kind.into(),
            code: model.code,
            party_id: model.party_id,
            order_date: model.order_date,
            due_date: model.due_date,
            payment_mode,
            status: model.status.into(),
            subtotal: model.subtotal,
            discount: model.discount,
            tax: model.tax,
            total: model.total,
            discount_pct: model.discount_pct,
            tax_pct: model.tax_pct,
            notes: model.notes,
            is_overdue: LifecycleService::is_overdue(payment_mode, model.due_date, today),
            days_until_due: LifecycleService::days_until_due(payment_mode, model.due_date, today),
        }
    }
}

/// Response for a line item.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    /// Item ID.
    pub id: Uuid,
    /// The product this line covers.
    pub product_id: Uuid,
    /// Units ordered.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line discount percentage.
    pub discount_pct: Decimal,
    /// Line discount amount.
    pub discount: Decimal,
    /// Line subtotal after discount.
    pub subtotal: Decimal,
}

impl From<order_items::Model> for OrderItemResponse {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
            discount_pct: model.discount_pct,
            discount: model.discount,
            subtotal: model.subtotal,
        }
    }
}

/// Response for an order with its line items.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    /// Order header.
    #[serde(flatten)]
    pub order: OrderResponse,
    /// Number of line items.
    pub item_count: usize,
    /// Line items ordered by creation time.
    pub items: Vec<OrderItemResponse>,
}

/// GET /orders - List orders with optional filters.
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Page<OrderResponse>>, ApiError> {
    let filter = OrderFilter {
        kind: query.kind,
        status: query.status,
        party_id: query.party_id,
        date_from: query.date_from,
        date_to: query.date_to,
    };

    let mut params = PageParams::default();
    if let Some(page) = query.page {
        params.page = page;
    }
    if let Some(per_page) = query.per_page {
        params.per_page = per_page;
    }

    let page = OrderRepository::new((*state.db).clone())
        .list(filter, &params)
        .await?;

    Ok(Json(Page {
        data: page.data.into_iter().map(OrderResponse::from).collect(),
        meta: page.meta,
    }))
}

/// POST /orders - Create a pending order.
async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = OrderRepository::new((*state.db).clone())
        .create(CreateOrderInput {
            kind: payload.kind,
            party_id: payload.party_id,
            order_date: payload
                .order_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            due_date: payload.due_date,
            payment_mode: payload.payment_mode,
            discount_pct: payload.discount_pct,
            tax_pct: payload.tax_pct,
            notes: payload.notes,
        })
        .await?;

    tracing::info!(order_id = %order.id, code = %order.code, "order created");
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET `/orders/{order_id}` - Get an order with its items.
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let detail = OrderRepository::new((*state.db).clone())
        .get(order_id)
        .await?;

    let item_count = detail.item_count();
    Ok(Json(OrderDetailResponse {
        order: detail.order.into(),
        item_count,
        items: detail
            .items
            .into_iter()
            .map(OrderItemResponse::from)
            .collect(),
    }))
}

/// PATCH `/orders/{order_id}` - Update a pending order header.
async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderRepository::new((*state.db).clone())
        .update(
            order_id,
            UpdateOrderInput {
                order_date: payload.order_date,
                due_date: payload.due_date,
                discount_pct: payload.discount_pct,
                tax_pct: payload.tax_pct,
                notes: payload.notes,
            },
        )
        .await?;
    Ok(Json(order.into()))
}

/// POST `/orders/{order_id}/complete` - Apply the order's stock and
/// credit effects and mark it completed.
async fn complete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderRepository::new((*state.db).clone())
        .complete(order_id)
        .await?;
    Ok(Json(order.into()))
}

/// POST `/orders/{order_id}/void` - Void the order, reversing its
/// effects if it was completed.
async fn void_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderRepository::new((*state.db).clone())
        .void(order_id)
        .await?;
    Ok(Json(order.into()))
}

/// POST `/orders/{order_id}/items` - Add a line item to a pending order.
async fn add_item(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<OrderItemResponse>), ApiError> {
    let item = OrderItemRepository::new((*state.db).clone())
        .add_item(
            order_id,
            AddItemInput {
                product_id: payload.product_id,
                quantity: payload.quantity,
                unit_price: payload.unit_price,
                discount_pct: payload.discount_pct,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// PATCH `/orders/{order_id}/items/{item_id}` - Update a line item.
async fn update_item(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<OrderItemResponse>, ApiError> {
    let item = OrderItemRepository::new((*state.db).clone())
        .update_item(
            order_id,
            item_id,
            UpdateItemInput {
                quantity: payload.quantity,
                unit_price: payload.unit_price,
                discount_pct: payload.discount_pct,
            },
        )
        .await?;
    Ok(Json(item.into()))
}

/// DELETE `/orders/{order_id}/items/{item_id}` - Remove a line item.
async fn remove_item(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    OrderItemRepository::new((*state.db).clone())
        .remove_item(order_id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
