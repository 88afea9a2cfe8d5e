//! Order item repository for line item edits on pending orders.
//!
//! Every write locks the parent order first, rejects it unless the
//! order is still pending, and recomputes the order's totals in the
//! same transaction so the stored header is never stale relative to
//! its items.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use comercia_core::lifecycle;
use comercia_core::totals::{LineItemInput, TotalsError, TotalsService};

use super::order::{self, OrderError, OrderRepository};
use crate::entities::{order_items, orders, products};

/// Error types for order item operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderItemError {
    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    /// Line item not found on the order.
    #[error("Order item not found: {0}")]
    ItemNotFound(Uuid),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Line items can only change while the order is pending.
    #[error("Order is not editable, current status is {current:?}")]
    NotEditable {
        /// The order's current status.
        current: lifecycle::OrderStatus,
    },

    /// Line item validation failed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// A row lock could not be acquired in time.
    #[error("Timed out waiting for a row lock")]
    LockTimeout,

    /// Database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for OrderItemError {
    fn from(err: DbErr) -> Self {
        if super::is_lock_timeout(&err) {
            Self::LockTimeout
        } else {
            Self::Database(err)
        }
    }
}

impl From<OrderError> for OrderItemError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => Self::OrderNotFound(id),
            OrderError::ProductNotFound(id) => Self::ProductNotFound(id),
            OrderError::Totals(e) => Self::Totals(e),
            OrderError::LockTimeout => Self::LockTimeout,
            OrderError::Database(e) => Self::Database(e),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

/// Input for adding a line item.
#[derive(Debug, Clone)]
pub struct AddItemInput {
    /// The product being bought or sold.
    pub product_id: Uuid,
    /// Units ordered; must be strictly positive.
    pub quantity: i32,
    /// Price per unit; defaults to the product's current price when
    /// omitted.
    pub unit_price: Option<Decimal>,
    /// Line discount percentage in [0, 100].
    pub discount_pct: Decimal,
}

/// Partial update for a line item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemInput {
    /// New quantity.
    pub quantity: Option<i32>,
    /// New unit price.
    pub unit_price: Option<Decimal>,
    /// New line discount percentage.
    pub discount_pct: Option<Decimal>,
}

/// Repository for line item operations.
#[derive(Debug, Clone)]
pub struct OrderItemRepository {
    db: DatabaseConnection,
}

impl OrderItemRepository {
    /// Creates a new order item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a line item to a pending order and recomputes its totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is missing or not pending, the
    /// product is missing, the line inputs are invalid, or the database
    /// operation fails.
    pub async fn add_item(
        &self,
        order_id: Uuid,
        input: AddItemInput,
    ) -> Result<order_items::Model, OrderItemError> {
        let txn = self.db.begin().await?;
        let order = Self::lock_editable_order(&txn, order_id).await?;

        let product = products::Entity::find_by_id(input.product_id)
            .one(&txn)
            .await?
            .ok_or(OrderItemError::ProductNotFound(input.product_id))?;

        let unit_price = input.unit_price.unwrap_or(product.price);
        let amounts = TotalsService::line_amounts(&LineItemInput {
            quantity: input.quantity,
            unit_price,
            discount_pct: input.discount_pct,
        })?;

        let now = Utc::now().into();
        let item = order_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            order_id: Set(order_id),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            unit_price: Set(unit_price),
            discount_pct: Set(input.discount_pct),
            discount: Set(amounts.discount),
            subtotal: Set(amounts.subtotal),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = item.insert(&txn).await?;
        order::recompute_totals_in::<OrderItemError>(&txn, order).await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Updates a line item on a pending order and recomputes its totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the order or item is missing, the order is
    /// not pending, the resulting line inputs are invalid, or the
    /// database operation fails.
    pub async fn update_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        input: UpdateItemInput,
    ) -> Result<order_items::Model, OrderItemError> {
        let txn = self.db.begin().await?;
        let order = Self::lock_editable_order(&txn, order_id).await?;

        let item = Self::find_item(&txn, order_id, item_id).await?;

        let quantity = input.quantity.unwrap_or(item.quantity);
        let unit_price = input.unit_price.unwrap_or(item.unit_price);
        let discount_pct = input.discount_pct.unwrap_or(item.discount_pct);

        let amounts = TotalsService::line_amounts(&LineItemInput {
            quantity,
            unit_price,
            discount_pct,
        })?;

        let mut model: order_items::ActiveModel = item.into();
        model.quantity = Set(quantity);
        model.unit_price = Set(unit_price);
        model.discount_pct = Set(discount_pct);
        model.discount = Set(amounts.discount);
        model.subtotal = Set(amounts.subtotal);
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(&txn).await?;
        order::recompute_totals_in::<OrderItemError>(&txn, order).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Removes a line item from a pending order and recomputes its
    /// totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the order or item is missing, the order is
    /// not pending, or the database operation fails.
    pub async fn remove_item(&self, order_id: Uuid, item_id: Uuid) -> Result<(), OrderItemError> {
        let txn = self.db.begin().await?;
        let order = Self::lock_editable_order(&txn, order_id).await?;

        let item = Self::find_item(&txn, order_id, item_id).await?;
        item.delete(&txn).await?;

        order::recompute_totals_in::<OrderItemError>(&txn, order).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Locks the order row and rejects any status other than pending.
    async fn lock_editable_order(
        txn: &DatabaseTransaction,
        order_id: Uuid,
    ) -> Result<orders::Model, OrderItemError> {
        let order = OrderRepository::lock_order(txn, order_id).await?;
        let status = lifecycle::OrderStatus::from(order.status);
        if !status.is_editable() {
            return Err(OrderItemError::NotEditable { current: status });
        }
        Ok(order)
    }

    /// Finds a line item scoped to its parent order.
    async fn find_item(
        txn: &DatabaseTransaction,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<order_items::Model, OrderItemError> {
        order_items::Entity::find_by_id(item_id)
            .filter(order_items::Column::OrderId.eq(order_id))
            .one(txn)
            .await?
            .ok_or(OrderItemError::ItemNotFound(item_id))
    }
}
