//! Order repository for purchase and sale lifecycle operations.
//!
//! Completion and voiding are multi-row mutations (order, products,
//! party). Each runs inside one database transaction with exclusive
//! locks on every row it read-checks-writes, so a failure at any step
//! leaves all rows untouched and a concurrent writer serializes behind
//! the locks.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use comercia_core::lifecycle::{self, LifecycleError, LifecycleService, VoidPlan};
use comercia_core::sequence::SequenceKind;
use comercia_core::totals::{TotalsError, TotalsService};
use comercia_shared::types::{Page, PageParams, ProductId};

use super::credit::{CreditRepository, PartyError, PartyRef};
use super::sequence::{SequenceError, SequenceRepository};
use crate::entities::{
    order_items, orders, products,
    sea_orm_active_enums::{OrderKind, OrderStatus, PaymentMode},
};

/// Error types for order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Order not found.
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    /// The order's party (client or supplier) not found.
    #[error("Party not found: {0}")]
    PartyNotFound(Uuid),

    /// A line item references a missing product.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Header fields can only change while the order is pending.
    #[error("Order is not editable, current status is {current:?}")]
    NotEditable {
        /// The order's current status.
        current: lifecycle::OrderStatus,
    },

    /// Lifecycle rule violation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Credit rule violation.
    #[error(transparent)]
    Credit(comercia_core::credit::CreditError),

    /// Percentage validation failed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// Code allocation failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// A row lock could not be acquired in time.
    #[error("Timed out waiting for a row lock")]
    LockTimeout,

    /// Database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for OrderError {
    fn from(err: DbErr) -> Self {
        if super::is_lock_timeout(&err) {
            Self::LockTimeout
        } else {
            Self::Database(err)
        }
    }
}

impl From<PartyError> for OrderError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::NotFound(id) => Self::PartyNotFound(id),
            PartyError::Credit(e) => Self::Credit(e),
            PartyError::LockTimeout => Self::LockTimeout,
            PartyError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Purchase or sale.
    pub kind: lifecycle::OrderKind,
    /// Supplier ID for purchases, client ID for sales.
    pub party_id: Uuid,
    /// Document date.
    pub order_date: NaiveDate,
    /// Due date; when omitted on a credit order it defaults to the
    /// document date plus the party's credit days.
    pub due_date: Option<NaiveDate>,
    /// Cash or credit.
    pub payment_mode: lifecycle::PaymentMode,
    /// Order-level discount percentage in [0, 100].
    pub discount_pct: Decimal,
    /// Tax percentage in [0, 100].
    pub tax_pct: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Partial update for a pending order's header. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
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

/// Filter options for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Filter by kind.
    pub kind: Option<lifecycle::OrderKind>,
    /// Filter by status.
    pub status: Option<lifecycle::OrderStatus>,
    /// Filter by party.
    pub party_id: Option<Uuid>,
    /// Filter by document date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by document date range end.
    pub date_to: Option<NaiveDate>,
}

/// An order with its line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    /// Order header.
    pub order: orders::Model,
    /// Line items ordered by creation time.
    pub items: Vec<order_items::Model>,
}

impl OrderWithItems {
    /// Number of line items on the order.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// The party side an order settles against.
pub(crate) fn party_ref(kind: OrderKind, party_id: Uuid) -> PartyRef {
    match kind {
        OrderKind::Purchase => PartyRef::supplier(party_id),
        OrderKind::Sale => PartyRef::client(party_id),
    }
}

/// Recomputes and persists an order's totals from its current line
/// items. Callers run this inside the same transaction as the line item
/// write that made the stored totals stale.
pub(crate) async fn recompute_totals_in<E>(
    txn: &DatabaseTransaction,
    order: orders::Model,
) -> Result<orders::Model, E>
where
    E: From<TotalsError> + From<DbErr>,
{
    let items = order_items::Entity::find()
        .filter(order_items::Column::OrderId.eq(order.id))
        .all(txn)
        .await?;

    let subtotals: Vec<Decimal> = items.iter().map(|item| item.subtotal).collect();
    let totals = TotalsService::order_totals(&subtotals, order.discount_pct, order.tax_pct)?;

    let mut model: orders::ActiveModel = order.into();
    model.subtotal = Set(totals.subtotal);
    model.discount = Set(totals.discount);
    model.tax = Set(totals.tax);
    model.total = Set(totals.total);
    model.updated_at = Set(Utc::now().into());

    let updated = model.update(txn).await?;
    Ok(updated)
}

/// Repository for order lifecycle operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending order with zero totals, allocating its `PUR` or
    /// `SAL` code in the same transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the party does not exist, a percentage is out
    /// of range, code allocation fails, or the insert fails.
    pub async fn create(&self, input: CreateOrderInput) -> Result<orders::Model, OrderError> {
        TotalsService::validate_percentage(input.discount_pct)?;
        TotalsService::validate_percentage(input.tax_pct)?;

        let kind = OrderKind::from(input.kind);
        let sequence_kind = match input.kind {
            lifecycle::OrderKind::Purchase => SequenceKind::Purchase,
            lifecycle::OrderKind::Sale => SequenceKind::Sale,
        };

        let txn = self.db.begin().await?;

        let account = CreditRepository::account_in(&txn, party_ref(kind, input.party_id)).await?;

        let due_date = match input.payment_mode {
            lifecycle::PaymentMode::Credit => Some(input.due_date.unwrap_or(
                input.order_date + Duration::days(i64::from(account.credit_days)),
            )),
            lifecycle::PaymentMode::Cash => input.due_date,
        };

        let code = SequenceRepository::allocate_in(&txn, sequence_kind).await?;
        let now = Utc::now().into();

        let order = orders::ActiveModel {
            id: Set(Uuid::now_v7()),
            kind: Set(kind),
            code: Set(code),
            party_id: Set(input.party_id),
            order_date: Set(input.order_date),
            due_date: Set(due_date),
            payment_mode: Set(PaymentMode::from(input.payment_mode)),
            status: Set(OrderStatus::Pending),
            subtotal: Set(Decimal::ZERO),
            discount_pct: Set(input.discount_pct),
            discount: Set(Decimal::ZERO),
            tax_pct: Set(input.tax_pct),
            tax: Set(Decimal::ZERO),
            total: Set(Decimal::ZERO),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = order.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets an order with its line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<OrderWithItems, OrderError> {
        let order = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(id))
            .order_by_asc(order_items::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(OrderWithItems { order, items })
    }

    /// Lists orders with optional filters, newest document date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: OrderFilter,
        params: &PageParams,
    ) -> Result<Page<orders::Model>, OrderError> {
        let mut query = orders::Entity::find();

        if let Some(kind) = filter.kind {
            query = query.filter(orders::Column::Kind.eq(OrderKind::from(kind)));
        }
        if let Some(status) = filter.status {
            query = query.filter(orders::Column::Status.eq(OrderStatus::from(status)));
        }
        if let Some(party_id) = filter.party_id {
            query = query.filter(orders::Column::PartyId.eq(party_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(orders::Column::OrderDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(orders::Column::OrderDate.lte(date_to));
        }

        let paginator = query
            .order_by_desc(orders::Column::OrderDate)
            .order_by_desc(orders::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(params.page.saturating_sub(1)))
            .await?;

        Ok(Page::new(data, params.page, params.per_page, total))
    }

    /// Updates a pending order's header fields, recomputing totals when
    /// a percentage changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is missing, not pending, a
    /// percentage is out of range, or the database operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateOrderInput,
    ) -> Result<orders::Model, OrderError> {
        let txn = self.db.begin().await?;

        let order = Self::lock_order(&txn, id).await?;
        let status = lifecycle::OrderStatus::from(order.status);
        if !status.is_editable() {
            return Err(OrderError::NotEditable { current: status });
        }

        if let Some(pct) = input.discount_pct {
            TotalsService::validate_percentage(pct)?;
        }
        if let Some(pct) = input.tax_pct {
            TotalsService::validate_percentage(pct)?;
        }

        let mut model: orders::ActiveModel = order.into();
        if let Some(order_date) = input.order_date {
            model.order_date = Set(order_date);
        }
        if let Some(due_date) = input.due_date {
            model.due_date = Set(Some(due_date));
        }
        if let Some(pct) = input.discount_pct {
            model.discount_pct = Set(pct);
        }
        if let Some(pct) = input.tax_pct {
            model.tax_pct = Set(pct);
        }
        if let Some(notes) = input.notes {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(&txn).await?;
        let updated = recompute_totals_in::<OrderError>(&txn, updated).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Completes a pending order, applying its effects atomically:
    /// stock moves per line item, credit is consumed for credit orders,
    /// and the party's lifetime stats are updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not pending, a sale lacks stock,
    /// a credit order exceeds the party's limit, or the database
    /// operation fails. On error no effect is applied.
    pub async fn complete(&self, id: Uuid) -> Result<orders::Model, OrderError> {
        let txn = self.db.begin().await?;

        let order = Self::lock_order(&txn, id).await?;
        LifecycleService::validate_complete(order.status.into())?;

        Self::apply_stock_effects(&txn, &order, StockDirection::Completion).await?;

        let party = party_ref(order.kind, order.party_id);
        if lifecycle::PaymentMode::from(order.payment_mode).is_credit() {
            CreditRepository::use_credit_in(&txn, party, order.total).await?;
        }
        CreditRepository::record_transaction_in(&txn, party, order.total, order.order_date)
            .await?;

        let mut model: orders::ActiveModel = order.into();
        model.status = Set(OrderStatus::Completed);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(order_id = %updated.id, code = %updated.code, total = %updated.total, "order completed");
        Ok(updated)
    }

    /// Voids an order. A completed order has its stock and credit
    /// effects reversed; a pending order only changes status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is already voided or the database
    /// operation fails. On error no effect is applied.
    pub async fn void(&self, id: Uuid) -> Result<orders::Model, OrderError> {
        let txn = self.db.begin().await?;

        let order = Self::lock_order(&txn, id).await?;
        let plan = LifecycleService::validate_void(order.status.into())?;

        if plan == VoidPlan::ReverseEffects {
            Self::apply_stock_effects(&txn, &order, StockDirection::Reversal).await?;

            if lifecycle::PaymentMode::from(order.payment_mode).is_credit() {
                let party = party_ref(order.kind, order.party_id);
                CreditRepository::release_credit_in(&txn, party, order.total).await?;
            }
        }

        let mut model: orders::ActiveModel = order.into();
        model.status = Set(OrderStatus::Voided);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(order_id = %updated.id, code = %updated.code, ?plan, "order voided");
        Ok(updated)
    }

    /// Fetches an order with an exclusive row lock.
    pub(crate) async fn lock_order(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<orders::Model, OrderError> {
        orders::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Applies or reverses the stock movement of every line item, locking
    /// each product row before updating it.
    async fn apply_stock_effects(
        txn: &DatabaseTransaction,
        order: &orders::Model,
        direction: StockDirection,
    ) -> Result<(), OrderError> {
        let kind = lifecycle::OrderKind::from(order.kind);
        let now = Utc::now().into();

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .all(txn)
            .await?;

        for item in items {
            let product = products::Entity::find_by_id(item.product_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or(OrderError::ProductNotFound(item.product_id))?;

            let new_stock = match direction {
                StockDirection::Completion => LifecycleService::completion_stock(
                    kind,
                    ProductId::from_uuid(item.product_id),
                    product.stock,
                    item.quantity,
                )?,
                StockDirection::Reversal => {
                    LifecycleService::reversal_stock(kind, product.stock, item.quantity)
                }
            };

            let mut model: products::ActiveModel = product.into();
            model.stock = Set(new_stock);
            model.updated_at = Set(now);
            model.update(txn).await?;
        }

        Ok(())
    }
}

/// Whether a stock pass applies completion effects or reverses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockDirection {
    Completion,
    Reversal,
}
