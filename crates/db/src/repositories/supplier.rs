//! Supplier repository for supplier master data.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use comercia_core::sequence::SequenceKind;
use comercia_shared::types::{Page, PageParams};

use super::client::PartyRepoError;
use super::sequence::SequenceRepository;
use crate::entities::suppliers;

/// Input for creating a supplier.
#[derive(Debug, Clone)]
pub struct CreateSupplierInput {
    /// Display name.
    pub name: String,
    /// Maximum credit the supplier extends.
    pub credit_limit: Decimal,
    /// Payment term in days; zero means no credit terms.
    pub credit_days: i32,
}

/// Partial update for a supplier. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSupplierInput {
    /// New display name.
    pub name: Option<String>,
    /// New credit limit.
    pub credit_limit: Option<Decimal>,
    /// New credit days.
    pub credit_days: Option<i32>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Repository for supplier CRUD operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a supplier, allocating its `SUP` code in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if code allocation or the insert fails.
    pub async fn create(
        &self,
        input: CreateSupplierInput,
    ) -> Result<suppliers::Model, PartyRepoError> {
        let txn = self.db.begin().await?;

        let code = SequenceRepository::allocate_in(&txn, SequenceKind::Supplier).await?;
        let now = Utc::now().into();

        let supplier = suppliers::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(code),
            name: Set(input.name),
            credit_limit: Set(input.credit_limit),
            credit_used: Set(Decimal::ZERO),
            credit_days: Set(input.credit_days),
            total_transacted: Set(Decimal::ZERO),
            last_transaction_date: Set(None),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = supplier.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier does not exist or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<suppliers::Model, PartyRepoError> {
        suppliers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PartyRepoError::NotFound(id))
    }

    /// Gets a supplier by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_by_code(
        &self,
        code: &str,
    ) -> Result<Option<suppliers::Model>, PartyRepoError> {
        let supplier = suppliers::Entity::find()
            .filter(suppliers::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(supplier)
    }

    /// Lists suppliers ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        params: &PageParams,
    ) -> Result<Page<suppliers::Model>, PartyRepoError> {
        let paginator = suppliers::Entity::find()
            .order_by_asc(suppliers::Column::Code)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(params.page.saturating_sub(1)))
            .await?;

        Ok(Page::new(data, params.page, params.per_page, total))
    }

    /// Applies a partial update to a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier does not exist or the update
    /// fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateSupplierInput,
    ) -> Result<suppliers::Model, PartyRepoError> {
        let existing = self.get(id).await?;

        let mut supplier: suppliers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            supplier.name = Set(name);
        }
        if let Some(credit_limit) = input.credit_limit {
            supplier.credit_limit = Set(credit_limit);
        }
        if let Some(credit_days) = input.credit_days {
            supplier.credit_days = Set(credit_days);
        }
        if let Some(active) = input.active {
            supplier.active = Set(active);
        }
        supplier.updated_at = Set(Utc::now().into());

        let updated = supplier.update(&self.db).await?;
        Ok(updated)
    }
}
