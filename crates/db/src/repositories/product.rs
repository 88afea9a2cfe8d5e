//! Product repository for catalog master data.
//!
//! Stock is never edited here; it only moves through order completion
//! and voiding so every stock change stays tied to a document.

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
use crate::entities::products;

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Display name.
    pub name: String,
    /// Default unit price.
    pub price: Decimal,
    /// Opening stock level.
    pub initial_stock: i32,
}

/// Partial update for a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New display name.
    pub name: Option<String>,
    /// New default unit price.
    pub price: Option<Decimal>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Repository for product CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product, allocating its `PRO` code in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if code allocation or the insert fails.
    pub async fn create(
        &self,
        input: CreateProductInput,
    ) -> Result<products::Model, PartyRepoError> {
        let txn = self.db.begin().await?;

        let code = SequenceRepository::allocate_in(&txn, SequenceKind::Product).await?;
        let now = Utc::now().into();

        let product = products::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(code),
            name: Set(input.name),
            price: Set(input.price),
            stock: Set(input.initial_stock),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = product.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<products::Model, PartyRepoError> {
        products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PartyRepoError::NotFound(id))
    }

    /// Gets a product by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<products::Model>, PartyRepoError> {
        let product = products::Entity::find()
            .filter(products::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(product)
    }

    /// Lists products ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, params: &PageParams) -> Result<Page<products::Model>, PartyRepoError> {
        let paginator = products::Entity::find()
            .order_by_asc(products::Column::Code)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(params.page.saturating_sub(1)))
            .await?;

        Ok(Page::new(data, params.page, params.per_page, total))
    }

    /// Applies a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, PartyRepoError> {
        let existing = self.get(id).await?;

        let mut product: products::ActiveModel = existing.into();
        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(price) = input.price {
            product.price = Set(price);
        }
        if let Some(active) = input.active {
            product.active = Set(active);
        }
        product.updated_at = Set(Utc::now().into());

        let updated = product.update(&self.db).await?;
        Ok(updated)
    }
}
