//! Client repository for client master data.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use comercia_core::sequence::SequenceKind;
use comercia_shared::types::{Page, PageParams};

use super::sequence::{SequenceError, SequenceRepository};
use crate::entities::clients;

/// Error types for client and supplier master data operations.
#[derive(Debug, thiserror::Error)]
pub enum PartyRepoError {
    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(Uuid),

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

impl From<DbErr> for PartyRepoError {
    fn from(err: DbErr) -> Self {
        if super::is_lock_timeout(&err) {
            Self::LockTimeout
        } else {
            Self::Database(err)
        }
    }
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Display name.
    pub name: String,
    /// Maximum credit the client may hold.
    pub credit_limit: Decimal,
    /// Payment term in days; zero means no credit terms.
    pub credit_days: i32,
}

/// Partial update for a client. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientInput {
    /// New display name.
    pub name: Option<String>,
    /// New credit limit.
    pub credit_limit: Option<Decimal>,
    /// New credit days.
    pub credit_days: Option<i32>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Repository for client CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a client, allocating its `CLI` code in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if code allocation or the insert fails.
    pub async fn create(&self, input: CreateClientInput) -> Result<clients::Model, PartyRepoError> {
        let txn = self.db.begin().await?;

        let code = SequenceRepository::allocate_in(&txn, SequenceKind::Client).await?;
        let now = Utc::now().into();

        let client = clients::ActiveModel {
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

        let created = client.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the client does not exist or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<clients::Model, PartyRepoError> {
        clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PartyRepoError::NotFound(id))
    }

    /// Gets a client by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<clients::Model>, PartyRepoError> {
        let client = clients::Entity::find()
            .filter(clients::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(client)
    }

    /// Lists clients ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, params: &PageParams) -> Result<Page<clients::Model>, PartyRepoError> {
        let paginator = clients::Entity::find()
            .order_by_asc(clients::Column::Code)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(params.page.saturating_sub(1)))
            .await?;

        Ok(Page::new(data, params.page, params.per_page, total))
    }

    /// Applies a partial update to a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client does not exist or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateClientInput,
    ) -> Result<clients::Model, PartyRepoError> {
        let existing = self.get(id).await?;

        let mut client: clients::ActiveModel = existing.into();
        if let Some(name) = input.name {
            client.name = Set(name);
        }
        if let Some(credit_limit) = input.credit_limit {
            client.credit_limit = Set(credit_limit);
        }
        if let Some(credit_days) = input.credit_days {
            client.credit_days = Set(credit_days);
        }
        if let Some(active) = input.active {
            client.active = Set(active);
        }
        client.updated_at = Set(Utc::now().into());

        let updated = client.update(&self.db).await?;
        Ok(updated)
    }
}
