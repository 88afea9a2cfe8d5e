//! Credit repository for party credit and transaction stats.
//!
//! Clients and suppliers are separate tables but carry the same credit
//! capability. [`PartyRef`] names a row in either table; the operations
//! here lock that row, apply the pure [`CreditAccount`] rules, and
//! persist the result, so the two tables cannot drift apart in behavior.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QuerySelect,
    Set, TransactionTrait,
};
use uuid::Uuid;

use comercia_core::credit::{CreditAccount, CreditError};

use crate::entities::{clients, suppliers};

/// Error types for party credit operations.
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    /// Party not found.
    #[error("Party not found: {0}")]
    NotFound(Uuid),

    /// Credit rule violation.
    #[error(transparent)]
    Credit(#[from] CreditError),

    /// The party row could not be locked in time.
    #[error("Timed out waiting for the party row lock")]
    LockTimeout,

    /// Database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for PartyError {
    fn from(err: DbErr) -> Self {
        if super::is_lock_timeout(&err) {
            Self::LockTimeout
        } else {
            Self::Database(err)
        }
    }
}

/// Which table a party row lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyKind {
    /// A row in `clients`.
    Client,
    /// A row in `suppliers`.
    Supplier,
}

/// A reference to a credit-bearing party row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyRef {
    /// Table the row lives in.
    pub kind: PartyKind,
    /// Row ID.
    pub id: Uuid,
}

impl PartyRef {
    /// A client reference.
    #[must_use]
    pub const fn client(id: Uuid) -> Self {
        Self {
            kind: PartyKind::Client,
            id,
        }
    }

    /// A supplier reference.
    #[must_use]
    pub const fn supplier(id: Uuid) -> Self {
        Self {
            kind: PartyKind::Supplier,
            id,
        }
    }
}

/// A locked party row from either table.
enum PartyRow {
    Client(clients::Model),
    Supplier(suppliers::Model),
}

impl PartyRow {
    /// Fetches the row with an exclusive lock.
    async fn lock(txn: &DatabaseTransaction, party: PartyRef) -> Result<Self, PartyError> {
        match party.kind {
            PartyKind::Client => clients::Entity::find_by_id(party.id)
                .lock_exclusive()
                .one(txn)
                .await?
                .map(Self::Client)
                .ok_or(PartyError::NotFound(party.id)),
            PartyKind::Supplier => suppliers::Entity::find_by_id(party.id)
                .lock_exclusive()
                .one(txn)
                .await?
                .map(Self::Supplier)
                .ok_or(PartyError::NotFound(party.id)),
        }
    }

    /// Fetches the row without locking it.
    async fn fetch(txn: &DatabaseTransaction, party: PartyRef) -> Result<Self, PartyError> {
        match party.kind {
            PartyKind::Client => clients::Entity::find_by_id(party.id)
                .one(txn)
                .await?
                .map(Self::Client)
                .ok_or(PartyError::NotFound(party.id)),
            PartyKind::Supplier => suppliers::Entity::find_by_id(party.id)
                .one(txn)
                .await?
                .map(Self::Supplier)
                .ok_or(PartyError::NotFound(party.id)),
        }
    }

    /// The row's credit fields as a pure account snapshot.
    fn account(&self) -> CreditAccount {
        match self {
            Self::Client(row) => CreditAccount {
                credit_limit: row.credit_limit,
                credit_used: row.credit_used,
                credit_days: row.credit_days,
                active: row.active,
            },
            Self::Supplier(row) => CreditAccount {
                credit_limit: row.credit_limit,
                credit_used: row.credit_used,
                credit_days: row.credit_days,
                active: row.active,
            },
        }
    }

    /// Persists a new `credit_used` value.
    async fn write_credit_used(
        self,
        txn: &DatabaseTransaction,
        new_used: Decimal,
    ) -> Result<(), PartyError> {
        let now = Utc::now().into();
        match self {
            Self::Client(row) => {
                let mut model: clients::ActiveModel = row.into();
                model.credit_used = Set(new_used);
                model.updated_at = Set(now);
                model.update(txn).await?;
            }
            Self::Supplier(row) => {
                let mut model: suppliers::ActiveModel = row.into();
                model.credit_used = Set(new_used);
                model.updated_at = Set(now);
                model.update(txn).await?;
            }
        }
        Ok(())
    }

    /// Adds a completed order to the party's lifetime stats.
    ///
    /// The transaction date always overwrites the stored one, even when
    /// it is earlier.
    async fn write_transaction(
        self,
        txn: &DatabaseTransaction,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<(), PartyError> {
        let now = Utc::now().into();
        match self {
            Self::Client(row) => {
                let total = row.total_transacted + amount;
                let mut model: clients::ActiveModel = row.into();
                model.total_transacted = Set(total);
                model.last_transaction_date = Set(Some(date));
                model.updated_at = Set(now);
                model.update(txn).await?;
            }
            Self::Supplier(row) => {
                let total = row.total_transacted + amount;
                let mut model: suppliers::ActiveModel = row.into();
                model.total_transacted = Set(total);
                model.last_transaction_date = Set(Some(date));
                model.updated_at = Set(now);
                model.update(txn).await?;
            }
        }
        Ok(())
    }
}

/// Repository for credit operations on clients and suppliers.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    db: DatabaseConnection,
}

impl CreditRepository {
    /// Creates a new credit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether the party can fund a credit purchase of `amount`.
    ///
    /// # Errors
    ///
    /// Returns an error if the party does not exist or the query fails.
    pub async fn can_buy_on_credit(
        &self,
        party: PartyRef,
        amount: Decimal,
    ) -> Result<bool, PartyError> {
        let txn = self.db.begin().await?;
        let row = PartyRow::fetch(&txn, party).await?;
        let allowed = row.account().can_buy_on_credit(amount);
        txn.commit().await?;
        Ok(allowed)
    }

    /// Consumes credit for the party in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the party is missing, the amount would exceed
    /// the credit limit, or the database operation fails.
    pub async fn use_credit(&self, party: PartyRef, amount: Decimal) -> Result<Decimal, PartyError> {
        let txn = self.db.begin().await?;
        let new_used = Self::use_credit_in(&txn, party, amount).await?;
        txn.commit().await?;
        Ok(new_used)
    }

    /// Releases credit for the party in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the party is missing or the database operation
    /// fails.
    pub async fn release_credit(
        &self,
        party: PartyRef,
        amount: Decimal,
    ) -> Result<Decimal, PartyError> {
        let txn = self.db.begin().await?;
        let new_used = Self::release_credit_in(&txn, party, amount).await?;
        txn.commit().await?;
        Ok(new_used)
    }

    /// Records a completed order against the party in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the party is missing or the database operation
    /// fails.
    pub async fn record_transaction(
        &self,
        party: PartyRef,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<(), PartyError> {
        let txn = self.db.begin().await?;
        Self::record_transaction_in(&txn, party, amount, date).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Reads the party's credit fields inside an existing transaction,
    /// without locking the row.
    pub(crate) async fn account_in(
        txn: &DatabaseTransaction,
        party: PartyRef,
    ) -> Result<CreditAccount, PartyError> {
        Ok(PartyRow::fetch(txn, party).await?.account())
    }

    /// Locks the party row, applies the credit-use rule, and persists the
    /// new `credit_used`. Fails without any partial application when the
    /// amount would push usage past the limit.
    pub(crate) async fn use_credit_in(
        txn: &DatabaseTransaction,
        party: PartyRef,
        amount: Decimal,
    ) -> Result<Decimal, PartyError> {
        let row = PartyRow::lock(txn, party).await?;
        let new_used = row.account().use_credit(amount)?;
        row.write_credit_used(txn, new_used).await?;
        Ok(new_used)
    }

    /// Locks the party row and releases credit, flooring usage at zero.
    pub(crate) async fn release_credit_in(
        txn: &DatabaseTransaction,
        party: PartyRef,
        amount: Decimal,
    ) -> Result<Decimal, PartyError> {
        let row = PartyRow::lock(txn, party).await?;
        let new_used = row.account().release_credit(amount);
        row.write_credit_used(txn, new_used).await?;
        Ok(new_used)
    }

    /// Locks the party row and adds the order to its lifetime stats.
    pub(crate) async fn record_transaction_in(
        txn: &DatabaseTransaction,
        party: PartyRef,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<(), PartyError> {
        let row = PartyRow::lock(txn, party).await?;
        row.write_transaction(txn, amount, date).await
    }
}
