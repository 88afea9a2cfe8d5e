//! Sequence repository for gapless entity code allocation.
//!
//! Codes come from a per-kind counter row instead of a `MAX(code)` scan,
//! so an allocated-then-voided order never causes its number to be
//! reissued and two writers can never read the same maximum.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QuerySelect,
    Set, TransactionTrait,
};

use comercia_core::sequence::{self, SequenceKind};

use crate::entities::sequences;

/// Error types for sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// The counter row could not be locked in time.
    #[error("Timed out waiting for the sequence counter lock")]
    LockTimeout,

    /// Database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for SequenceError {
    fn from(err: DbErr) -> Self {
        if super::is_lock_timeout(&err) {
            Self::LockTimeout
        } else {
            Self::Database(err)
        }
    }
}

/// Repository for allocating sequential entity codes.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    db: DatabaseConnection,
}

impl SequenceRepository {
    /// Creates a new sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates the next code for `kind` in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter lock times out or the database
    /// operation fails.
    pub async fn allocate(&self, kind: SequenceKind) -> Result<String, SequenceError> {
        let txn = self.db.begin().await?;
        let code = Self::allocate_in(&txn, kind).await?;
        txn.commit().await?;
        Ok(code)
    }

    /// Allocates the next code for `kind` inside an existing transaction.
    ///
    /// Locks the counter row exclusively before bumping it. Used by the
    /// entity repositories so the code and the row it names commit or
    /// roll back together.
    pub(crate) async fn allocate_in(
        txn: &DatabaseTransaction,
        kind: SequenceKind,
    ) -> Result<String, SequenceError> {
        let now = Utc::now().into();

        let row = sequences::Entity::find_by_id(kind.as_str())
            .lock_exclusive()
            .one(txn)
            .await?;

        let last = row.as_ref().and_then(|r| u64::try_from(r.last_number).ok());
        let next = sequence::next_number(last);
        let next_db = i64::try_from(next).unwrap_or(i64::MAX);

        match row {
            Some(existing) => {
                let mut counter: sequences::ActiveModel = existing.into();
                counter.last_number = Set(next_db);
                counter.updated_at = Set(now);
                counter.update(txn).await?;
            }
            None => {
                let counter = sequences::ActiveModel {
                    entity: Set(kind.as_str().to_owned()),
                    last_number: Set(next_db),
                    updated_at: Set(now),
                };
                counter.insert(txn).await?;
            }
        }

        let code = sequence::format_code(kind, next);
        tracing::debug!(kind = %kind, %code, "allocated sequence code");
        Ok(code)
    }
}
