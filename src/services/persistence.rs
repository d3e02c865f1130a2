use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ContactRecord, ImportCredentials},
};

/// Running counters for one import batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatus {
    /// Contacts processed, duplicates included.
    pub total: u32,
    /// Contacts that resulted in a new record.
    pub imported: u32,
}

impl ImportStatus {
    /// Folds one persist outcome into the counters.
    pub fn record(&mut self, outcome: PersistOutcome) {
        self.total += 1;
        if outcome == PersistOutcome::Created {
            self.imported += 1;
        }
    }
}

/// What the storage layer did with one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Created,
    AlreadyExists,
}

/// Strategy for recording imported contacts.
///
/// A duplicate is not an error: a contact already present for the same
/// (owner, email, name) triple counts toward `total` but not `imported`.
/// Genuine storage failures propagate to the caller rather than being
/// folded into the counters, so a batch can decide whether to abort.
#[async_trait]
pub trait ContactPersistence: Send + Sync {
    /// Entry point used by importers; initializes the status on the first
    /// contact of a batch.
    async fn persist(
        &self,
        record: &ContactRecord,
        status: Option<ImportStatus>,
        credentials: &ImportCredentials,
    ) -> AppResult<ImportStatus> {
        let status = status.unwrap_or_default();
        self.persist_contact(record, status, credentials).await
    }

    async fn persist_contact(
        &self,
        record: &ContactRecord,
        status: ImportStatus,
        credentials: &ImportCredentials,
    ) -> AppResult<ImportStatus>;
}

/// Null strategy: returns the status untouched and writes nothing. Used for
/// dry runs and for disabling persistence entirely.
pub struct NullPersistence;

#[async_trait]
impl ContactPersistence for NullPersistence {
    async fn persist_contact(
        &self,
        _record: &ContactRecord,
        status: ImportStatus,
        _credentials: &ImportCredentials,
    ) -> AppResult<ImportStatus> {
        Ok(status)
    }
}

/// Postgres-backed strategy: find-or-create keyed on (owner, email, name).
pub struct PgPersistence {
    db: PgPool,
}

impl PgPersistence {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates the contact unless a row with the same (owner, email, name)
    /// triple already exists. Uniqueness is enforced by storage, so
    /// concurrent imports for the same owner cannot double-insert.
    pub async fn find_or_create(
        &self,
        record: &ContactRecord,
        owner_id: Uuid,
    ) -> AppResult<PersistOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO imported_contacts (id, owner_id, name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner_id, email, name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            Ok(PersistOutcome::AlreadyExists)
        } else {
            Ok(PersistOutcome::Created)
        }
    }
}

#[async_trait]
impl ContactPersistence for PgPersistence {
    async fn persist_contact(
        &self,
        record: &ContactRecord,
        mut status: ImportStatus,
        credentials: &ImportCredentials,
    ) -> AppResult<ImportStatus> {
        let outcome = self.find_or_create(record, credentials.user_id).await?;
        status.record(outcome);
        Ok(status)
    }
}
