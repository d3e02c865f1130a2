use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{ContactRecord, ImportCredentials, Provider},
    services::persistence::{ContactPersistence, ImportStatus},
};

/// Source of raw contacts for a provider.
///
/// Concrete implementations own the per-service API calls and OAuth
/// handling and live outside this crate.
#[async_trait]
pub trait ContactSource: Send + Sync {
    async fn fetch_contacts(
        &self,
        provider: Provider,
        credentials: &ImportCredentials,
    ) -> AppResult<Vec<ContactRecord>>;
}

/// Import of one provider's contact list for one user: fetch, normalize,
/// persist, count.
pub struct ProviderImport {
    provider: Provider,
    source: Arc<dyn ContactSource>,
    persistence: Arc<dyn ContactPersistence>,
}

impl ProviderImport {
    pub fn new(
        provider: Provider,
        source: Arc<dyn ContactSource>,
        persistence: Arc<dyn ContactPersistence>,
    ) -> Self {
        Self {
            provider,
            source,
            persistence,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Runs the import and returns the final counters. Duplicates are
    /// counted, not failed; a storage error aborts the batch and propagates.
    pub async fn run(&self, credentials: &ImportCredentials) -> AppResult<ImportStatus> {
        let contacts = self
            .source
            .fetch_contacts(self.provider, credentials)
            .await?;
        tracing::info!(
            provider = %self.provider,
            count = contacts.len(),
            "fetched contacts"
        );

        let mut status = None;
        for record in contacts {
            let record = record.normalized();
            status = Some(
                self.persistence
                    .persist(&record, status, credentials)
                    .await?,
            );
        }

        let status = status.unwrap_or_default();
        tracing::info!(
            provider = %self.provider,
            total = status.total,
            imported = status.imported,
            "import finished"
        );
        Ok(status)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use tokio::sync::Mutex;
    use uuid::Uuid;

    use super::*;

    /// In-memory stand-in for [`crate::services::PgPersistence`]: same
    /// find-or-create semantics, keyed on the (owner, email, name) triple.
    #[derive(Default)]
    pub struct MemoryPersistence {
        seen: Mutex<HashSet<(Uuid, Option<String>, Option<String>)>>,
    }

    #[async_trait]
    impl ContactPersistence for MemoryPersistence {
        async fn persist_contact(
            &self,
            record: &ContactRecord,
            mut status: ImportStatus,
            credentials: &ImportCredentials,
        ) -> AppResult<ImportStatus> {
            use crate::services::persistence::PersistOutcome;

            let key = (
                credentials.user_id,
                record.email.clone(),
                record.name.clone(),
            );
            let outcome = if self.seen.lock().await.insert(key) {
                PersistOutcome::Created
            } else {
                PersistOutcome::AlreadyExists
            };
            status.record(outcome);
            Ok(status)
        }
    }

    /// Fixture source returning the same canned contacts for any provider.
    pub struct FixtureSource(pub Vec<ContactRecord>);

    #[async_trait]
    impl ContactSource for FixtureSource {
        async fn fetch_contacts(
            &self,
            _provider: Provider,
            _credentials: &ImportCredentials,
        ) -> AppResult<Vec<ContactRecord>> {
            Ok(self.0.clone())
        }
    }

    pub fn record(email: Option<&str>, name: Option<&str>) -> ContactRecord {
        ContactRecord {
            name: name.map(String::from),
            email: email.map(String::from),
            phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::testing::{record, FixtureSource, MemoryPersistence};
    use super::*;

    #[tokio::test]
    async fn duplicate_triple_counts_total_but_not_imported() {
        let persistence = MemoryPersistence::default();
        let credentials = ImportCredentials::new(Uuid::new_v4());
        let contact = record(Some("a@x.com"), Some("A"));

        let status = persistence
            .persist(&contact, None, &credentials)
            .await
            .unwrap();
        assert_eq!((status.total, status.imported), (1, 1));

        let status = persistence
            .persist(&contact, Some(status), &credentials)
            .await
            .unwrap();
        assert_eq!((status.total, status.imported), (2, 1));
    }

    #[tokio::test]
    async fn same_triple_for_different_owners_is_not_a_duplicate() {
        let persistence = MemoryPersistence::default();
        let contact = record(Some("a@x.com"), Some("A"));

        for _ in 0..2 {
            let credentials = ImportCredentials::new(Uuid::new_v4());
            let status = persistence
                .persist(&contact, None, &credentials)
                .await
                .unwrap();
            assert_eq!((status.total, status.imported), (1, 1));
        }
    }

    #[tokio::test]
    async fn import_counts_duplicates_once() {
        let source = FixtureSource(vec![
            record(Some("a@x.com"), Some("A")),
            record(Some("a@x.com"), Some("A")),
            record(Some("b@x.com"), Some("B")),
        ]);
        let import = ProviderImport::new(
            Provider::Google,
            Arc::new(source),
            Arc::new(MemoryPersistence::default()),
        );

        let status = import
            .run(&ImportCredentials::new(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(status.total, 3);
        assert_eq!(status.imported, 2);
    }

    #[tokio::test]
    async fn import_of_empty_contact_list_yields_zero_status() {
        let import = ProviderImport::new(
            Provider::Yahoo,
            Arc::new(FixtureSource(vec![])),
            Arc::new(MemoryPersistence::default()),
        );

        let status = import
            .run(&ImportCredentials::new(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(status, ImportStatus::default());
    }

    #[tokio::test]
    async fn import_normalizes_records_before_persisting() {
        // Same contact twice, once with an empty name string: both must land
        // on the same (owner, email, name) key after normalization.
        let source = FixtureSource(vec![
            ContactRecord {
                name: Some("".to_string()),
                email: Some("a@x.com".to_string()),
                phone: None,
            },
            ContactRecord {
                name: None,
                email: Some("a@x.com".to_string()),
                phone: Some("801 BAD PHONE".to_string()),
            },
        ]);
        let import = ProviderImport::new(
            Provider::Twitter,
            Arc::new(source),
            Arc::new(MemoryPersistence::default()),
        );

        let status = import
            .run(&ImportCredentials::new(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!((status.total, status.imported), (2, 1));
    }
}
