//! The phonebook service.
//!
//! Sits between the HTTP handlers and the record store. It owns the duplicate-name policy
//! and runs the client-input checks that apply before a strict create.

use crate::domain::validation;
use crate::domain::{Person, PersonDraft};
use crate::infra::config::DuplicateNamePolicy;
use crate::storage::{PersonStore, StoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhonebookError {
    /// Request rejected before reaching the store (missing fields, unreadable body).
    #[error("{0}")]
    ClientInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type PhonebookResult<T> = Result<T, PhonebookError>;

/// Snapshot served by `GET /info`.
#[derive(Debug, Clone)]
pub struct PhonebookInfo {
    pub count: usize,
    pub at: DateTime<Utc>,
}

impl PhonebookInfo {
    pub fn render(&self) -> String {
        format!(
            "Phonebook has info for {} people\n{}",
            self.count,
            self.at.to_rfc2822()
        )
    }
}

#[derive(Clone)]
pub struct PhonebookService {
    store: Arc<dyn PersonStore>,
    policy: DuplicateNamePolicy,
}

impl PhonebookService {
    pub fn new(store: Arc<dyn PersonStore>, policy: DuplicateNamePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> DuplicateNamePolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<dyn PersonStore> {
        &self.store
    }

    pub async fn list(&self) -> PhonebookResult<Vec<Person>> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get(&self, id: &str) -> PhonebookResult<Option<Person>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// POST semantics.
    ///
    /// - `Reject`: both fields required, name must be unique (case-insensitive), name kept as sent.
    /// - `Upsert`: name lower-cased; an existing holder of the name gets the new number.
    pub async fn add(&self, draft: PersonDraft) -> PhonebookResult<Person> {
        match self.policy {
            DuplicateNamePolicy::Reject => {
                validation::require_fields(&draft)
                    .map_err(|msg| PhonebookError::ClientInput(msg.to_string()))?;
                Ok(self.store.create_unique(draft).await?)
            }
            DuplicateNamePolicy::Upsert => Ok(self.store.upsert_by_name(draft).await?),
        }
    }

    /// PUT semantics. Under `Upsert` the name is lower-cased, as on POST.
    pub async fn replace(&self, id: &str, draft: PersonDraft) -> PhonebookResult<Option<Person>> {
        let draft = match self.policy {
            DuplicateNamePolicy::Reject => draft,
            DuplicateNamePolicy::Upsert => draft.normalized(),
        };
        Ok(self.store.update_by_id(id, draft).await?)
    }

    pub async fn remove(&self, id: &str) -> PhonebookResult<Option<Person>> {
        Ok(self.store.delete_by_id(id).await?)
    }

    pub async fn info(&self) -> PhonebookResult<PhonebookInfo> {
        Ok(PhonebookInfo {
            count: self.store.count().await?,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPersonStore;

    fn service(policy: DuplicateNamePolicy) -> PhonebookService {
        PhonebookService::new(Arc::new(MemoryPersonStore::new()), policy)
    }

    #[tokio::test]
    async fn reject_policy_checks_fields_before_the_store() {
        let svc = service(DuplicateNamePolicy::Reject);
        let err = svc
            .add(PersonDraft {
                name: Some("Ada".into()),
                number: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PhonebookError::ClientInput(ref m) if m == validation::MISSING_FIELDS));
        assert_eq!(svc.list().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn reject_policy_keeps_names_and_refuses_duplicates() {
        let svc = service(DuplicateNamePolicy::Reject);
        let ada = svc.add(PersonDraft::new("Ada", "1")).await.unwrap();
        assert_eq!(ada.name, "Ada");

        let err = svc.add(PersonDraft::new("aDA", "2")).await.unwrap_err();
        assert!(matches!(err, PhonebookError::Store(StoreError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn upsert_policy_surfaces_schema_failures() {
        let svc = service(DuplicateNamePolicy::Upsert);
        assert_eq!(svc.policy(), DuplicateNamePolicy::Upsert);
        let err = svc.add(PersonDraft::new("Ada", " ")).await.unwrap_err();
        assert!(matches!(err, PhonebookError::Store(StoreError::Validation(_))));

        svc.add(PersonDraft::new("Ada", "1")).await.unwrap();
        let updated = svc.add(PersonDraft::new("ADA", "2")).await.unwrap();
        assert_eq!(updated.number, "2");
        assert_eq!(svc.info().await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn replace_lowercases_names_only_under_upsert() {
        let svc = service(DuplicateNamePolicy::Upsert);
        svc.add(PersonDraft::new("Bob", "1")).await.unwrap();
        let bob = svc.replace("1", PersonDraft::new("BOB", "2")).await.unwrap().unwrap();
        assert_eq!(bob.name, "bob");
        assert_eq!(
            svc.store().find_by_name("bob").await.unwrap().map(|p| p.number),
            Some("2".to_string())
        );

        let svc = service(DuplicateNamePolicy::Reject);
        svc.add(PersonDraft::new("Bob", "1")).await.unwrap();
        let bob = svc.replace("1", PersonDraft::new("BOB", "2")).await.unwrap().unwrap();
        assert_eq!(bob.name, "BOB");
    }

    #[test]
    fn info_renders_count_then_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let text = PhonebookInfo { count: 3, at }.render();
        let (first, second) = text.split_once('\n').unwrap();
        assert_eq!(first, "Phonebook has info for 3 people");
        assert_eq!(DateTime::parse_from_rfc2822(second).unwrap(), at);
    }
}
