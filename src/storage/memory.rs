//! Process-local person store.
//!
//! The record list is owned by the store and guarded by a single `RwLock`; every mutation
//! builds a new list and swaps it in while holding the write lock, so read-modify-write
//! sequences (id assignment, the uniqueness check, upsert-by-name) cannot interleave.
//! Nothing survives a restart.

use crate::domain::validation::{require_unique_name, same_name};
use crate::domain::{Person, PersonDraft, PersonId};
use crate::storage::{PersonStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    people: Vec<Person>,
    /// Highest id ever handed out. Ids are never reused, even after deletion.
    high_water: u64,
}

impl MemoryState {
    fn next_id(&self) -> u64 {
        let max_existing = self
            .people
            .iter()
            .filter_map(|p| match p.id {
                PersonId::Seq(n) => Some(n),
                PersonId::Uuid(_) => None,
            })
            .max()
            .unwrap_or(0);
        max_existing.max(self.high_water) + 1
    }

    fn insert(&mut self, draft: PersonDraft) -> Person {
        let id = self.next_id();
        let person = draft.into_person(PersonId::Seq(id), Utc::now());
        let mut people = self.people.clone();
        people.push(person.clone());
        self.people = people;
        self.high_water = id;
        person
    }
}

#[derive(Default)]
pub struct MemoryPersonStore {
    state: RwLock<MemoryState>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &str) -> StoreResult<u64> {
        match id.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(StoreError::MalformedId(id.to_string())),
        }
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn list_all(&self) -> StoreResult<Vec<Person>> {
        Ok(self.state.read().await.people.clone())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.state.read().await.people.len())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id = PersonId::Seq(Self::parse_id(id)?);
        let state = self.state.read().await;
        Ok(state.people.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        let state = self.state.read().await;
        Ok(state.people.iter().find(|p| p.name == name).cloned())
    }

    async fn create(&self, draft: PersonDraft) -> StoreResult<Person> {
        draft.check_schema().map_err(StoreError::Validation)?;
        let mut state = self.state.write().await;
        Ok(state.insert(draft))
    }

    async fn create_unique(&self, draft: PersonDraft) -> StoreResult<Person> {
        draft.check_schema().map_err(StoreError::Validation)?;
        let mut state = self.state.write().await;
        if require_unique_name(&draft, &state.people).is_err() {
            return Err(StoreError::DuplicateName(draft.name().to_string()));
        }
        Ok(state.insert(draft))
    }

    async fn update_by_id(&self, id: &str, draft: PersonDraft) -> StoreResult<Option<Person>> {
        let id = PersonId::Seq(Self::parse_id(id)?);
        draft.check_schema().map_err(StoreError::Validation)?;

        let mut state = self.state.write().await;
        let Some(created) = state.people.iter().find(|p| p.id == id).map(|p| p.date) else {
            return Ok(None);
        };
        if state
            .people
            .iter()
            .any(|p| p.id != id && same_name(&p.name, draft.name()))
        {
            return Err(StoreError::DuplicateName(draft.name().to_string()));
        }
        let updated = draft.into_person(id, created);
        state.people = state
            .people
            .iter()
            .map(|p| if p.id == id { updated.clone() } else { p.clone() })
            .collect();
        Ok(Some(updated))
    }

    async fn upsert_by_name(&self, draft: PersonDraft) -> StoreResult<Person> {
        let draft = draft.normalized();
        draft.check_schema().map_err(StoreError::Validation)?;

        let mut state = self.state.write().await;
        let Some(existing) = state
            .people
            .iter()
            .find(|p| same_name(&p.name, draft.name()))
            .cloned()
        else {
            return Ok(state.insert(draft));
        };
        let updated = Person {
            number: draft.number().to_string(),
            ..existing
        };
        state.people = state
            .people
            .iter()
            .map(|p| if p.id == updated.id { updated.clone() } else { p.clone() })
            .collect();
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id = PersonId::Seq(Self::parse_id(id)?);
        let mut state = self.state.write().await;
        let removed = state.people.iter().find(|p| p.id == id).cloned();
        if removed.is_some() {
            state.people = state.people.iter().filter(|p| p.id != id).cloned().collect();
        }
        Ok(removed)
    }
}
