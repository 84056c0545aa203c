//! Record store abstraction and its two backends.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPersonStore;
pub use postgres::PostgresPersonStore;

use crate::domain::{Person, PersonDraft};
use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by a `PersonStore`. The HTTP layer matches on these exhaustively.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The route id does not parse as a key for this backend.
    #[error("malformed id: {0}")]
    MalformedId(String),
    /// Schema-level constraint violation on create or update.
    #[error("{0}")]
    Validation(String),
    /// A case-insensitive name match already exists.
    #[error("name already exists: {0}")]
    DuplicateName(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for person records.
///
/// Ids arrive as the raw path segment; each backend parses them and reports
/// `StoreError::MalformedId` itself.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Every record, in storage order.
    async fn list_all(&self) -> StoreResult<Vec<Person>>;

    async fn count(&self) -> StoreResult<usize>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>>;

    /// Exact, case-sensitive match on the stored name.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Person>>;

    /// Inserts a new record with a fresh id and the current timestamp.
    async fn create(&self, draft: PersonDraft) -> StoreResult<Person>;

    /// Like `create`, but fails with `DuplicateName` if the name is taken (case-insensitive).
    async fn create_unique(&self, draft: PersonDraft) -> StoreResult<Person>;

    /// Replaces name and number of an existing record. `None` if no record has this id.
    async fn update_by_id(&self, id: &str, draft: PersonDraft) -> StoreResult<Option<Person>>;

    /// Atomically inserts the draft under its lower-cased name, or updates the number of
    /// the record already holding that name.
    async fn upsert_by_name(&self, draft: PersonDraft) -> StoreResult<Person>;

    /// Removes a record, returning it if it existed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Person>>;
}
