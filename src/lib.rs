pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{PhonebookError, PhonebookService};
pub use domain::{Person, PersonDraft, PersonId};
pub use infra::config::{DuplicateNamePolicy, StoreBackend};
pub use storage::{MemoryPersonStore, PersonStore, PostgresPersonStore, StoreError};
