pub mod json_backend;
pub mod memory;

use crate::{
    core::errors::BookError,
    domain::{
        category::{CategoryKind, ChartOfAccounts},
        entry::EntryRecord,
    },
};

pub type Result<T> = std::result::Result<T, BookError>;

/// Row store holding the chart of accounts and the entries.
///
/// Stands in for the hosted backend: plain create/read/update/delete calls,
/// with ids assigned by the backend on creation.
pub trait StorageBackend: Send + Sync {
    fn fetch_chart(&self) -> Result<ChartOfAccounts>;
    fn fetch_entries(&self) -> Result<Vec<EntryRecord>>;

    /// Persists a new row and returns the id the backend assigned to it.
    fn insert_entry(&self, record: EntryRecord) -> Result<String>;
    fn update_entry(&self, id: &str, record: EntryRecord) -> Result<()>;
    fn delete_entry(&self, id: &str) -> Result<()>;

    fn insert_category(&self, kind: CategoryKind, name: &str) -> Result<String>;
    fn rename_category(&self, kind: CategoryKind, id: &str, name: &str) -> Result<()>;
    fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
