use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::{
    core::errors::BookError,
    domain::{
        category::{Category, CategoryKind, ChartOfAccounts},
        entry::EntryRecord,
    },
};

use super::{Result, StorageBackend};

#[derive(Debug, Default)]
struct MemoryState {
    chart: ChartOfAccounts,
    entries: Vec<EntryRecord>,
}

/// In-process backend. Rows live for as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self::with_rows(chart, Vec::new())
    }

    /// Seeds raw rows as the backend would hold them, unnormalised.
    pub fn with_rows(chart: ChartOfAccounts, entries: Vec<EntryRecord>) -> Self {
        Self {
            state: Mutex::new(MemoryState { chart, entries }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| BookError::StorageError("memory backend lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn fetch_chart(&self) -> Result<ChartOfAccounts> {
        Ok(self.lock()?.chart.clone())
    }

    fn fetch_entries(&self) -> Result<Vec<EntryRecord>> {
        Ok(self.lock()?.entries.clone())
    }

    fn insert_entry(&self, mut record: EntryRecord) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        record.id = id.clone();
        self.lock()?.entries.push(record);
        Ok(id)
    }

    fn update_entry(&self, id: &str, mut record: EntryRecord) -> Result<()> {
        let mut state = self.lock()?;
        let row = state
            .entries
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| BookError::EntryNotFound(id.to_string()))?;
        record.id = id.to_string();
        *row = record;
        Ok(())
    }

    fn delete_entry(&self, id: &str) -> Result<()> {
        let mut state = self.lock()?;
        let before = state.entries.len();
        state.entries.retain(|row| row.id != id);
        if state.entries.len() == before {
            return Err(BookError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    fn insert_category(&self, kind: CategoryKind, name: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.lock()?.chart.insert(kind, Category::new(id.clone(), name));
        Ok(id)
    }

    fn rename_category(&self, kind: CategoryKind, id: &str, name: &str) -> Result<()> {
        if self.lock()?.chart.rename(kind, id, name) {
            Ok(())
        } else {
            Err(BookError::CategoryNotFound(format!("{} #{}", kind, id)))
        }
    }

    fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()> {
        self.lock()?
            .chart
            .remove(kind, id)
            .map(|_| ())
            .ok_or_else(|| BookError::CategoryNotFound(format!("{} #{}", kind, id)))
    }
}
