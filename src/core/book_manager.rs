use tracing::{debug, info, warn};

use crate::core::errors::{BookError, Result};
use crate::core::services::{CategoryService, EntryService};
use crate::domain::book::{Book, EntrySnapshot};
use crate::domain::category::{Category, CategoryKind};
use crate::domain::entry::{Entry, EntryDraft};
use crate::storage::StorageBackend;

/// Outcome of a load from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub entries: usize,
    pub categories: usize,
    /// Rows kept in the book but excluded from every period-bounded view.
    pub undated_entries: Vec<String>,
}

/// Facade that owns the book and keeps it in step with the backend.
///
/// Every mutation is persisted first; the in-memory book only changes once
/// the backend has accepted the write. A blank id handed back by the backend
/// is rolled back there; a duplicate one is refused without touching the book,
/// since deleting it would also remove the existing row.
pub struct BookManager {
    current: Option<Book>,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Fetches the chart and every entry row, replacing any loaded book.
    pub fn load(&mut self) -> Result<LoadReport> {
        let chart = self.storage.fetch_chart()?;
        let rows = self.storage.fetch_entries()?;
        let entries: Vec<Entry> = rows.into_iter().map(Entry::from_record).collect();

        let undated_entries: Vec<String> = entries
            .iter()
            .filter(|entry| entry.date.is_none())
            .map(|entry| entry.id.clone())
            .collect();
        for id in &undated_entries {
            warn!(id = %id, "entry has an unreadable date; excluded from period views");
        }

        let report = LoadReport {
            entries: entries.len(),
            categories: chart.len(),
            undated_entries,
        };
        info!(
            entries = report.entries,
            categories = report.categories,
            "book loaded"
        );
        self.current = Some(Book::new(chart, entries));
        Ok(report)
    }

    pub fn book(&self) -> Result<&Book> {
        self.current.as_ref().ok_or(BookError::NotLoaded)
    }

    fn book_mut(&mut self) -> Result<&mut Book> {
        self.current.as_mut().ok_or(BookError::NotLoaded)
    }

    /// Immutable view of the entries for the filter and the aggregation engine.
    pub fn snapshot(&self) -> Result<EntrySnapshot> {
        Ok(self.book()?.snapshot())
    }

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<Entry> {
        EntryService::validate_value(draft.value)?;
        self.book()?;
        let mut entry = Entry::from_draft(String::new(), draft);
        let id = self
            .storage
            .insert_entry(entry.to_record())
            .map_err(|err| {
                warn!(error = %err, "backend rejected new entry");
                err
            })?;
        if id.is_empty() || self.book()?.entry(&id).is_some() {
            warn!(id = %id, "backend assigned an unusable entry id");
            if id.is_empty() {
                self.storage.delete_entry(&id)?;
            }
            return Err(BookError::StorageError(format!(
                "backend assigned an unusable entry id `{}`",
                id
            )));
        }
        entry.id = id;
        EntryService::insert(self.book_mut()?, entry.clone())?;
        Ok(entry)
    }

    pub fn update_entry(&mut self, id: &str, draft: EntryDraft) -> Result<Entry> {
        EntryService::validate_value(draft.value)?;
        if self.book()?.entry(id).is_none() {
            return Err(BookError::EntryNotFound(id.to_string()));
        }
        let replacement = Entry::from_draft(id, draft.clone());
        self.storage
            .update_entry(id, replacement.to_record())
            .map_err(|err| {
                warn!(id, error = %err, "backend rejected entry update");
                err
            })?;
        let updated = EntryService::replace(self.book_mut()?, id, draft)?;
        Ok(updated.clone())
    }

    pub fn delete_entry(&mut self, id: &str) -> Result<Entry> {
        if self.book()?.entry(id).is_none() {
            return Err(BookError::EntryNotFound(id.to_string()));
        }
        self.storage
            .delete_entry(id)
            .map_err(|err| {
                warn!(id, error = %err, "backend rejected entry deletion");
                err
            })?;
        EntryService::remove(self.book_mut()?, id)
    }

    pub fn add_category(&mut self, kind: CategoryKind, name: &str) -> Result<Category> {
        let name = CategoryService::validate_name(name)?;
        self.book()?;
        let id = self.storage.insert_category(kind, name)?;
        debug!(%kind, id = %id, "backend assigned category id");
        if id.is_empty() || self.book()?.chart.get(kind, &id).is_some() {
            warn!(%kind, id = %id, "backend assigned an unusable category id");
            if id.is_empty() {
                self.storage.delete_category(kind, &id)?;
            }
            return Err(BookError::StorageError(format!(
                "backend assigned an unusable {} id `{}`",
                kind, id
            )));
        }
        CategoryService::add(self.book_mut()?, kind, id, name)
    }

    pub fn rename_category(&mut self, kind: CategoryKind, id: &str, name: &str) -> Result<()> {
        let name = CategoryService::validate_name(name)?;
        if self.book()?.chart.get(kind, id).is_none() {
            return Err(BookError::CategoryNotFound(format!("{} #{}", kind, id)));
        }
        self.storage.rename_category(kind, id, name)?;
        CategoryService::rename(self.book_mut()?, kind, id, name)
    }

    /// Deletes the category only; entries pointing at it keep the stale id.
    pub fn delete_category(&mut self, kind: CategoryKind, id: &str) -> Result<Category> {
        if self.book()?.chart.get(kind, id).is_none() {
            return Err(BookError::CategoryNotFound(format!("{} #{}", kind, id)));
        }
        self.storage.delete_category(kind, id)?;
        CategoryService::remove(self.book_mut()?, kind, id)
    }
}
