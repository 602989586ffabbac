use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{category::ChartOfAccounts, entry::Entry};

/// In-memory bookkeeping state: the chart of accounts plus every entry.
///
/// Entries sit behind an `Arc` so snapshots are cheap; a mutation after a
/// snapshot was taken clones the list instead of touching the snapshot.
#[derive(Debug, Clone)]
pub struct Book {
    pub chart: ChartOfAccounts,
    entries: Arc<Vec<Entry>>,
    version: u64,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(chart: ChartOfAccounts, entries: Vec<Entry>) -> Self {
        Self {
            chart,
            entries: Arc::new(entries),
            version: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Mutable access to the entry list; bumps the version.
    pub fn entries_mut(&mut self) -> &mut Vec<Entry> {
        self.touch();
        Arc::make_mut(&mut self.entries)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            version: self.version,
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(ChartOfAccounts::default(), Vec::new())
    }
}

/// Immutable, fully loaded view of the entries at one book version.
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    version: u64,
    entries: Arc<Vec<Entry>>,
}

impl EntrySnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntrySnapshot {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
