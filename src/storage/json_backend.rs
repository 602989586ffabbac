use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::Config,
    core::{
        errors::BookError,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    domain::{
        category::{Category, CategoryKind, ChartOfAccounts},
        entry::EntryRecord,
    },
};

use super::{Result, StorageBackend};

/// File-backed row store: `chart.json` and `entries.json` under one directory.
///
/// Every call re-reads the file it touches, so several handles on the same
/// directory see each other's writes. Writes inside one handle are serialised.
pub struct JsonStorage {
    chart_file: PathBuf,
    entries_file: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let store = PathResolver::store_dir_in(&base);
        ensure_dir(&store)?;
        Ok(Self {
            chart_file: PathResolver::chart_file_in(&store),
            entries_file: PathResolver::entries_file_in(&store),
            write_lock: Mutex::new(()),
        })
    }

    /// Honours `data_dir` from the configuration when it is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.data_dir.clone())
    }

    pub fn chart_path(&self) -> &Path {
        &self.chart_file
    }

    pub fn entries_path(&self) -> &Path {
        &self.entries_file
    }

    fn read_chart(&self) -> Result<ChartOfAccounts> {
        Ok(read_json(&self.chart_file)?.unwrap_or_else(ChartOfAccounts::starter))
    }

    fn read_entries(&self) -> Result<Vec<EntryRecord>> {
        Ok(read_json(&self.entries_file)?.unwrap_or_default())
    }

    fn edit_chart<T>(&self, edit: impl FnOnce(&mut ChartOfAccounts) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let mut chart = self.read_chart()?;
        let outcome = edit(&mut chart)?;
        write_json(&self.chart_file, &chart)?;
        Ok(outcome)
    }

    fn edit_entries<T>(&self, edit: impl FnOnce(&mut Vec<EntryRecord>) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let mut rows = self.read_entries()?;
        let outcome = edit(&mut rows)?;
        write_json(&self.entries_file, &rows)?;
        Ok(outcome)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| BookError::StorageError("json storage lock poisoned".into()))
    }
}

impl StorageBackend for JsonStorage {
    fn fetch_chart(&self) -> Result<ChartOfAccounts> {
        self.read_chart()
    }

    fn fetch_entries(&self) -> Result<Vec<EntryRecord>> {
        self.read_entries()
    }

    fn insert_entry(&self, mut record: EntryRecord) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        record.id = id.clone();
        self.edit_entries(|rows| {
            rows.push(record);
            Ok(())
        })?;
        debug!(id = %id, path = %self.entries_file.display(), "entry row written");
        Ok(id)
    }

    fn update_entry(&self, id: &str, mut record: EntryRecord) -> Result<()> {
        record.id = id.to_string();
        self.edit_entries(|rows| {
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| BookError::EntryNotFound(id.to_string()))?;
            *row = record;
            Ok(())
        })
    }

    fn delete_entry(&self, id: &str) -> Result<()> {
        self.edit_entries(|rows| {
            let before = rows.len();
            rows.retain(|row| row.id != id);
            if rows.len() == before {
                Err(BookError::EntryNotFound(id.to_string()))
            } else {
                Ok(())
            }
        })
    }

    fn insert_category(&self, kind: CategoryKind, name: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.edit_chart(|chart| {
            chart.insert(kind, Category::new(id.clone(), name));
            Ok(())
        })?;
        Ok(id)
    }

    fn rename_category(&self, kind: CategoryKind, id: &str, name: &str) -> Result<()> {
        self.edit_chart(|chart| {
            if chart.rename(kind, id, name) {
                Ok(())
            } else {
                Err(BookError::CategoryNotFound(format!("{} #{}", kind, id)))
            }
        })
    }

    fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()> {
        self.edit_chart(|chart| {
            chart
                .remove(kind, id)
                .map(|_| ())
                .ok_or_else(|| BookError::CategoryNotFound(format!("{} #{}", kind, id)))
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)
}
