#![allow(dead_code)]

use std::sync::Mutex;

use bookkeeping_core::{
    config::ConfigManager,
    core::BookManager,
    domain::{Entry, EntryDraft, EntryType},
    storage::JsonStorage,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a loaded manager over a fresh JSON store, plus a config manager
/// rooted in the same temporary directory.
pub fn setup_test_env() -> (BookManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let mut manager = BookManager::new(Box::new(storage));
    manager.load().expect("load fresh book");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (manager, config_manager)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Entry built outside any manager, for the pure engine tests.
pub fn entry(id: &str, on: NaiveDate, entry_type: EntryType, value: f64) -> Entry {
    Entry::from_draft(id, EntryDraft::new(on, entry_type, value))
}
