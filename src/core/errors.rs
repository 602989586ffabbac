use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the store, storage and configuration layers.
///
/// The period filter and the aggregation engine never produce one of these:
/// bad input there is excluded or relabelled instead.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Book not loaded")]
    NotLoaded,
    #[error("Entry not found: {0}")]
    EntryNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BookError>;

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}
