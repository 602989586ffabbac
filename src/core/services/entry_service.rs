//! Business logic helpers for managing entries.

use tracing::debug;

use crate::core::errors::BookError;
use crate::domain::book::Book;
use crate::domain::entry::{Entry, EntryDraft};

use super::ServiceResult;

/// Provides validated CRUD helpers for the in-memory entry list.
pub struct EntryService;

impl EntryService {
    /// Inserts an entry whose id the backend already assigned.
    pub fn insert(book: &mut Book, entry: Entry) -> ServiceResult<String> {
        Self::validate_value(entry.value)?;
        if entry.id.is_empty() {
            return Err(BookError::InvalidInput("entry id must not be empty".into()));
        }
        if book.entry(&entry.id).is_some() {
            return Err(BookError::InvalidInput(format!(
                "entry `{}` already exists",
                entry.id
            )));
        }
        let id = entry.id.clone();
        debug!(id = %id, entry_type = %entry.entry_type, "inserting entry");
        book.entries_mut().push(entry);
        Ok(id)
    }

    /// Replaces every non-id field of the entry identified by `id`.
    pub fn replace<'a>(
        book: &'a mut Book,
        id: &str,
        draft: EntryDraft,
    ) -> ServiceResult<&'a Entry> {
        Self::validate_value(draft.value)?;
        let position = Self::position(book, id)?;
        let entries = book.entries_mut();
        entries[position] = Entry::from_draft(id, draft);
        debug!(id, "replaced entry");
        Ok(&entries[position])
    }

    /// Removes the entry identified by `id`, returning the removed instance.
    pub fn remove(book: &mut Book, id: &str) -> ServiceResult<Entry> {
        let position = Self::position(book, id)?;
        debug!(id, "removing entry");
        Ok(book.entries_mut().remove(position))
    }

    pub fn list(book: &Book) -> &[Entry] {
        book.entries()
    }

    pub(crate) fn validate_value(value: f64) -> ServiceResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(BookError::InvalidInput(format!(
                "entry value must be a finite number, got {}",
                value
            )))
        }
    }

    fn position(book: &Book, id: &str) -> ServiceResult<usize> {
        book.entries()
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| BookError::EntryNotFound(id.to_string()))
    }
}
