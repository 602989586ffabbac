use tracing::debug;

use crate::core::errors::BookError;
use crate::domain::book::Book;
use crate::domain::category::{Category, CategoryKind};

use super::ServiceResult;

/// Validated edits to the chart of accounts.
///
/// Names must be non-empty but need not be unique. Removing a category never
/// touches the entries that reference it.
pub struct CategoryService;

impl CategoryService {
    pub fn add(
        book: &mut Book,
        kind: CategoryKind,
        id: impl Into<String>,
        name: &str,
    ) -> ServiceResult<Category> {
        let name = Self::validate_name(name)?;
        let id = id.into();
        if book.chart.get(kind, &id).is_some() {
            return Err(BookError::InvalidInput(format!(
                "{} category `{}` already exists",
                kind, id
            )));
        }
        let category = Category::new(id, name);
        debug!(%kind, id = %category.id, name = %category.name, "adding category");
        book.chart.insert(kind, category.clone());
        book.touch();
        Ok(category)
    }

    pub fn rename(book: &mut Book, kind: CategoryKind, id: &str, name: &str) -> ServiceResult<()> {
        let name = Self::validate_name(name)?;
        if !book.chart.rename(kind, id, name) {
            return Err(BookError::CategoryNotFound(format!("{} #{}", kind, id)));
        }
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, kind: CategoryKind, id: &str) -> ServiceResult<Category> {
        let removed = book
            .chart
            .remove(kind, id)
            .ok_or_else(|| BookError::CategoryNotFound(format!("{} #{}", kind, id)))?;
        debug!(%kind, id, "removed category");
        book.touch();
        Ok(removed)
    }

    pub fn list(book: &Book, kind: CategoryKind) -> &[Category] {
        book.chart.items(kind)
    }

    pub(crate) fn validate_name(candidate: &str) -> ServiceResult<&str> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            Err(BookError::InvalidInput("category name must not be empty".into()))
        } else {
            Ok(trimmed)
        }
    }
}
