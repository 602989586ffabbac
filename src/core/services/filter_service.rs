//! Period filter behind the ledger view and the reports.

use std::cmp::Reverse;

use chrono::Datelike;

use crate::domain::entry::Entry;
use crate::domain::period::Period;

/// Selects the entries of one month, optionally narrowed by a search term.
///
/// Matching is on the calendar date stored with the entry. Entries whose date
/// could not be read are never selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    period: Period,
    search: String,
}

impl PeriodFilter {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            search: String::new(),
        }
    }

    /// Case-insensitive substring matched against description or client name.
    /// An empty term matches everything.
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        self.search = term.as_ref().to_lowercase();
        self
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry
            .date
            .is_some_and(|date| self.period.contains(date))
            && entry.matches_search(&self.search)
    }

    /// Matching entries in input order.
    pub fn apply<'a, I>(&self, entries: I) -> Vec<&'a Entry>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .collect()
    }

    /// Matching entries, newest first. Entries on the same day keep input order.
    pub fn ledger_view<'a, I>(&self, entries: I) -> Vec<&'a Entry>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut selected = self.apply(entries);
        selected.sort_by_key(|entry| Reverse(entry.date));
        selected
    }
}

/// Every dated entry that falls in `year`.
pub fn entries_in_year<'a, I>(entries: I, year: i32) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.date.is_some_and(|date| date.year() == year))
        .collect()
}
