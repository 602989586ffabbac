use std::collections::HashMap;

use chrono::Datelike;

use crate::domain::book::EntrySnapshot;
use crate::domain::category::{CategoryKind, CategoryResolver};
use crate::domain::entry::{Entry, EntryType};
use crate::domain::period::Period;
use crate::domain::report::{BreakdownRow, MonthlySeries, PeriodReport, TypeTotals};

use super::filter_service::PeriodFilter;

/// Aggregation engine: pure folds over an already selected set of entries.
///
/// Nothing here fails. Undated entries are skipped by the time series,
/// unresolvable categories are grouped under the fallback label, and empty
/// input produces zeros.
pub struct SummaryService;

impl SummaryService {
    pub fn totals_by_type<'a, I>(entries: I) -> TypeTotals
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries
            .into_iter()
            .fold(TypeTotals::default(), |mut totals, entry| {
                totals.add(entry.entry_type, entry.amount());
                totals
            })
    }

    pub fn net_balance<'a, I>(entries: I) -> f64
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        Self::totals_by_type(entries).balance()
    }

    /// Sums one entry type per resolved category name, largest first.
    ///
    /// Grouping is by name, not id: two categories sharing a name end up in a
    /// single row. Rows with equal sums keep the order in which their name was
    /// first resolved.
    pub fn category_breakdown<'a, I, R>(
        entries: I,
        entry_type: EntryType,
        resolver: &R,
        fallback_label: &str,
    ) -> Vec<BreakdownRow>
    where
        I: IntoIterator<Item = &'a Entry>,
        R: CategoryResolver + ?Sized,
    {
        let kind = CategoryKind::for_entry_type(entry_type);
        let mut rows: Vec<BreakdownRow> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in entries
            .into_iter()
            .filter(|entry| entry.entry_type == entry_type)
        {
            let name = resolver
                .resolve(kind, &entry.category_id)
                .unwrap_or(fallback_label);
            let slot = match index.get(name) {
                Some(slot) => *slot,
                None => {
                    index.insert(name.to_string(), rows.len());
                    rows.push(BreakdownRow {
                        name: name.to_string(),
                        value: 0.0,
                        entries: 0,
                    });
                    rows.len() - 1
                }
            };
            rows[slot].value += entry.amount();
            rows[slot].entries += 1;
        }

        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows
    }

    /// Twelve buckets for `year`, January first, zero-filled.
    pub fn monthly_series<'a, I>(entries: I, year: i32) -> MonthlySeries
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut series = MonthlySeries::empty(year);
        for entry in entries {
            let Some(date) = entry.date else {
                continue;
            };
            if date.year() != year {
                continue;
            }
            series.months[date.month0() as usize]
                .totals
                .add(entry.entry_type, entry.amount());
        }
        series
    }

    /// Mean amount of the given type; 0 when there are no such entries.
    pub fn average_ticket<'a, I>(entries: I, entry_type: EntryType) -> f64
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let (sum, count) = entries
            .into_iter()
            .filter(|entry| entry.entry_type == entry_type)
            .fold((0.0, 0usize), |(sum, count), entry| {
                (sum + entry.amount(), count + 1)
            });
        sum / count.max(1) as f64
    }

    /// All four views for one period, plus the series for the period's year.
    pub fn period_report<R>(
        snapshot: &EntrySnapshot,
        resolver: &R,
        period: Period,
        fallback_label: &str,
    ) -> PeriodReport
    where
        R: CategoryResolver + ?Sized,
    {
        let selected = PeriodFilter::new(period).apply(snapshot);
        let totals = Self::totals_by_type(selected.iter().copied());
        let breakdown = |entry_type| {
            Self::category_breakdown(
                selected.iter().copied(),
                entry_type,
                resolver,
                fallback_label,
            )
        };

        PeriodReport {
            period,
            totals,
            balance: totals.balance(),
            is_negative: totals.is_negative(),
            income_breakdown: breakdown(EntryType::Income),
            expense_breakdown: breakdown(EntryType::Expense),
            purchase_breakdown: breakdown(EntryType::Purchase),
            series: Self::monthly_series(snapshot, period.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{Category, ChartOfAccounts};
    use crate::domain::entry::EntryDraft;
    use crate::domain::report::DEFAULT_UNCATEGORIZED_LABEL;
    use chrono::NaiveDate;

    fn entry(id: &str, date: (i32, u32, u32), entry_type: EntryType, value: f64) -> Entry {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Entry::from_draft(id, EntryDraft::new(date, entry_type, value))
    }

    fn categorised(id: &str, category: &str, entry_type: EntryType, value: f64) -> Entry {
        let mut entry = entry(id, (2024, 3, 10), entry_type, value);
        entry.category_id = category.into();
        entry
    }

    #[test]
    fn empty_input_yields_zero_results() {
        let entries: Vec<Entry> = Vec::new();
        assert_eq!(SummaryService::totals_by_type(&entries), TypeTotals::default());
        assert_eq!(SummaryService::net_balance(&entries), 0.0);
        let chart = ChartOfAccounts::starter();
        assert!(SummaryService::category_breakdown(
            &entries,
            EntryType::Expense,
            &chart,
            DEFAULT_UNCATEGORIZED_LABEL
        )
        .is_empty());
        let series = SummaryService::monthly_series(&entries, 2024);
        assert_eq!(series.annual_totals(), TypeTotals::default());
        assert_eq!(SummaryService::average_ticket(&entries, EntryType::Income), 0.0);
    }

    #[test]
    fn totals_use_magnitudes_and_type_for_direction() {
        let mut negative = entry("b", (2024, 3, 2), EntryType::Expense, 1.0);
        negative.value = -300.0;
        let entries = vec![entry("a", (2024, 3, 1), EntryType::Income, 1000.0), negative];
        let totals = SummaryService::totals_by_type(&entries);
        assert_eq!(totals.expense, 300.0);
        assert_eq!(totals.purchase, 0.0);
        assert_eq!(SummaryService::net_balance(&entries), 700.0);
    }

    #[test]
    fn breakdown_merges_duplicate_names_and_sorts_descending() {
        let mut chart = ChartOfAccounts::default();
        chart.insert(CategoryKind::Expense, Category::new("1", "Outros"));
        chart.insert(CategoryKind::Expense, Category::new("2", "Outros"));
        chart.insert(CategoryKind::Expense, Category::new("3", "Energia"));

        let entries = vec![
            categorised("a", "1", EntryType::Expense, 100.0),
            categorised("b", "3", EntryType::Expense, 120.0),
            categorised("c", "2", EntryType::Expense, 50.0),
            categorised("d", "1", EntryType::Income, 999.0),
        ];
        let rows = SummaryService::category_breakdown(
            &entries,
            EntryType::Expense,
            &chart,
            DEFAULT_UNCATEGORIZED_LABEL,
        );
        assert_eq!(
            rows,
            vec![
                BreakdownRow {
                    name: "Outros".into(),
                    value: 150.0,
                    entries: 2
                },
                BreakdownRow {
                    name: "Energia".into(),
                    value: 120.0,
                    entries: 1
                },
            ]
        );
    }

    #[test]
    fn breakdown_groups_unknown_and_empty_ids_under_fallback() {
        let chart = ChartOfAccounts::starter();
        let entries = vec![
            categorised("a", "404", EntryType::Expense, 30.0),
            categorised("b", "", EntryType::Expense, 20.0),
            categorised("c", "1", EntryType::Expense, 40.0),
        ];
        let rows = SummaryService::category_breakdown(
            &entries,
            EntryType::Expense,
            &chart,
            DEFAULT_UNCATEGORIZED_LABEL,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, DEFAULT_UNCATEGORIZED_LABEL);
        assert_eq!(rows[0].value, 50.0);
        assert_eq!(rows[0].entries, 2);
        assert_eq!(rows[1].name, "Energia");
    }

    #[test]
    fn breakdown_ties_keep_resolution_order() {
        let chart = ChartOfAccounts::starter();
        let entries = vec![
            categorised("a", "3", EntryType::Expense, 10.0),
            categorised("b", "1", EntryType::Expense, 10.0),
            categorised("c", "2", EntryType::Expense, 10.0),
        ];
        let names: Vec<_> = SummaryService::category_breakdown(
            &entries,
            EntryType::Expense,
            &chart,
            DEFAULT_UNCATEGORIZED_LABEL,
        )
        .into_iter()
        .map(|row| row.name)
        .collect();
        assert_eq!(names, vec!["RH", "Energia", "Aluguel"]);
    }

    #[test]
    fn series_has_twelve_buckets_and_ignores_other_years() {
        let mut undated = entry("x", (2024, 1, 1), EntryType::Income, 5.0);
        undated.date = None;
        let entries = vec![
            entry("a", (2024, 1, 31), EntryType::Income, 100.0),
            entry("b", (2024, 12, 1), EntryType::Purchase, 40.0),
            entry("c", (2023, 12, 31), EntryType::Expense, 70.0),
            entry("d", (2025, 1, 1), EntryType::Expense, 70.0),
            undated,
        ];
        let series = SummaryService::monthly_series(&entries, 2024);
        assert_eq!(series.months.len(), 12);
        assert_eq!(series.months[0].totals.income, 100.0);
        assert_eq!(series.months[11].totals.purchase, 40.0);
        for bucket in &series.months[1..11] {
            assert_eq!(bucket.totals, TypeTotals::default());
        }
        assert_eq!(
            series.annual_totals(),
            TypeTotals {
                income: 100.0,
                expense: 0.0,
                purchase: 40.0
            }
        );
    }

    #[test]
    fn average_ticket_divides_by_matching_count() {
        let entries = vec![
            entry("a", (2024, 3, 1), EntryType::Income, 100.0),
            entry("b", (2024, 3, 2), EntryType::Income, 50.0),
            entry("c", (2024, 3, 3), EntryType::Expense, 1000.0),
        ];
        assert_eq!(SummaryService::average_ticket(&entries, EntryType::Income), 75.0);
        assert_eq!(SummaryService::average_ticket(&entries, EntryType::Purchase), 0.0);
    }
}
