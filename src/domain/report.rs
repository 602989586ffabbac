//! Plain data produced by the aggregation engine for the report renderer.

use serde::{Deserialize, Serialize};

use super::{entry::EntryType, period::Period};

/// Label used when an entry's category cannot be resolved.
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeTotals {
    pub income: f64,
    pub expense: f64,
    pub purchase: f64,
}

impl TypeTotals {
    pub fn add(&mut self, entry_type: EntryType, amount: f64) {
        match entry_type {
            EntryType::Income => self.income += amount,
            EntryType::Expense => self.expense += amount,
            EntryType::Purchase => self.purchase += amount,
        }
    }

    pub fn get(&self, entry_type: EntryType) -> f64 {
        match entry_type {
            EntryType::Income => self.income,
            EntryType::Expense => self.expense,
            EntryType::Purchase => self.purchase,
        }
    }

    /// `income - expense - purchase`; negative is a valid result.
    pub fn balance(&self) -> f64 {
        self.income - self.expense - self.purchase
    }

    pub fn is_negative(&self) -> bool {
        self.balance() < 0.0
    }

    pub fn merge(&self, other: &TypeTotals) -> TypeTotals {
        TypeTotals {
            income: self.income + other.income,
            expense: self.expense + other.expense,
            purchase: self.purchase + other.purchase,
        }
    }
}

/// One row of a category breakdown: every entry whose category resolved to `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownRow {
    pub name: String,
    pub value: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    /// 0-based month index.
    pub month: u32,
    pub totals: TypeTotals,
}

/// Per-type sums for each month of one year, January first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySeries {
    pub year: i32,
    pub months: [MonthBucket; 12],
}

impl MonthlySeries {
    pub fn empty(year: i32) -> Self {
        let mut months = [MonthBucket {
            month: 0,
            totals: TypeTotals::default(),
        }; 12];
        for (idx, bucket) in months.iter_mut().enumerate() {
            bucket.month = idx as u32;
        }
        Self { year, months }
    }

    pub fn bucket(&self, month: u32) -> Option<&MonthBucket> {
        self.months.get(month as usize)
    }

    pub fn annual_totals(&self) -> TypeTotals {
        self.months
            .iter()
            .fold(TypeTotals::default(), |acc, bucket| acc.merge(&bucket.totals))
    }

    /// Year-to-date profit, floored at zero. Purchases count as outflow.
    pub fn accumulated_profit(&self) -> f64 {
        self.annual_totals().balance().max(0.0)
    }
}

/// The four aggregate views for one period, bundled for the reports screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub totals: TypeTotals,
    pub balance: f64,
    pub is_negative: bool,
    pub income_breakdown: Vec<BreakdownRow>,
    pub expense_breakdown: Vec<BreakdownRow>,
    pub purchase_breakdown: Vec<BreakdownRow>,
    pub series: MonthlySeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_indexed_january_to_december() {
        let series = MonthlySeries::empty(2024);
        assert_eq!(series.months.len(), 12);
        for (idx, bucket) in series.months.iter().enumerate() {
            assert_eq!(bucket.month, idx as u32);
            assert_eq!(bucket.totals, TypeTotals::default());
        }
        assert!(series.bucket(12).is_none());
    }

    #[test]
    fn balance_may_be_negative() {
        let totals = TypeTotals {
            income: 100.0,
            expense: 80.0,
            purchase: 40.0,
        };
        assert_eq!(totals.balance(), -20.0);
        assert!(totals.is_negative());
    }

    #[test]
    fn accumulated_profit_is_floored_at_zero() {
        let mut series = MonthlySeries::empty(2024);
        series.months[0].totals.add(EntryType::Income, 1000.0);
        series.months[3].totals.add(EntryType::Expense, 300.0);
        series.months[7].totals.add(EntryType::Purchase, 200.0);
        assert_eq!(series.accumulated_profit(), 500.0);

        series.months[11].totals.add(EntryType::Expense, 900.0);
        assert_eq!(series.annual_totals().balance(), -400.0);
        assert_eq!(series.accumulated_profit(), 0.0);
    }
}
