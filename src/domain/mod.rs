pub mod book;
pub mod category;
pub mod entry;
pub mod period;
pub mod report;

pub use book::{Book, EntrySnapshot};
pub use category::{Category, CategoryKind, CategoryResolver, ChartOfAccounts};
pub use entry::{Entry, EntryDraft, EntryRecord, EntryType};
pub use period::{MonthCursor, Period};
pub use report::{
    BreakdownRow, MonthBucket, MonthlySeries, PeriodReport, TypeTotals,
    DEFAULT_UNCATEGORIZED_LABEL,
};
