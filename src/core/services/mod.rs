pub mod category_service;
pub mod entry_service;
pub mod filter_service;
pub mod summary_service;

pub use category_service::CategoryService;
pub use entry_service::EntryService;
pub use filter_service::{entries_in_year, PeriodFilter};
pub use summary_service::SummaryService;

pub type ServiceResult<T> = crate::core::errors::Result<T>;
