#![doc(test(attr(deny(warnings))))]

//! Bookkeeping core: chart of accounts, dated entries, and the period filter
//! and aggregation engine behind the ledger and reports views.
//!
//! State is loaded from a [`storage::StorageBackend`] into a
//! [`domain::Book`] owned by [`core::BookManager`]. Reads go through an
//! immutable [`domain::EntrySnapshot`] handed to
//! [`core::services::PeriodFilter`] and [`core::services::SummaryService`].

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bookkeeping core tracing initialized.");
    });
}
