//! Calendar months used to scope the ledger and the reports.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::errors::{BookError, Result};

/// A (month, year) pair. `month` is a 0-based index: 0 is January, 11 is December.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = BookError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        Period::new(raw.month, raw.year)
    }
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if month > 11 {
            return Err(BookError::InvalidInput(format!(
                "month index must be between 0 and 11, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// 1-based month number, as written in dates.
    pub fn month_number(&self) -> u32 {
        self.month + 1
    }

    /// The month before; stays put at the earliest representable year.
    pub fn previous(&self) -> Self {
        if self.month == 0 {
            match self.year.checked_sub(1) {
                Some(year) => Self { year, month: 11 },
                None => *self,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after; stays put at the latest representable year.
    pub fn next(&self) -> Self {
        if self.month == 11 {
            match self.year.checked_add(1) {
                Some(year) => Self { year, month: 0 },
                None => *self,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_number())
    }
}

/// Month navigator behind the ledger's previous/next buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCursor {
    current: Period,
}

impl MonthCursor {
    pub fn new(start: Period) -> Self {
        Self { current: start }
    }

    /// Starts on the month of the local calendar date.
    pub fn today() -> Self {
        Self::new(Period::containing(Local::now().date_naive()))
    }

    pub fn current(&self) -> Period {
        self.current
    }

    pub fn step_back(&mut self) -> Period {
        self.current = self.current.previous();
        self.current
    }

    pub fn step_forward(&mut self) -> Period {
        self.current = self.current.next();
        self.current
    }

    pub fn jump_to(&mut self, period: Period) {
        self.current = period;
    }
}
