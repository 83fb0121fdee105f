//! Reporting periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month or year used to filter shifts by start date.
///
/// # Example
///
/// ```
/// use shiftcash_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let january = Period::Month { year: 2024, month: 1 };
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
/// assert!(!january.contains_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
///
/// let year = Period::Year { year: 2024 };
/// assert!(year.contains_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// A single month (`month` is 1-based).
    Month {
        /// The year.
        year: i32,
        /// The month, 1 through 12.
        month: u32,
    },
    /// A whole year.
    Year {
        /// The year.
        year: i32,
    },
}

impl Period {
    /// Checks if a date falls within this period.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Month { year, month } => date.year() == year && date.month() == month,
            Period::Year { year } => date.year() == year,
        }
    }

    /// Builds a period from an optional month, as a report query supplies it.
    pub fn from_query(year: i32, month: Option<u32>) -> Self {
        match month {
            Some(month) => Period::Month { year, month },
            None => Period::Year { year },
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Period::Year { year } => write!(f, "{:04}", year),
        }
    }
}
