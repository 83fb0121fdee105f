//! Request types for the shift earnings API.
//!
//! Shift bodies are [`ShiftDraft`](crate::models::ShiftDraft)s and catalog
//! bodies are the catalog models themselves; only the query strings need
//! types of their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Period;

/// Query string for `GET /shifts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftsQuery {
    /// Only list shifts starting on this day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query string for `GET /reports`.
///
/// `year` is required; without `month` the report covers the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// The year to report on.
    pub year: i32,
    /// The month to report on, 1 through 12.
    #[serde(default)]
    pub month: Option<u32>,
}

impl ReportQuery {
    /// Validates the query and converts it into a [`Period`].
    ///
    /// Returns the offending field name on failure.
    pub fn into_period(self) -> Result<Period, String> {
        match self.month {
            Some(month) if !(1..=12).contains(&month) => {
                Err(format!("month must be between 1 and 12, got {}", month))
            }
            month => Ok(Period::from_query(self.year, month)),
        }
    }
}
