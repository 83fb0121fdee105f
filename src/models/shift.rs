//! Shift records and drafts.
//!
//! Dates and times are kept in their wire representation (`YYYY-MM-DD` and
//! zero-padded 24-hour `HH:MM`). The calculation functions parse them on use
//! and fall back to zero when they cannot, so a record with a malformed
//! timestamp never makes the engine fail.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default start time for a new shift.
pub const DEFAULT_START_TIME: &str = "09:00";
/// Default theoretical end time for a new shift.
pub const DEFAULT_END_TIME: &str = "17:00";

/// Format of every date string the engine reads or writes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded work shift.
///
/// `hours_worked`, `total_earnings` and `excess_minutes` are a cache of what the
/// engine computed at the last save. They are refreshed on every save and by
/// [`Ledger::recompute_all`](crate::ledger::Ledger::recompute_all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// Theoretical start date (`YYYY-MM-DD`).
    pub start_date: String,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// Theoretical end date.
    pub end_date: String,
    /// Theoretical end time.
    pub end_time: String,
    /// Real end date, when it differs from the theoretical one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_end_date: Option<String>,
    /// Real end time, when it differs from the theoretical one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_end_time: Option<String>,
    /// The shift type this shift belongs to.
    pub shift_type_id: String,
    /// Applied variable ids. Repeated ids apply repeatedly.
    #[serde(default)]
    pub variable_ids: Vec<String>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Cached worked hours.
    #[serde(default, with = "crate::models::serde_helpers::decimal_number")]
    pub hours_worked: Decimal,
    /// Cached earnings.
    #[serde(default, with = "crate::models::serde_helpers::decimal_number")]
    pub total_earnings: Decimal,
    /// Cached compensated excess minutes.
    #[serde(default, with = "crate::models::serde_helpers::decimal_number")]
    pub excess_minutes: Decimal,
}

impl Shift {
    /// The real end date, falling back to the theoretical end date.
    pub fn effective_real_end_date(&self) -> &str {
        non_empty(self.real_end_date.as_deref()).unwrap_or(&self.end_date)
    }

    /// The real end time, falling back to the theoretical end time.
    pub fn effective_real_end_time(&self) -> &str {
        non_empty(self.real_end_time.as_deref()).unwrap_or(&self.end_time)
    }

    /// Parses the start date, if it is well formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftcash_engine::models::Shift;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     start_date: "2024-01-07".to_string(),
    ///     start_time: "09:00".to_string(),
    ///     end_date: "2024-01-07".to_string(),
    ///     end_time: "17:00".to_string(),
    ///     real_end_date: None,
    ///     real_end_time: None,
    ///     shift_type_id: "t_regular".to_string(),
    ///     variable_ids: vec![],
    ///     notes: None,
    ///     hours_worked: Decimal::ZERO,
    ///     total_earnings: Decimal::ZERO,
    ///     excess_minutes: Decimal::ZERO,
    /// };
    /// assert_eq!(shift.start_naive_date(), NaiveDate::from_ymd_opt(2024, 1, 7));
    /// assert_eq!(shift.effective_real_end_time(), "17:00");
    /// ```
    pub fn start_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT).ok()
    }

    /// Returns the number of times `variable_id` is applied to this shift.
    pub fn variable_count(&self, variable_id: &str) -> usize {
        self.variable_ids
            .iter()
            .filter(|id| id.as_str() == variable_id)
            .count()
    }
}

/// A partial shift as supplied by a form or by an external text parser.
///
/// Every field is optional; [`ShiftDraft::resolve`] fills the gaps with the
/// same defaults a blank form starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiftDraft {
    /// Start date.
    pub start_date: Option<String>,
    /// Start time.
    pub start_time: Option<String>,
    /// Theoretical end date.
    pub end_date: Option<String>,
    /// Theoretical end time.
    pub end_time: Option<String>,
    /// Real end date.
    pub real_end_date: Option<String>,
    /// Real end time.
    pub real_end_time: Option<String>,
    /// Selected shift type.
    pub shift_type_id: Option<String>,
    /// Pre-selected variables.
    pub variable_ids: Option<Vec<String>>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl ShiftDraft {
    /// Resolves the draft into a complete [`ShiftInput`].
    ///
    /// - Missing start date falls back to `today`, start time to `09:00`.
    /// - Missing end date falls back to the start date, end time to `17:00`.
    /// - Missing real end falls back to the theoretical end.
    /// - An end date before the start date is moved to the start date. The
    ///   real end date follows it unless the real end was given explicitly
    ///   with a value different from the theoretical end.
    /// - A real end date before the start date is moved to the start date.
    ///
    /// Date ordering compares the `YYYY-MM-DD` strings directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftcash_engine::models::ShiftDraft;
    /// use chrono::NaiveDate;
    ///
    /// let draft = ShiftDraft {
    ///     start_date: Some("2024-03-05".to_string()),
    ///     end_time: Some("15:00".to_string()),
    ///     ..Default::default()
    /// };
    /// let input = draft.resolve(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    ///
    /// assert_eq!(input.start_time, "09:00");
    /// assert_eq!(input.end_date, "2024-03-05");
    /// assert_eq!(input.real_end_date, "2024-03-05");
    /// assert_eq!(input.real_end_time, "15:00");
    /// ```
    pub fn resolve(self, today: NaiveDate) -> ShiftInput {
        let today = today.format(DATE_FORMAT).to_string();

        let real_end_modified = self.real_end_date.is_some()
            && (self.real_end_date != self.end_date || self.real_end_time != self.end_time);

        let start_date = owned_non_empty(self.start_date).unwrap_or(today);
        let start_time =
            owned_non_empty(self.start_time).unwrap_or_else(|| DEFAULT_START_TIME.to_string());
        let mut end_date =
            owned_non_empty(self.end_date).unwrap_or_else(|| start_date.clone());
        let end_time =
            owned_non_empty(self.end_time).unwrap_or_else(|| DEFAULT_END_TIME.to_string());
        let mut real_end_date =
            owned_non_empty(self.real_end_date).unwrap_or_else(|| end_date.clone());
        let real_end_time =
            owned_non_empty(self.real_end_time).unwrap_or_else(|| end_time.clone());

        if start_date > end_date {
            end_date = start_date.clone();
            if !real_end_modified {
                real_end_date = start_date.clone();
            }
        }
        if start_date > real_end_date {
            real_end_date = start_date.clone();
        }

        ShiftInput {
            start_date,
            start_time,
            end_date,
            end_time,
            real_end_date,
            real_end_time,
            shift_type_id: owned_non_empty(self.shift_type_id),
            variable_ids: self.variable_ids.unwrap_or_default(),
            notes: owned_non_empty(self.notes),
        }
    }
}

/// A fully resolved shift as edited before saving.
///
/// The shift type is still optional: a preview can be computed without one,
/// but saving requires it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    /// Start date.
    pub start_date: String,
    /// Start time.
    pub start_time: String,
    /// Theoretical end date.
    pub end_date: String,
    /// Theoretical end time.
    pub end_time: String,
    /// Real end date.
    pub real_end_date: String,
    /// Real end time.
    pub real_end_time: String,
    /// Selected shift type, if any.
    pub shift_type_id: Option<String>,
    /// Current variable ids.
    pub variable_ids: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl From<&Shift> for ShiftInput {
    fn from(shift: &Shift) -> Self {
        ShiftInput {
            start_date: shift.start_date.clone(),
            start_time: shift.start_time.clone(),
            end_date: shift.end_date.clone(),
            end_time: shift.end_time.clone(),
            real_end_date: shift.effective_real_end_date().to_string(),
            real_end_time: shift.effective_real_end_time().to_string(),
            shift_type_id: Some(shift.shift_type_id.clone()),
            variable_ids: shift.variable_ids.clone(),
            notes: shift.notes.clone(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn owned_non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn make_shift() -> Shift {
        Shift {
            id: "shift_001".to_string(),
            start_date: "2024-01-07".to_string(),
            start_time: "09:00".to_string(),
            end_date: "2024-01-07".to_string(),
            end_time: "17:00".to_string(),
            real_end_date: Some("2024-01-07".to_string()),
            real_end_time: Some("17:30".to_string()),
            shift_type_id: "t_regular".to_string(),
            variable_ids: vec!["v_dcp".to_string(), "v_sun".to_string(), "v_dcp".to_string()],
            notes: Some("late train".to_string()),
            hours_worked: Decimal::new(85, 1),
            total_earnings: Decimal::new(10925, 2),
            excess_minutes: Decimal::new(3750, 2),
        }
    }

    #[test]
    fn test_empty_draft_uses_form_defaults() {
        let input = ShiftDraft::default().resolve(today());
        assert_eq!(input.start_date, "2024-01-10");
        assert_eq!(input.start_time, "09:00");
        assert_eq!(input.end_date, "2024-01-10");
        assert_eq!(input.end_time, "17:00");
        assert_eq!(input.real_end_date, "2024-01-10");
        assert_eq!(input.real_end_time, "17:00");
        assert_eq!(input.shift_type_id, None);
        assert!(input.variable_ids.is_empty());
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let draft = ShiftDraft {
            start_time: Some(String::new()),
            shift_type_id: Some(String::new()),
            ..Default::default()
        };
        let input = draft.resolve(today());
        assert_eq!(input.start_time, "09:00");
        assert_eq!(input.shift_type_id, None);
    }

    #[test]
    fn test_end_date_before_start_is_synced() {
        let draft = ShiftDraft {
            start_date: Some("2024-02-10".to_string()),
            end_date: Some("2024-02-01".to_string()),
            ..Default::default()
        };
        let input = draft.resolve(today());
        assert_eq!(input.end_date, "2024-02-10");
        assert_eq!(input.real_end_date, "2024-02-10");
    }

    #[test]
    fn test_explicit_real_end_survives_end_sync_when_later() {
        let draft = ShiftDraft {
            start_date: Some("2024-02-10".to_string()),
            end_date: Some("2024-02-01".to_string()),
            end_time: Some("06:00".to_string()),
            real_end_date: Some("2024-02-11".to_string()),
            real_end_time: Some("07:00".to_string()),
            ..Default::default()
        };
        let input = draft.resolve(today());
        assert_eq!(input.end_date, "2024-02-10");
        assert_eq!(input.real_end_date, "2024-02-11");
        assert_eq!(input.real_end_time, "07:00");
    }

    #[test]
    fn test_real_end_before_start_is_synced() {
        let draft = ShiftDraft {
            start_date: Some("2024-02-10".to_string()),
            end_date: Some("2024-02-10".to_string()),
            real_end_date: Some("2024-02-09".to_string()),
            real_end_time: Some("18:00".to_string()),
            ..Default::default()
        };
        let input = draft.resolve(today());
        assert_eq!(input.real_end_date, "2024-02-10");
        assert_eq!(input.real_end_time, "18:00");
    }

    #[test]
    fn test_overnight_draft_keeps_next_day_end() {
        let draft = ShiftDraft {
            start_date: Some("2024-02-10".to_string()),
            start_time: Some("22:00".to_string()),
            end_date: Some("2024-02-11".to_string()),
            end_time: Some("06:00".to_string()),
            ..Default::default()
        };
        let input = draft.resolve(today());
        assert_eq!(input.end_date, "2024-02-11");
        assert_eq!(input.real_end_date, "2024-02-11");
        assert_eq!(input.real_end_time, "06:00");
    }

    #[test]
    fn test_draft_deserializes_partial_parser_output() {
        let json = r#"{
            "startDate": "2024-01-07",
            "startTime": "09:00",
            "endDate": "2024-01-07",
            "endTime": "17:30",
            "variableIds": ["v_de"]
        }"#;
        let draft: ShiftDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.shift_type_id, None);
        assert_eq!(draft.variable_ids, Some(vec!["v_de".to_string()]));
    }

    #[test]
    fn test_effective_real_end_falls_back_to_theoretical() {
        let mut shift = make_shift();
        assert_eq!(shift.effective_real_end_time(), "17:30");

        shift.real_end_date = None;
        shift.real_end_time = Some(String::new());
        assert_eq!(shift.effective_real_end_date(), "2024-01-07");
        assert_eq!(shift.effective_real_end_time(), "17:00");
    }

    #[test]
    fn test_variable_count_counts_duplicates() {
        let shift = make_shift();
        assert_eq!(shift.variable_count("v_dcp"), 2);
        assert_eq!(shift.variable_count("v_sun"), 1);
        assert_eq!(shift.variable_count("v_pi"), 0);
    }

    #[test]
    fn test_start_naive_date_rejects_malformed() {
        let mut shift = make_shift();
        shift.start_date = "07/01/2024".to_string();
        assert_eq!(shift.start_naive_date(), None);
    }

    #[test]
    fn test_shift_input_from_shift() {
        let input = ShiftInput::from(&make_shift());
        assert_eq!(input.real_end_time, "17:30");
        assert_eq!(input.shift_type_id.as_deref(), Some("t_regular"));
        assert_eq!(input.variable_ids.len(), 3);
    }

    #[test]
    fn test_shift_deserializes_app_json() {
        let json = r#"{
            "id": "shift_1704614400000_ab12cd34e",
            "startDate": "2024-01-07",
            "startTime": "09:00",
            "endDate": "2024-01-07",
            "endTime": "17:00",
            "realEndDate": "2024-01-07",
            "realEndTime": "17:30",
            "shiftTypeId": "t_regular",
            "variableIds": ["v_sun"],
            "notes": "",
            "hoursWorked": 8.5,
            "totalEarnings": 109.25,
            "excessMinutes": 37.5
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.hours_worked, Decimal::new(85, 1));
        assert_eq!(shift.total_earnings, Decimal::new(10925, 2));
        assert_eq!(shift.excess_minutes, Decimal::new(375, 1));
    }

    #[test]
    fn test_cached_values_serialize_as_numbers() {
        let value = serde_json::to_value(make_shift()).unwrap();
        assert_eq!(value["hoursWorked"], serde_json::json!(8.5));
        assert_eq!(value["totalEarnings"], serde_json::json!(109.25));
        assert_eq!(value["excessMinutes"], serde_json::json!(37.5));

        let back: Shift = serde_json::from_value(value).unwrap();
        assert_eq!(back, make_shift());
    }
}
