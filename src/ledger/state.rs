//! Application state and its editing operations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{preview_shift, summarize_period};
use crate::config::Catalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DATE_FORMAT, Period, PeriodSummary, Shift, ShiftInput, ShiftPreview, ShiftType, ShiftVariable,
};

/// Top-level keys owned by the document itself rather than by preferences.
const RESERVED_KEYS: [&str; 3] = ["shifts", "shiftTypes", "variables"];

/// Everything a user has saved.
///
/// Serializes to the same document the state file and backups use:
/// `shifts`, `shiftTypes`, `variables`, plus any presentation preferences
/// (calendar theme and colours) kept as opaque top-level keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    shifts: Vec<Shift>,
    #[serde(flatten)]
    catalog: Catalog,
    #[serde(flatten)]
    preferences: BTreeMap<String, serde_json::Value>,
}

impl Ledger {
    /// Creates an empty ledger over `catalog` with the default preferences.
    pub fn new(catalog: Catalog) -> Self {
        let preferences = [
            ("calendarThemeId", "minimal"),
            ("customThemeColor", "#4f46e5"),
            ("customDayNameColor", "#9ca3af"),
            ("customBgColor", "#ffffff"),
            ("customDayNumberColor", "#1f2937"),
            ("customHoverLineColor", "#4f46e5"),
            ("customDayBorderColor", "#e5e7eb"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
        .collect();

        Self {
            shifts: Vec::new(),
            catalog,
            preferences,
        }
    }

    /// Rebuilds a ledger from a backup document.
    ///
    /// The document must carry `shifts` and `shiftTypes`. Missing `variables`
    /// are taken from `default_catalog`; every other top-level key is kept as
    /// a preference.
    ///
    /// # Errors
    ///
    /// `InvalidImport` if the value is not an object with the required
    /// sections or they do not have the expected shape.
    pub fn from_backup(
        mut value: serde_json::Value,
        default_catalog: &Catalog,
    ) -> EngineResult<Self> {
        let Some(object) = value.as_object_mut() else {
            return Err(EngineError::InvalidImport {
                message: "expected a JSON object".to_string(),
            });
        };
        for key in ["shifts", "shiftTypes"] {
            if !object.contains_key(key) {
                return Err(EngineError::InvalidImport {
                    message: format!("missing '{}'", key),
                });
            }
        }
        if !object.contains_key("variables") {
            let variables = serde_json::to_value(default_catalog.variables()).map_err(|e| {
                EngineError::InvalidImport {
                    message: e.to_string(),
                }
            })?;
            object.insert("variables".to_string(), variables);
        }

        let ledger: Ledger =
            serde_json::from_value(value).map_err(|e| EngineError::InvalidImport {
                message: e.to_string(),
            })?;
        info!(shifts = ledger.shifts.len(), "Imported backup");
        Ok(ledger)
    }

    /// Returns all shifts in insertion order.
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the presentation preferences.
    pub fn preferences(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.preferences
    }

    /// Returns true if `key` names one of the document's own sections.
    pub fn is_reserved_key(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    /// Sets a presentation preference.
    ///
    /// Returns `false`, leaving the ledger untouched, if `key` names one of
    /// the document's own sections.
    pub fn set_preference(&mut self, key: impl Into<String>, value: serde_json::Value) -> bool {
        let key = key.into();
        if Self::is_reserved_key(&key) {
            return false;
        }
        debug!(key = %key, "Set preference");
        self.preferences.insert(key, value);
        true
    }

    /// Finds a shift by id.
    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    /// Returns the shifts starting on `date`.
    pub fn shifts_on(&self, date: NaiveDate) -> Vec<&Shift> {
        let date = date.format(DATE_FORMAT).to_string();
        self.shifts.iter().filter(|s| s.start_date == date).collect()
    }

    /// Computes the preview for a shift being edited.
    pub fn preview(&self, input: &ShiftInput) -> ShiftPreview {
        preview_shift(input, &self.catalog)
    }

    /// Saves a shift, creating it or replacing the one with `editing_id`.
    ///
    /// The stored variables, hours, earnings and excess minutes are the ones
    /// the preview computes. New shifts get a fresh `shift_<uuid>` id; edits
    /// keep their id and position.
    ///
    /// # Errors
    ///
    /// - `InvalidShift` if no shift type is selected.
    /// - `ShiftTypeNotFound` if the shift type is not in the catalog.
    /// - `ShiftNotFound` if `editing_id` does not name a saved shift.
    pub fn save_shift(&mut self, input: ShiftInput, editing_id: Option<&str>) -> EngineResult<Shift> {
        let Some(shift_type_id) = input.shift_type_id.clone() else {
            return Err(EngineError::InvalidShift {
                shift_id: editing_id.unwrap_or_default().to_string(),
                message: "a shift type is required".to_string(),
            });
        };
        self.catalog.shift_type(&shift_type_id)?;

        let index = match editing_id {
            Some(id) => Some(
                self.shifts
                    .iter()
                    .position(|s| s.id == id)
                    .ok_or_else(|| EngineError::ShiftNotFound { id: id.to_string() })?,
            ),
            None => None,
        };

        let preview = self.preview(&input);
        let id = match editing_id {
            Some(id) => id.to_string(),
            None => format!("shift_{}", Uuid::new_v4().simple()),
        };

        let shift = Shift {
            id,
            start_date: input.start_date,
            start_time: input.start_time,
            end_date: input.end_date,
            end_time: input.end_time,
            real_end_date: Some(input.real_end_date),
            real_end_time: Some(input.real_end_time),
            shift_type_id,
            variable_ids: preview.variable_ids,
            notes: input.notes,
            hours_worked: preview.hours,
            total_earnings: preview.earnings,
            excess_minutes: preview.excess_minutes,
        };

        match index {
            Some(index) => {
                info!(shift_id = %shift.id, earnings = %shift.total_earnings, "Updated shift");
                self.shifts[index] = shift.clone();
            }
            None => {
                info!(shift_id = %shift.id, earnings = %shift.total_earnings, "Created shift");
                self.shifts.push(shift.clone());
            }
        }

        Ok(shift)
    }

    /// Deletes a shift. Returns `false` if no shift had that id.
    pub fn delete_shift(&mut self, id: &str) -> bool {
        let before = self.shifts.len();
        self.shifts.retain(|s| s.id != id);
        let deleted = self.shifts.len() != before;
        if deleted {
            info!(shift_id = %id, "Deleted shift");
        }
        deleted
    }

    /// Recomputes the cached values of every shift from the current catalog.
    ///
    /// Shifts whose type no longer resolves are left as they are. Returns the
    /// number of shifts whose cached values changed.
    pub fn recompute_all(&mut self) -> usize {
        let mut changed = 0;
        for shift in &mut self.shifts {
            if self.catalog.find_shift_type(&shift.shift_type_id).is_none() {
                debug!(shift_id = %shift.id, "Skipping shift with unknown type");
                continue;
            }
            let preview = preview_shift(&ShiftInput::from(&*shift), &self.catalog);
            if shift.variable_ids != preview.variable_ids
                || shift.hours_worked != preview.hours
                || shift.total_earnings != preview.earnings
                || shift.excess_minutes != preview.excess_minutes
            {
                shift.variable_ids = preview.variable_ids;
                shift.hours_worked = preview.hours;
                shift.total_earnings = preview.earnings;
                shift.excess_minutes = preview.excess_minutes;
                changed += 1;
            }
        }
        info!(changed, total = self.shifts.len(), "Recomputed shifts");
        changed
    }

    /// Summarizes the shifts starting inside `period`.
    pub fn summarize(&self, period: &Period) -> PeriodSummary {
        summarize_period(
            &self.shifts,
            self.catalog.shift_types(),
            self.catalog.variables(),
            period,
        )
    }

    /// Adds or replaces a shift type.
    pub fn upsert_shift_type(&mut self, shift_type: ShiftType) {
        info!(shift_type_id = %shift_type.id, name = %shift_type.name, "Saved shift type");
        self.catalog.upsert_shift_type(shift_type);
    }

    /// Removes a shift type. Saved shifts keep referencing it.
    pub fn remove_shift_type(&mut self, id: &str) -> EngineResult<ShiftType> {
        self.catalog.remove_shift_type(id)
    }

    /// Adds or replaces a variable.
    pub fn upsert_variable(&mut self, variable: ShiftVariable) {
        info!(variable_id = %variable.id, name = %variable.name, "Saved variable");
        self.catalog.upsert_variable(variable);
    }

    /// Removes a non-core variable.
    pub fn remove_variable(&mut self, id: &str) -> EngineResult<Option<ShiftVariable>> {
        self.catalog.remove_variable(id)
    }
}
