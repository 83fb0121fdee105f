//! Calculation result models.
//!
//! This module contains the [`ShiftPreview`] produced for a shift being edited,
//! the [`AuditStep`] records explaining it, and the [`PeriodSummary`] produced
//! by the reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Period, ShiftCategory};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Everything the engine derives for a shift being edited.
///
/// The values are exactly what gets stored on the [`Shift`](super::Shift)
/// when it is saved.
///
/// # Example
///
/// ```
/// use shiftcash_engine::models::ShiftPreview;
/// use rust_decimal::Decimal;
///
/// let preview = ShiftPreview {
///     hours: Decimal::new(85, 1),
///     excess_minutes: Decimal::new(3750, 2),
///     earnings: Decimal::new(10925, 2),
///     variable_ids: vec!["v_sun".to_string()],
///     auto_variable_ids: vec!["v_sun".to_string()],
///     category: None,
///     is_sunday: true,
///     audit_trace: vec![],
/// };
/// assert!(preview.has_excess());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPreview {
    /// Hours between the start and the real end.
    pub hours: Decimal,
    /// Compensated excess minutes.
    pub excess_minutes: Decimal,
    /// Earnings for the shift.
    pub earnings: Decimal,
    /// Variable ids after the automatic assignment pass.
    pub variable_ids: Vec<String>,
    /// Variables currently asserted by the automatic rules.
    pub auto_variable_ids: Vec<String>,
    /// The category of the selected shift type, if one is selected.
    pub category: Option<ShiftCategory>,
    /// Whether the shift starts on a Sunday.
    pub is_sunday: bool,
    /// The steps that produced these values.
    pub audit_trace: Vec<AuditStep>,
}

impl ShiftPreview {
    /// Returns true if any excess time is compensated.
    pub fn has_excess(&self) -> bool {
        self.excess_minutes > Decimal::ZERO
    }
}

/// Occurrences of one variable within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCount {
    /// The variable identifier.
    pub id: String,
    /// The variable display name.
    pub name: String,
    /// Number of occurrences (days with excess for `v_exc`).
    pub count: usize,
}

/// Totals and counts for the shifts starting within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The summarised period.
    pub period: Period,
    /// Number of shifts in the period.
    pub shift_count: usize,
    /// Sum of cached earnings.
    pub total_earnings: Decimal,
    /// Sum of cached compensated excess minutes.
    pub total_excess: Decimal,
    /// Days off.
    pub libre_count: usize,
    /// Vacation days.
    pub vacaciones_count: usize,
    /// Standby days.
    pub reserva_count: usize,
    /// Training days.
    pub formacion_count: usize,
    /// Per-variable occurrences, in catalog order.
    pub variable_counts: Vec<VariableCount>,
}

impl PeriodSummary {
    /// Returns the count recorded for `variable_id`, or zero if it is unknown.
    pub fn variable_count(&self, variable_id: &str) -> usize {
        self.variable_counts
            .iter()
            .find(|vc| vc.id == variable_id)
            .map(|vc| vc.count)
            .unwrap_or(0)
    }
}
