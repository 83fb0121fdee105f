//! Bonus and allowance variables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days with compensated excess time (counted, never summed into earnings).
pub const V_EXC: &str = "v_exc";
/// Long-shift bonus for more than 8 and up to 9 hours.
pub const V_TL1: &str = "v_tl1";
/// Long-shift bonus for more than 9 hours.
pub const V_TL2: &str = "v_tl2";
/// System-managed variable with no automatic rule.
pub const V_TDL: &str = "v_tdl";
/// Bonus for more than 9.5 hours.
pub const V_PI: &str = "v_pi";
/// Repeatable travel-leg allowance.
pub const V_DCP: &str = "v_dcp";
/// Same-day outbound and return allowance.
pub const V_DSP: &str = "v_dsp";
/// System-managed variable with no automatic rule.
pub const V_DE: &str = "v_de";
/// Sunday marker. Its amount is the Sunday base rate.
pub const V_SUN: &str = "v_sun";

/// Variables managed by the system; configuration must not delete them.
pub const CORE_VARIABLE_IDS: [&str; 9] =
    [V_EXC, V_TL1, V_TL2, V_TDL, V_PI, V_DCP, V_DSP, V_DE, V_SUN];

/// Returns true if `id` is one of the [`CORE_VARIABLE_IDS`].
pub fn is_core_variable(id: &str) -> bool {
    CORE_VARIABLE_IDS.contains(&id)
}

/// How a variable's amount contributes to earnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Added once per occurrence.
    Fixed,
    /// Multiplied by the hours worked, once per occurrence.
    HourlyBonus,
}

/// A bonus or allowance definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftVariable {
    /// Unique identifier (core variables use the `v_*` constants).
    pub id: String,
    /// Display name.
    pub name: String,
    /// How the amount is applied.
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// Amount in currency units (per hour for hourly bonuses).
    #[serde(default, with = "crate::models::serde_helpers::decimal_number")]
    pub amount: Decimal,
}

impl ShiftVariable {
    /// Returns true if this is a system-managed variable.
    pub fn is_core(&self) -> bool {
        is_core_variable(&self.id)
    }
}
