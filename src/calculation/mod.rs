//! Calculation logic for the shift earnings engine.
//!
//! This module contains the pure computations behind a shift: date-time
//! parsing and Sunday detection, worked hours, tiered excess time, automatic
//! variable assignment and earnings, plus the preview pipeline that chains
//! them and the period reports built from saved shifts.

mod auto_variables;
mod day_detection;
mod earnings;
mod excess_time;
mod hours;
mod period_summary;
mod preview;

pub use auto_variables::{
    AutoVariableContext, EXTENDED_SHIFT_THRESHOLD, IDA_AFTERNOON_START, LONG_SHIFT_THRESHOLD,
    PI_THRESHOLD, VUELTA_AFTERNOON_END, VUELTA_NIGHT_END, assign_auto_variables,
    dcp_target_count, dsp_target_count, is_auto_variable,
};
pub use day_detection::{elapsed_seconds, is_sunday, parse_instant, round_2dp};
pub use earnings::{DEFAULT_SUNDAY_RATE, compute_earnings, variable_contribution};
pub use excess_time::{
    EXCESS_BASELINE_MINUTES, EXCESS_TIER_1_LIMIT, EXCESS_TIER_1_MULTIPLIER, EXCESS_TIER_2_LIMIT,
    EXCESS_TIER_2_MULTIPLIER, EXCESS_TIER_3_MULTIPLIER, ExcessBreakdown, compute_excess_minutes,
    excess_breakdown,
};
pub use hours::compute_hours;
pub use period_summary::{FORMACION, RESERVA, summarize_period};
pub use preview::preview_shift;
