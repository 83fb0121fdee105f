//! Core data models for the shift earnings engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod period;
pub(crate) mod serde_helpers;
mod shift;
mod shift_type;
mod variable;

pub use calculation_result::{AuditStep, PeriodSummary, ShiftPreview, VariableCount};
pub use period::Period;
pub use shift::{
    DATE_FORMAT, DEFAULT_END_TIME, DEFAULT_START_TIME, Shift, ShiftDraft, ShiftInput,
};
pub use shift_type::{IDA, IDA_VUELTA, LIBRE, ShiftCategory, ShiftType, VACACIONES, VUELTA};
pub use variable::{
    CORE_VARIABLE_IDS, ShiftVariable, V_DCP, V_DE, V_DSP, V_EXC, V_PI, V_SUN, V_TDL, V_TL1,
    V_TL2, VariableKind, is_core_variable,
};
