//! Monthly and yearly reports.
//!
//! Summaries read the cached `total_earnings` and `excess_minutes` on each
//! shift rather than recomputing them, so a report always matches what the
//! calendar shows.

use rust_decimal::Decimal;

use crate::models::{
    LIBRE, Period, PeriodSummary, Shift, ShiftType, ShiftVariable, V_EXC, VACACIONES,
    VariableCount,
};

/// Display name of the on-call shift type counted in reports.
pub const RESERVA: &str = "RESERVA";

/// Display name of the training shift type counted in reports.
pub const FORMACION: &str = "FORMACIÓN";

/// Summarizes the shifts starting inside `period`.
///
/// Shifts whose start date does not parse are left out. Day counts look up
/// the first shift type whose uppercased name matches and count the shifts of
/// that type. `variable_counts` lists every catalog variable in catalog
/// order; `v_exc` counts shifts with excess minutes instead of occurrences.
pub fn summarize_period(
    shifts: &[Shift],
    shift_types: &[ShiftType],
    variables: &[ShiftVariable],
    period: &Period,
) -> PeriodSummary {
    let in_period: Vec<&Shift> = shifts
        .iter()
        .filter(|shift| {
            shift
                .start_naive_date()
                .is_some_and(|date| period.contains_date(date))
        })
        .collect();

    let total_earnings: Decimal = in_period.iter().map(|s| s.total_earnings).sum();
    let total_excess: Decimal = in_period.iter().map(|s| s.excess_minutes).sum();

    let count_named = |name: &str| -> usize {
        shift_types
            .iter()
            .find(|t| t.name.to_uppercase() == name)
            .map(|t| {
                in_period
                    .iter()
                    .filter(|s| s.shift_type_id == t.id)
                    .count()
            })
            .unwrap_or(0)
    };

    let variable_counts = variables
        .iter()
        .map(|variable| {
            let count = if variable.id == V_EXC {
                in_period
                    .iter()
                    .filter(|s| s.excess_minutes > Decimal::ZERO)
                    .count()
            } else {
                in_period
                    .iter()
                    .map(|s| s.variable_count(&variable.id))
                    .sum()
            };
            VariableCount {
                id: variable.id.clone(),
                name: variable.name.clone(),
                count,
            }
        })
        .collect();

    PeriodSummary {
        period: *period,
        shift_count: in_period.len(),
        total_earnings,
        total_excess,
        libre_count: count_named(LIBRE),
        vacaciones_count: count_named(VACACIONES),
        reserva_count: count_named(RESERVA),
        formacion_count: count_named(FORMACION),
        variable_counts,
    }
}
