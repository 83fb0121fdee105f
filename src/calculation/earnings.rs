//! Earnings calculation.
//!
//! A shift earns a flat base (the shift type's daily rate, or the Sunday rate
//! when it starts on a Sunday) plus the contribution of each applied variable.

use rust_decimal::Decimal;

use crate::models::{ShiftCategory, ShiftType, ShiftVariable, V_SUN, VariableKind};

use super::day_detection::{is_sunday, round_2dp};

/// Sunday base rate used when the catalog carries no `v_sun` amount.
pub const DEFAULT_SUNDAY_RATE: Decimal = Decimal::from_parts(9225, 0, 0, false, 2);

/// Calculates the earnings of a shift.
///
/// - A `LIBRE` shift type earns exactly zero.
/// - The base is `sunday_rate` when `start_date` is a Sunday, otherwise the
///   shift type's daily rate.
/// - Every applied variable contributes once per occurrence: `fixed` adds its
///   amount, `hourly_bonus` adds `amount × hours`. `v_sun` is skipped because
///   the Sunday rate already accounts for it.
///
/// The total is rounded to two decimal places. Unknown variable ids are the
/// caller's concern; only resolved definitions are passed in.
///
/// # Examples
///
/// ```
/// use shiftcash_engine::calculation::{compute_earnings, DEFAULT_SUNDAY_RATE};
/// use shiftcash_engine::models::{ShiftType, ShiftVariable, VariableKind};
/// use rust_decimal::Decimal;
///
/// let regular = ShiftType {
///     id: "t_regular".to_string(),
///     name: "TURNO".to_string(),
///     daily_rate: Decimal::new(15, 0),
///     color: String::new(),
/// };
/// let plus = ShiftVariable {
///     id: "v_plus".to_string(),
///     name: "PLUS".to_string(),
///     kind: VariableKind::HourlyBonus,
///     amount: Decimal::new(2, 0),
/// };
///
/// // 2024-01-07 is a Sunday: 92.25 + 2 × 8.5
/// let earnings = compute_earnings(
///     "2024-01-07",
///     Decimal::new(85, 1),
///     &regular,
///     &[&plus],
///     DEFAULT_SUNDAY_RATE,
/// );
/// assert_eq!(earnings, Decimal::new(10925, 2));
/// ```
pub fn compute_earnings(
    start_date: &str,
    hours: Decimal,
    shift_type: &ShiftType,
    applied_variables: &[&ShiftVariable],
    sunday_rate: Decimal,
) -> Decimal {
    if shift_type.category() == ShiftCategory::Libre {
        return Decimal::ZERO;
    }

    let base = if is_sunday(start_date) {
        sunday_rate
    } else {
        shift_type.daily_rate
    };

    let extra: Decimal = applied_variables
        .iter()
        .filter(|v| v.id != V_SUN)
        .map(|v| variable_contribution(v, hours))
        .sum();

    round_2dp(base + extra)
}

/// Returns what a single occurrence of `variable` adds to a shift of `hours`.
pub fn variable_contribution(variable: &ShiftVariable, hours: Decimal) -> Decimal {
    match variable.kind {
        VariableKind::Fixed => variable.amount,
        VariableKind::HourlyBonus => variable.amount * hours,
    }
}
