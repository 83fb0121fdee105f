//! Automatic variable assignment.
//!
//! Some variables follow directly from the shift itself (its weekday, its
//! length, its travel-leg category). [`assign_auto_variables`] is a pure
//! reducer that takes the current variable multiset and returns the next
//! one. Running it again on its own output changes nothing, so callers can
//! apply it after every edit.
//!
//! Times are compared as zero-padded `HH:MM` strings; lexicographic order
//! equals chronological order for that format.

use rust_decimal::Decimal;

use crate::models::{ShiftCategory, V_DCP, V_DSP, V_PI, V_SUN, V_TL1, V_TL2};

/// Hours above which `v_tl1` starts to apply.
pub const LONG_SHIFT_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Hours above which `v_tl2` replaces `v_tl1`.
pub const EXTENDED_SHIFT_THRESHOLD: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Hours above which `v_pi` applies.
pub const PI_THRESHOLD: Decimal = Decimal::from_parts(95, 0, 0, false, 1);

/// An `IDA` leg starting at or after this time earns a single `v_dcp`.
pub const IDA_AFTERNOON_START: &str = "15:00";

/// A `VUELTA` leg ending after this time earns two `v_dcp`.
pub const VUELTA_NIGHT_END: &str = "21:00";

/// A `VUELTA` leg ending at or after this time earns at least one `v_dcp`.
pub const VUELTA_AFTERNOON_END: &str = "13:00";

/// Everything the automatic rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoVariableContext<'a> {
    /// Category of the selected shift type.
    pub category: ShiftCategory,
    /// Whether the shift starts on a Sunday.
    pub is_sunday: bool,
    /// Hours between start and real end.
    pub hours: Decimal,
    /// Start time (`HH:MM`).
    pub start_time: &'a str,
    /// Real end time (`HH:MM`).
    pub real_end_time: &'a str,
}

/// Returns the next variable list for a shift.
///
/// - Special categories (`LIBRE`, `VACACIONES`) clear the list entirely.
/// - `v_sun` is present iff the shift starts on a Sunday.
/// - `v_tl1` iff `8 < hours ≤ 9`, `v_tl2` iff `hours > 9`, `v_pi` iff
///   `hours > 9.5`.
/// - `v_dcp` occurs [`dcp_target_count`] times and `v_dsp` once for
///   `IDA/VUELTA`, never otherwise.
///
/// Variables outside these rules are left as they are. Kept entries stay in
/// their original order and new ones are appended.
///
/// # Examples
///
/// ```
/// use shiftcash_engine::calculation::{assign_auto_variables, AutoVariableContext};
/// use shiftcash_engine::models::ShiftCategory;
/// use rust_decimal::Decimal;
///
/// let ctx = AutoVariableContext {
///     category: ShiftCategory::Ida,
///     is_sunday: false,
///     hours: Decimal::new(85, 1),
///     start_time: "10:00",
///     real_end_time: "18:30",
/// };
/// let current = vec!["v_de".to_string(), "v_tl2".to_string()];
///
/// let next = assign_auto_variables(&current, &ctx);
/// assert_eq!(next, vec!["v_de", "v_tl1", "v_dcp", "v_dcp"]);
/// assert_eq!(assign_auto_variables(&next, &ctx), next);
/// ```
pub fn assign_auto_variables(current: &[String], ctx: &AutoVariableContext<'_>) -> Vec<String> {
    if ctx.category.is_special() {
        return Vec::new();
    }

    let mut next = current.to_vec();

    toggle_presence(&mut next, V_SUN, ctx.is_sunday);
    toggle_presence(&mut next, V_TL1, is_tl1_hours(ctx.hours));
    toggle_presence(&mut next, V_TL2, ctx.hours > EXTENDED_SHIFT_THRESHOLD);
    toggle_presence(&mut next, V_PI, ctx.hours > PI_THRESHOLD);
    set_occurrences(&mut next, V_DCP, dcp_target_count(ctx));
    set_occurrences(&mut next, V_DSP, dsp_target_count(ctx.category));

    next
}

/// Number of `v_dcp` occurrences a shift should carry.
///
/// - `IDA`: 1 when starting at or after 15:00, otherwise 2.
/// - `VUELTA`: 2 when really ending after 21:00, 1 when ending at or after
///   13:00, otherwise 0.
/// - Any other category: 0.
pub fn dcp_target_count(ctx: &AutoVariableContext<'_>) -> usize {
    match ctx.category {
        ShiftCategory::Ida => {
            if ctx.start_time >= IDA_AFTERNOON_START {
                1
            } else {
                2
            }
        }
        ShiftCategory::Vuelta => {
            if ctx.real_end_time > VUELTA_NIGHT_END {
                2
            } else if ctx.real_end_time >= VUELTA_AFTERNOON_END {
                1
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Number of `v_dsp` occurrences a shift of `category` should carry.
pub fn dsp_target_count(category: ShiftCategory) -> usize {
    match category {
        ShiftCategory::IdaVuelta => 1,
        _ => 0,
    }
}

/// Returns true if `variable_id` is currently asserted by a presence rule.
///
/// Only the presence rules (`v_sun`, `v_tl1`, `v_tl2`, `v_pi`) report here;
/// counted variables are always reconciled and never flagged.
pub fn is_auto_variable(variable_id: &str, ctx: &AutoVariableContext<'_>) -> bool {
    if ctx.category.is_special() {
        return false;
    }
    match variable_id {
        V_SUN => ctx.is_sunday,
        V_TL1 => is_tl1_hours(ctx.hours),
        V_TL2 => ctx.hours > EXTENDED_SHIFT_THRESHOLD,
        V_PI => ctx.hours > PI_THRESHOLD,
        _ => false,
    }
}

fn is_tl1_hours(hours: Decimal) -> bool {
    hours > LONG_SHIFT_THRESHOLD && hours <= EXTENDED_SHIFT_THRESHOLD
}

fn toggle_presence(ids: &mut Vec<String>, id: &str, should_have: bool) {
    let has = ids.iter().any(|existing| existing == id);
    if should_have && !has {
        ids.push(id.to_string());
    } else if !should_have && has {
        ids.retain(|existing| existing != id);
    }
}

fn set_occurrences(ids: &mut Vec<String>, id: &str, target: usize) {
    let current = ids.iter().filter(|existing| *existing == id).count();
    if current != target {
        ids.retain(|existing| existing != id);
        ids.extend(std::iter::repeat_n(id.to_string(), target));
    }
}
