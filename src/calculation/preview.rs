//! Shift preview pipeline.
//!
//! Ties the individual calculations together for a shift being edited:
//! duration, excess time, automatic variables and earnings. Every decision is
//! recorded as an [`AuditStep`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::Catalog;
use crate::models::{AuditStep, ShiftCategory, ShiftInput, ShiftPreview};

use super::auto_variables::{AutoVariableContext, assign_auto_variables, is_auto_variable};
use super::day_detection::is_sunday;
use super::earnings::compute_earnings;
use super::excess_time::excess_breakdown;
use super::hours::compute_hours;

/// Computes everything that is stored on a shift when it is saved.
///
/// Hours and excess are always measured from the start to the real end.
/// What happens next depends on the selected shift type:
///
/// - no shift type, or one the catalog does not know: the automatic variables
///   are reconciled as for a regular shift and the earnings are zero;
/// - `LIBRE` or `VACACIONES`: the variables are cleared and the earnings are
///   zero;
/// - anything else: the automatic variables are reconciled and earnings are
///   computed with the catalog's Sunday rate.
///
/// # Example
///
/// ```
/// use shiftcash_engine::calculation::preview_shift;
/// use shiftcash_engine::config::ConfigLoader;
/// use shiftcash_engine::models::ShiftDraft;
/// use chrono::NaiveDate;
///
/// let catalog = ConfigLoader::builtin().unwrap().into_catalog();
/// let today = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
/// let input = ShiftDraft {
///     start_time: Some("09:00".to_string()),
///     end_time: Some("17:30".to_string()),
///     shift_type_id: Some("t_turno".to_string()),
///     ..ShiftDraft::default()
/// }
/// .resolve(today);
///
/// let preview = preview_shift(&input, &catalog);
/// assert!(preview.is_sunday);
/// assert_eq!(preview.variable_ids, vec!["v_sun", "v_tl1"]);
/// ```
pub fn preview_shift(input: &ShiftInput, catalog: &Catalog) -> ShiftPreview {
    let mut audit_trace = Vec::new();
    let mut step_number = 1;

    let hours = compute_hours(
        &input.start_date,
        &input.start_time,
        &input.real_end_date,
        &input.real_end_time,
    );
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "shift_duration".to_string(),
        rule_name: "Shift Duration".to_string(),
        input: serde_json::json!({
            "start": format!("{} {}", input.start_date, input.start_time),
            "real_end": format!("{} {}", input.real_end_date, input.real_end_time),
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
        }),
        reasoning: format!("Worked {} hours from start to real end", hours.normalize()),
    });
    step_number += 1;

    let excess = excess_breakdown(
        &input.start_date,
        &input.start_time,
        &input.real_end_date,
        &input.real_end_time,
    );
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "excess_time".to_string(),
        rule_name: "Compensated Excess Time".to_string(),
        input: serde_json::json!({
            "elapsed_minutes": excess.elapsed_minutes.normalize().to_string(),
        }),
        output: serde_json::json!({
            "tier_1_minutes": excess.tier_1_minutes.normalize().to_string(),
            "tier_2_minutes": excess.tier_2_minutes.normalize().to_string(),
            "tier_3_minutes": excess.tier_3_minutes.normalize().to_string(),
            "compensated_minutes": excess.compensated_minutes.normalize().to_string(),
        }),
        reasoning: if excess.excess_minutes > Decimal::ZERO {
            format!(
                "{} minutes past the 8 hour baseline compensate as {} minutes",
                excess.excess_minutes.normalize(),
                excess.compensated_minutes.normalize()
            )
        } else {
            "Shift does not exceed the 8 hour baseline".to_string()
        },
    });
    step_number += 1;

    let sunday = is_sunday(&input.start_date);
    let shift_type = input
        .shift_type_id
        .as_deref()
        .and_then(|id| catalog.find_shift_type(id));

    // Without a resolvable type the automatic rules still run as for a
    // regular shift; only the earnings stay at zero.
    let category = shift_type.map_or(ShiftCategory::Regular, |t| t.category());
    let ctx = AutoVariableContext {
        category,
        is_sunday: sunday,
        hours,
        start_time: &input.start_time,
        real_end_time: &input.real_end_time,
    };
    let variable_ids = assign_auto_variables(&input.variable_ids, &ctx);
    let auto_variable_ids: Vec<String> = variable_ids
        .iter()
        .filter(|id| is_auto_variable(id, &ctx))
        .cloned()
        .collect();

    audit_trace.push(AuditStep {
        step_number,
        rule_id: "auto_variables".to_string(),
        rule_name: "Automatic Variables".to_string(),
        input: serde_json::json!({
            "category": category.to_string(),
            "is_sunday": sunday,
            "hours": hours.normalize().to_string(),
            "variable_ids": input.variable_ids,
        }),
        output: serde_json::json!({
            "variable_ids": variable_ids,
        }),
        reasoning: if category.is_special() {
            format!("{} shifts carry no variables", category)
        } else {
            format!(
                "Reconciled automatic variables for a {} shift of {} hours",
                category,
                hours.normalize()
            )
        },
    });
    step_number += 1;

    let Some(shift_type) = shift_type else {
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "shift_earnings".to_string(),
            rule_name: "Shift Earnings".to_string(),
            input: serde_json::json!({
                "shift_type_id": input.shift_type_id,
                "is_sunday": sunday,
            }),
            output: serde_json::json!({
                "earnings": "0",
            }),
            reasoning: "No shift type selected, nothing is earned".to_string(),
        });
        debug!(
            shift_type_id = ?input.shift_type_id,
            "No resolvable shift type, earnings stay at zero"
        );
        return ShiftPreview {
            hours,
            excess_minutes: excess.compensated_minutes,
            earnings: Decimal::ZERO,
            variable_ids,
            auto_variable_ids,
            category: None,
            is_sunday: sunday,
            audit_trace,
        };
    };

    let earnings = if category.is_special() {
        Decimal::ZERO
    } else {
        let applied = catalog.applied_variables(&variable_ids);
        compute_earnings(
            &input.start_date,
            hours,
            shift_type,
            &applied,
            catalog.sunday_rate(),
        )
    };

    audit_trace.push(AuditStep {
        step_number,
        rule_id: "shift_earnings".to_string(),
        rule_name: "Shift Earnings".to_string(),
        input: serde_json::json!({
            "shift_type": shift_type.name,
            "daily_rate": shift_type.daily_rate.normalize().to_string(),
            "sunday_rate": catalog.sunday_rate().normalize().to_string(),
            "is_sunday": sunday,
        }),
        output: serde_json::json!({
            "earnings": earnings.normalize().to_string(),
        }),
        reasoning: if category.is_special() {
            format!("{} shifts earn nothing", category)
        } else if sunday {
            format!("Sunday base plus variables: {}", earnings.normalize())
        } else {
            format!("Daily rate plus variables: {}", earnings.normalize())
        },
    });

    debug!(
        shift_type = %shift_type.name,
        hours = %hours,
        earnings = %earnings,
        excess_minutes = %excess.compensated_minutes,
        "Computed shift preview"
    );

    ShiftPreview {
        hours,
        excess_minutes: excess.compensated_minutes,
        earnings,
        variable_ids,
        auto_variable_ids,
        category: Some(category),
        is_sunday: sunday,
        audit_trace,
    }
}
