//! Compensated excess-time calculation.
//!
//! Time worked past an 8 hour baseline is compensated in three cumulative
//! tiers, each applied only to the minutes that fall inside it:
//!
//! | Tier | Excess minutes | Multiplier |
//! |------|----------------|------------|
//! | 1    | 1 to 60        | ×1.25      |
//! | 2    | 61 to 90       | ×1.50      |
//! | 3    | 91 and above   | ×1.00      |
//!
//! Tier 3 drops back to ×1.00 after the ×1.50 band; the curve is intentional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day_detection::{elapsed_seconds, round_2dp};

/// Minutes of work before any excess is counted (8 hours).
pub const EXCESS_BASELINE_MINUTES: Decimal = Decimal::from_parts(480, 0, 0, false, 0);

/// Upper bound (inclusive) of tier 1, in excess minutes.
pub const EXCESS_TIER_1_LIMIT: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Upper bound (inclusive) of tier 2, in excess minutes.
pub const EXCESS_TIER_2_LIMIT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Tier 1 multiplier (×1.25).
pub const EXCESS_TIER_1_MULTIPLIER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Tier 2 multiplier (×1.50).
pub const EXCESS_TIER_2_MULTIPLIER: Decimal = Decimal::from_parts(150, 0, 0, false, 2);

/// Tier 3 multiplier (×1.00).
pub const EXCESS_TIER_3_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

const SECONDS_PER_MINUTE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// How the excess of a shift splits over the compensation tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessBreakdown {
    /// Minutes between the start and the real end (zero if unparseable).
    pub elapsed_minutes: Decimal,
    /// Raw minutes beyond the baseline (never negative).
    pub excess_minutes: Decimal,
    /// Raw minutes falling in tier 1.
    pub tier_1_minutes: Decimal,
    /// Raw minutes falling in tier 2.
    pub tier_2_minutes: Decimal,
    /// Raw minutes falling in tier 3.
    pub tier_3_minutes: Decimal,
    /// Weighted total, rounded to two decimal places.
    pub compensated_minutes: Decimal,
}

/// Splits the excess of a shift over the compensation tiers.
///
/// # Example
///
/// ```
/// use shiftcash_engine::calculation::excess_breakdown;
/// use rust_decimal::Decimal;
///
/// // 600 minutes elapsed: 120 excess = 60 + 30 + 30
/// let breakdown = excess_breakdown("2024-01-08", "07:00", "2024-01-08", "17:00");
/// assert_eq!(breakdown.excess_minutes, Decimal::new(120, 0));
/// assert_eq!(breakdown.tier_1_minutes, Decimal::new(60, 0));
/// assert_eq!(breakdown.tier_2_minutes, Decimal::new(30, 0));
/// assert_eq!(breakdown.tier_3_minutes, Decimal::new(30, 0));
/// assert_eq!(breakdown.compensated_minutes, Decimal::new(150, 0));
/// ```
pub fn excess_breakdown(
    start_date: &str,
    start_time: &str,
    real_end_date: &str,
    real_end_time: &str,
) -> ExcessBreakdown {
    let Some(seconds) = elapsed_seconds(start_date, start_time, real_end_date, real_end_time)
    else {
        return ExcessBreakdown::default();
    };

    let elapsed_minutes = Decimal::from(seconds) / SECONDS_PER_MINUTE;
    let excess = elapsed_minutes - EXCESS_BASELINE_MINUTES;

    if excess <= Decimal::ZERO {
        return ExcessBreakdown {
            elapsed_minutes,
            ..ExcessBreakdown::default()
        };
    }

    let tier_1_minutes = excess.min(EXCESS_TIER_1_LIMIT);
    let tier_2_minutes = (excess - EXCESS_TIER_1_LIMIT)
        .clamp(Decimal::ZERO, EXCESS_TIER_2_LIMIT - EXCESS_TIER_1_LIMIT);
    let tier_3_minutes = (excess - EXCESS_TIER_2_LIMIT).max(Decimal::ZERO);

    let compensated = tier_1_minutes * EXCESS_TIER_1_MULTIPLIER
        + tier_2_minutes * EXCESS_TIER_2_MULTIPLIER
        + tier_3_minutes * EXCESS_TIER_3_MULTIPLIER;

    ExcessBreakdown {
        elapsed_minutes,
        excess_minutes: excess,
        tier_1_minutes,
        tier_2_minutes,
        tier_3_minutes,
        compensated_minutes: round_2dp(compensated),
    }
}

/// Calculates the compensated excess minutes between a start and a real end.
///
/// Returns zero for shifts of 8 hours or less and for unparseable input.
///
/// # Examples
///
/// ```
/// use shiftcash_engine::calculation::compute_excess_minutes;
/// use rust_decimal::Decimal;
///
/// // 510 minutes elapsed: 30 excess minutes × 1.25
/// assert_eq!(
///     compute_excess_minutes("2024-01-07", "09:00", "2024-01-07", "17:30"),
///     Decimal::new(3750, 2)
/// );
/// assert_eq!(
///     compute_excess_minutes("2024-01-07", "09:00", "2024-01-07", "17:00"),
///     Decimal::ZERO
/// );
/// ```
pub fn compute_excess_minutes(
    start_date: &str,
    start_time: &str,
    real_end_date: &str,
    real_end_time: &str,
) -> Decimal {
    excess_breakdown(start_date, start_time, real_end_date, real_end_time).compensated_minutes
}
