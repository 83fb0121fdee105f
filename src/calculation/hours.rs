//! Worked-hours calculation.

use rust_decimal::Decimal;

use super::day_detection::{elapsed_seconds, round_2dp};

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Calculates the hours between two date/time pairs.
///
/// The result is rounded to two decimal places and never negative: an end
/// before the start yields zero, as does any unparseable date or time.
///
/// # Examples
///
/// ```
/// use shiftcash_engine::calculation::compute_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(compute_hours("2024-01-07", "09:00", "2024-01-07", "17:30"), Decimal::new(85, 1));
/// assert_eq!(compute_hours("2024-01-07", "22:00", "2024-01-08", "06:00"), Decimal::new(8, 0));
/// assert_eq!(compute_hours("2024-01-07", "22:00", "2024-01-07", "06:00"), Decimal::ZERO);
/// assert_eq!(compute_hours("bad", "09:00", "2024-01-07", "17:00"), Decimal::ZERO);
/// ```
pub fn compute_hours(start_date: &str, start_time: &str, end_date: &str, end_time: &str) -> Decimal {
    let Some(seconds) = elapsed_seconds(start_date, start_time, end_date, end_time) else {
        return Decimal::ZERO;
    };

    let hours = round_2dp(Decimal::from(seconds) / SECONDS_PER_HOUR);
    hours.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_eight_hour_shift() {
        assert_eq!(compute_hours("2024-01-08", "09:00", "2024-01-08", "17:00"), dec("8"));
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(compute_hours("2024-01-08", "09:00", "2024-01-08", "09:00"), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 20 minutes = 0.3333.. hours
        assert_eq!(compute_hours("2024-01-08", "09:00", "2024-01-08", "09:20"), dec("0.33"));
        // 40 minutes = 0.6666.. hours
        assert_eq!(compute_hours("2024-01-08", "09:00", "2024-01-08", "09:40"), dec("0.67"));
    }

    #[test]
    fn test_multi_day_span() {
        assert_eq!(compute_hours("2024-01-08", "09:00", "2024-01-10", "09:00"), dec("48"));
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        assert_eq!(compute_hours("2024-01-08", "17:00", "2024-01-08", "09:00"), Decimal::ZERO);
        assert_eq!(compute_hours("2024-01-09", "09:00", "2024-01-08", "17:00"), Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_inputs_yield_zero() {
        assert_eq!(compute_hours("2024-01-32", "09:00", "2024-01-08", "17:00"), Decimal::ZERO);
        assert_eq!(compute_hours("2024-01-08", "09:00", "", "17:00"), Decimal::ZERO);
        assert_eq!(compute_hours("2024-01-08", "xx:yy", "2024-01-08", "17:00"), Decimal::ZERO);
    }

    #[test]
    fn test_seconds_are_honoured() {
        assert_eq!(
            compute_hours("2024-01-08", "09:00:00", "2024-01-08", "09:00:36"),
            dec("0.01")
        );
    }

    fn arb_time() -> impl Strategy<Value = String> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
    }

    fn arb_date() -> impl Strategy<Value = String> {
        (1u32..=28).prop_map(|d| format!("2024-03-{:02}", d))
    }

    proptest! {
        #[test]
        fn prop_hours_never_negative(
            sd in arb_date(), st in arb_time(), ed in arb_date(), et in arb_time()
        ) {
            prop_assert!(compute_hours(&sd, &st, &ed, &et) >= Decimal::ZERO);
        }

        #[test]
        fn prop_hours_monotonic_in_end(
            sd in arb_date(), st in arb_time(), ed in arb_date(), et in arb_time(),
            extra_minutes in 0u32..600
        ) {
            let base = compute_hours(&sd, &st, &ed, &et);
            let later = crate::calculation::parse_instant(&ed, &et).unwrap()
                + chrono::Duration::minutes(i64::from(extra_minutes));
            let later_date = later.format("%Y-%m-%d").to_string();
            let later_time = later.format("%H:%M").to_string();
            prop_assert!(compute_hours(&sd, &st, &later_date, &later_time) >= base);
        }

        #[test]
        fn prop_hours_is_pure(
            sd in arb_date(), st in arb_time(), ed in arb_date(), et in arb_time()
        ) {
            prop_assert_eq!(compute_hours(&sd, &st, &ed, &et), compute_hours(&sd, &st, &ed, &et));
        }
    }
}
