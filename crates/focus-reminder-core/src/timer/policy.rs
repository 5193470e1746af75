//! Adaptive timing policy.
//!
//! The pomodoro length is revisited after every fourth completed pomodoro.
//! The band is chosen from the day's running pomodoro count, which only
//! resets when the day is restarted:
//!
//! | completed pomodoros | pomodoro length      |
//! |---------------------|----------------------|
//! | 1..=4               | original             |
//! | 5..=8               | 90% of the original  |
//! | 9..                 | 80% of the original  |
//!
//! Breaks are 20% of the current pomodoro, never shorter than six minutes.

/// Shortest break, in seconds.
pub const MIN_BREAK_SECS: u64 = 6 * 60;

/// Completed pomodoros between two policy evaluations.
pub const ADJUST_EVERY: u32 = 4;

const BREAK_RATIO: f64 = 0.2;

fn scale(secs: u64, factor: f64) -> u64 {
    (secs as f64 * factor).round() as u64
}

/// Break length for a given pomodoro length.
pub fn break_secs(pomodoro_secs: u64) -> u64 {
    scale(pomodoro_secs, BREAK_RATIO).max(MIN_BREAK_SECS)
}

/// Length of each of the three work intervals (truncating).
pub fn work_interval_secs(pomodoro_secs: u64) -> u64 {
    pomodoro_secs / 3
}

/// New pomodoro length after `pomodoro_count` completions, or `None` when the
/// count is not an evaluation point.
pub fn adjusted_pomodoro_secs(original_secs: u64, pomodoro_count: u32) -> Option<u64> {
    if pomodoro_count == 0 || pomodoro_count % ADJUST_EVERY != 0 {
        return None;
    }
    let secs = match pomodoro_count {
        0..=4 => original_secs,
        5..=8 => scale(original_secs, 0.9),
        _ => scale(original_secs, 0.8),
    };
    Some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn break_has_six_minute_floor() {
        assert_eq!(break_secs(1500), 360);
        assert_eq!(break_secs(60), 360);
        assert_eq!(break_secs(3600), 720);
    }

    #[test]
    fn break_rounds_to_nearest_second() {
        // 2003 * 0.2 = 400.6
        assert_eq!(break_secs(2003), 401);
        // 2002 * 0.2 = 400.4
        assert_eq!(break_secs(2002), 400);
    }

    #[test]
    fn bands_for_25_minute_pomodoro() {
        assert_eq!(adjusted_pomodoro_secs(1500, 4), Some(1500));
        assert_eq!(adjusted_pomodoro_secs(1500, 8), Some(1350));
        assert_eq!(adjusted_pomodoro_secs(1500, 12), Some(1200));
        assert_eq!(adjusted_pomodoro_secs(1500, 40), Some(1200));
    }

    #[test]
    fn only_every_fourth_completion_adjusts() {
        for count in [0, 1, 2, 3, 5, 6, 7, 9, 13] {
            assert_eq!(adjusted_pomodoro_secs(1500, count), None, "count {count}");
        }
    }

    #[test]
    fn work_interval_truncates() {
        assert_eq!(work_interval_secs(1500), 500);
        assert_eq!(work_interval_secs(1351), 450);
    }

    proptest! {
        #[test]
        fn break_formula_holds(pomodoro_secs in 1u64..200_000) {
            let expected = ((pomodoro_secs as f64 * 0.2).round() as u64).max(360);
            prop_assert_eq!(break_secs(pomodoro_secs), expected);
            prop_assert!(break_secs(pomodoro_secs) >= MIN_BREAK_SECS);
        }

        #[test]
        fn adjusted_length_never_exceeds_original(minutes in 1u64..600, count in 1u32..100) {
            let original = minutes * 60;
            if let Some(secs) = adjusted_pomodoro_secs(original, count) {
                prop_assert!(secs <= original);
                prop_assert!(secs > 0);
            }
        }
    }
}
