//! Short human-readable durations for the elapsed-time suffix.

use std::time::Duration;

const SECOND: u128 = 1000;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;

/// Render a duration the way it appears after the `+` suffix:
/// `"120ms"`, `"3s"`, `"2m"`, `"2h"`, `"3d"`.
///
/// Durations of at least one second round to the nearest whole unit.
pub fn humanize(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms >= DAY {
        format!("{}d", round_div(ms, DAY))
    } else if ms >= HOUR {
        format!("{}h", round_div(ms, HOUR))
    } else if ms >= MINUTE {
        format!("{}m", round_div(ms, MINUTE))
    } else if ms >= SECOND {
        format!("{}s", round_div(ms, SECOND))
    } else {
        format!("{}ms", ms)
    }
}

fn round_div(value: u128, unit: u128) -> u128 {
    (value + unit / 2) / unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliseconds() {
        assert_eq!(humanize(Duration::from_millis(0)), "0ms");
        assert_eq!(humanize(Duration::from_millis(120)), "120ms");
        assert_eq!(humanize(Duration::from_millis(999)), "999ms");
    }

    #[test]
    fn test_seconds_round() {
        assert_eq!(humanize(Duration::from_millis(1000)), "1s");
        assert_eq!(humanize(Duration::from_millis(3400)), "3s");
        assert_eq!(humanize(Duration::from_millis(3500)), "4s");
    }

    #[test]
    fn test_minutes_hours_days() {
        assert_eq!(humanize(Duration::from_secs(90)), "2m");
        assert_eq!(humanize(Duration::from_secs(2 * 3600)), "2h");
        assert_eq!(humanize(Duration::from_secs(3 * 86400)), "3d");
    }
}
