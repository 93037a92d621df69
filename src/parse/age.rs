//! Age formatting for resource tables

use chrono::Duration;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;

/// Format an elapsed duration using the largest unit that fits.
///
/// Buckets truncate: 90 seconds is `1m`, 25 hours is `1d`. Weeks are 7 days and
/// months are 30 days. Negative durations (clock skew) are shown as `0s`.
pub fn format_age(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);

    if secs < MINUTE {
        format!("{}s", secs)
    } else if secs < HOUR {
        format!("{}m", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h", secs / HOUR)
    } else if secs < WEEK {
        format!("{}d", secs / DAY)
    } else if secs < MONTH {
        format!("{}w", secs / WEEK)
    } else {
        format!("{}mo", secs / MONTH)
    }
}
