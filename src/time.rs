//! Relative timestamps for status and notification headers

use chrono::{DateTime, Utc};

/// Format how long ago `time` was, relative to `now`.
///
/// "Now" under five seconds (and for timestamps in the future), then whole
/// seconds, minutes, hours and days: "12 s", "3 m", "5 h", "2 d".
pub fn relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(time);

    if duration.num_seconds() < 5 {
        "Now".to_string()
    } else if duration.num_minutes() < 1 {
        format!("{} s", duration.num_seconds())
    } else if duration.num_hours() < 1 {
        format!("{} m", duration.num_minutes())
    } else if duration.num_days() < 1 {
        format!("{} h", duration.num_hours())
    } else {
        format!("{} d", duration.num_days())
    }
}
