//! Time-related utilities.

use chrono::{DateTime, Local, TimeZone};

/// Get current Unix timestamp in milliseconds
pub fn get_local_timestamp() -> i64 {
    Local::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to a local `HH:MM:SS` clock string.
///
/// Out-of-range timestamps render as `--:--:--`.
pub fn timestamp_to_clock(timestamp_millis: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => format_clock(&dt),
        None => "--:--:--".to_string(),
    }
}

fn format_clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%H:%M:%S").to_string()
}
