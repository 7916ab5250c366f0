//! Timestamp helpers shared by the registry and the file sinks.

use chrono::{DateTime, Local, NaiveDate};

/// Formats a point in time as a display timestamp (`YYYY/MM/DD HH:MM:SS`).
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Display timestamp for the current wall-clock time.
pub fn log_timestamp() -> String {
    format_timestamp(Local::now())
}

/// Coarse day stamp used in rotated file names (`YYYYMMDD`).
///
/// Zero-padded and fixed-width, so lexicographic order over day stamps is
/// chronological order. All retention comparisons rely on this.
pub(crate) fn day_stamp(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}
