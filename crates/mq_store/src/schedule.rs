//! Showtime scheduling derivation and wire formatting
//!
//! A billboard's end time is never user input: it is always the start time
//! plus the referenced movie's runtime. Times are clock times; an end that
//! crosses midnight wraps, while the billboard keeps its calendar date.

use chrono::{Duration, NaiveDate, NaiveTime};

/// Derive the end time of a showtime from its start and the movie runtime.
pub fn derive_end_time(start: NaiveTime, length_minutes: u32) -> NaiveTime {
    let (end, _wrapped_days) =
        start.overflowing_add_signed(Duration::minutes(i64::from(length_minutes)));
    end
}

/// Format a date for the wire: `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a clock time for the wire: `HH:MM:SS`, 24-hour, zero-padded.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Parse a date as the backend returns it. Some backends send a full
/// datetime (`2024-01-01T00:00:00`); everything from `T` on is dropped.
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let day = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Parse a wire clock time, accepting `HH:MM:SS` or `HH:MM`.
pub fn parse_wire_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
