//! Timestamp parsing and display helpers.
//!
//! Audit devices write RFC 3339 timestamps with nanosecond precision
//! (`2025-10-06T07:26:03.801191678Z`). Other producers sometimes omit the
//! offset, so naive ISO-8601 forms are accepted too. Anything else is shown
//! as the raw string.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Display pattern for record timestamps
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp, keeping the wall-clock time it was written in.
///
/// Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<FixedOffset>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(ts, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// Format a raw timestamp for display, falling back to the raw string.
pub fn format_timestamp(ts: &str) -> String {
    parse_timestamp(ts).map_or_else(|| ts.to_string(), |dt| dt.format(DISPLAY_FORMAT).to_string())
}

/// Calculate duration between two timestamps in human-readable format
pub fn duration_human<Tz: chrono::TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let seconds = end.clone().signed_duration_since(start.clone()).num_seconds();

    if seconds < 60 {
        format!("{} seconds", seconds)
    } else if seconds < 3600 {
        format!("{} minutes", seconds / 60)
    } else if seconds < 86400 {
        format!("{:.1} hours", seconds as f64 / 3600.0)
    } else {
        format!("{:.1} days", seconds as f64 / 86400.0)
    }
}

/// Current local time in the report header format.
pub fn now_display() -> String {
    chrono::Local::now().format(DISPLAY_FORMAT).to_string()
}
