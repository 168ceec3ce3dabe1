//! Calendar-date and timestamp parsing with sentinel fallbacks.
//!
//! Dates arrive as `YYYY-MM-DD` (sometimes with a trailing time part) and
//! timestamps as ISO-8601 instants that may use a `Z` suffix. Anything that
//! cannot be parsed degrades to the 1900-01-01 sentinel.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

/// Date substituted for missing or malformed date fields.
pub const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("1900-01-01 is a valid calendar date"),
};

/// Timestamp substituted for missing or malformed timestamp fields (midnight UTC).
#[must_use]
pub fn sentinel_timestamp() -> DateTime<FixedOffset> {
    SENTINEL_DATE.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

/// Parses the `YYYY-MM-DD` portion of a date string.
///
/// Returns `None` when the first ten characters are not a valid calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parses an ISO-8601 timestamp, normalizing a trailing `Z` to `+00:00` first.
///
/// Offsets written without a colon (`-0500`) are accepted as well.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    let normalized = match trimmed.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => trimmed.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}
