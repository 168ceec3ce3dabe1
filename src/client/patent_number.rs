//! Patent number normalization for the search endpoint.

use serde_json::{Map, Value, json};

use super::constants::PATENT_NUMBER_FILTER;

/// Reduces a patent number to its digits.
///
/// A leading `US` country marker (any case) is dropped, then everything that
/// is not an ASCII digit, so `"US11,989,999"`, `"11,989,999"` and
/// `"11989999"` all become `"11989999"`. Returns `None` when no digits remain.
#[must_use]
pub fn sanitize_patent_number(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let without_country = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("US") => &trimmed[2..],
        _ => trimmed,
    };
    let digits: String = without_country
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    (!digits.is_empty()).then_some(digits)
}

/// Builds the search body filtering on an already-sanitized patent number.
#[must_use]
pub fn patent_number_filter(sanitized: &str) -> Value {
    let mut filters = Map::new();
    filters.insert(
        PATENT_NUMBER_FILTER.to_string(),
        Value::String(sanitized.to_string()),
    );
    json!({ "filters": filters })
}
