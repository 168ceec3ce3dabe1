//! Best-effort mapping from loosely-typed API JSON onto typed records.
//!
//! Every record in [`crate::models`] is built by walking a [`Fields`] view
//! over one JSON object. Each accessor applies the same rule:
//!
//! - absent key or `null` → the field's default (`""`, `0`, `false`, empty
//!   list, or the 1900-01-01 sentinel for dates)
//! - a date or timestamp that does not parse → the sentinel
//! - any other value of the wrong shape → [`MapError`]
//!
//! Nested objects and bags are mapped recursively with the same rule, so a
//! partially populated response degrades field by field instead of failing.

mod dates;
mod error;

pub use dates::{SENTINEL_DATE, parse_date, parse_timestamp, sentinel_timestamp};
pub use error::MapError;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};
use tracing::debug;

/// A record type that can be built from one JSON object.
pub trait FromFields: Sized {
    /// Builds the record, substituting defaults for anything missing.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when a present value has the wrong JSON shape.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError>;
}

/// Read-only view over a JSON object with default-substituting accessors.
///
/// A missing object (absent key, `null`, or an unparsable body) is
/// represented as an empty view, so every accessor on it returns defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    object: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    /// A view with no keys; every accessor yields its default.
    #[must_use]
    pub fn empty() -> Self {
        Self { object: None }
    }

    /// Wraps a JSON value, treating `null` as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::TypeMismatch`] for scalars and arrays.
    pub fn of(value: &'a Value, field: &str) -> Result<Self, MapError> {
        match value {
            Value::Object(object) => Ok(Self {
                object: Some(object),
            }),
            Value::Null => Ok(Self::empty()),
            other => Err(MapError::type_mismatch(field, "object", kind(other))),
        }
    }

    /// Wraps a top-level response body. Non-object bodies become empty.
    #[must_use]
    pub fn document(value: &'a Value) -> Self {
        match value {
            Value::Object(object) => Self {
                object: Some(object),
            },
            _ => Self::empty(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(key))
            .filter(|value| !value.is_null())
    }

    /// Returns `true` if the key is present with a non-null value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Text field, defaulting to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the value is an object or array.
    pub fn text(&self, key: &str) -> Result<String, MapError> {
        Ok(self.opt_text(key)?.unwrap_or_default())
    }

    /// Optional text field. Numbers and booleans are rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the value is an object or array.
    pub fn opt_text(&self, key: &str) -> Result<Option<String>, MapError> {
        self.get(key).map(|value| scalar_text(value, key)).transpose()
    }

    /// Integer field, defaulting to zero.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the value is neither an integer nor a numeric string.
    pub fn int(&self, key: &str) -> Result<i64, MapError> {
        Ok(self.opt_int(key)?.unwrap_or(0))
    }

    /// Optional integer field. Numeric strings (`"42"`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the value is neither an integer nor a numeric string.
    pub fn opt_int(&self, key: &str) -> Result<Option<i64>, MapError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            Value::Number(number) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| MapError::invalid_integer(key, number.to_string())),
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| MapError::invalid_integer(key, text.clone())),
            other => Err(MapError::type_mismatch(key, "integer", kind(other))),
        }
    }

    /// Boolean field, defaulting to `false`. Accepts `"Y"`/`"N"` and `"true"`/`"false"`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] for any other value.
    pub fn flag(&self, key: &str) -> Result<bool, MapError> {
        let Some(value) = self.get(key) else {
            return Ok(false);
        };
        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) => match text.trim().to_ascii_uppercase().as_str() {
                "Y" | "YES" | "TRUE" => Ok(true),
                "N" | "NO" | "FALSE" | "" => Ok(false),
                _ => Err(MapError::type_mismatch(key, "boolean", "string")),
            },
            other => Err(MapError::type_mismatch(key, "boolean", kind(other))),
        }
    }

    /// Calendar date field; missing or malformed values become [`SENTINEL_DATE`].
    #[must_use]
    pub fn date(&self, key: &str) -> NaiveDate {
        let Some(value) = self.get(key) else {
            return SENTINEL_DATE;
        };
        match value.as_str().and_then(parse_date) {
            Some(date) => date,
            None => {
                debug!(field = key, raw = %value, "unparsable date, using sentinel");
                SENTINEL_DATE
            }
        }
    }

    /// Timestamp field; missing or malformed values become [`sentinel_timestamp`].
    #[must_use]
    pub fn timestamp(&self, key: &str) -> DateTime<FixedOffset> {
        let Some(value) = self.get(key) else {
            return sentinel_timestamp();
        };
        match value.as_str().and_then(parse_timestamp) {
            Some(timestamp) => timestamp,
            None => {
                debug!(field = key, raw = %value, "unparsable timestamp, using sentinel");
                sentinel_timestamp()
            }
        }
    }

    /// Nested object, defaulting to an empty view.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the value is present but not an object.
    pub fn nested(&self, key: &str) -> Result<Fields<'a>, MapError> {
        match self.get(key) {
            Some(value) => Fields::of(value, key),
            None => Ok(Fields::empty()),
        }
    }

    /// Nested record built through [`FromFields`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the nested value or any of its fields is malformed.
    pub fn record<T: FromFields>(&self, key: &str) -> Result<T, MapError> {
        T::from_fields(&self.nested(key)?).map_err(|e| e.within(key))
    }

    /// Bag of objects mapped through [`FromFields`], defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the bag is not an array or an item is malformed.
    pub fn list<T: FromFields>(&self, key: &str) -> Result<Vec<T>, MapError> {
        self.list_with(key, T::from_fields)
    }

    /// Bag of objects mapped through an explicit item mapper.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the bag is not an array or an item is malformed.
    pub fn list_with<T, F>(&self, key: &str, mut map_item: F) -> Result<Vec<T>, MapError>
    where
        F: FnMut(&Fields<'a>) -> Result<T, MapError>,
    {
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let slot = format!("{key}[{index}]");
                let fields = Fields::of(item, &slot)?;
                map_item(&fields).map_err(|e| e.within(&slot))
            })
            .collect()
    }

    /// Bag of scalars rendered as text, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the bag is not an array or holds non-scalars.
    pub fn texts(&self, key: &str) -> Result<Vec<String>, MapError> {
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(index, item)| scalar_text(item, &format!("{key}[{index}]")))
            .collect()
    }

    /// Bag of calendar dates; unparsable entries become [`SENTINEL_DATE`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the bag is not an array.
    pub fn dates(&self, key: &str) -> Result<Vec<NaiveDate>, MapError> {
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .iter()
            .map(|item| item.as_str().and_then(parse_date).unwrap_or(SENTINEL_DATE))
            .collect())
    }

    fn array(&self, key: &str) -> Result<Option<&'a Vec<Value>>, MapError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(MapError::type_mismatch(key, "array", kind(other))),
        }
    }
}

fn scalar_text(value: &Value, field: &str) -> Result<String, MapError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(MapError::type_mismatch(field, "string", kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_yield_defaults() {
        let body = json!({});
        let fields = Fields::document(&body);
        assert_eq!(fields.text("anything").unwrap(), "");
        assert_eq!(fields.opt_text("anything").unwrap(), None);
        assert_eq!(fields.int("count").unwrap(), 0);
        assert!(!fields.flag("nationalStageIndicator").unwrap());
        assert_eq!(fields.date("filingDate"), SENTINEL_DATE);
        assert_eq!(fields.timestamp("officialDate"), sentinel_timestamp());
        assert!(fields.texts("cpcClassificationBag").unwrap().is_empty());
        assert!(fields.nested("applicationMetaData").unwrap().object.is_none());
    }

    #[test]
    fn test_null_values_yield_defaults() {
        let body = json!({"docketNumber": null, "count": null, "eventDataBag": null});
        let fields = Fields::document(&body);
        assert_eq!(fields.text("docketNumber").unwrap(), "");
        assert_eq!(fields.int("count").unwrap(), 0);
        assert!(!fields.contains("eventDataBag"));
        assert!(fields.texts("eventDataBag").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_document_is_empty() {
        let body = json!(["unexpected", "array"]);
        let fields = Fields::document(&body);
        assert_eq!(fields.int("count").unwrap(), 0);
    }

    #[test]
    fn test_text_renders_scalars() {
        let body = json!({"code": 161, "flag": true, "name": "X"});
        let fields = Fields::document(&body);
        assert_eq!(fields.text("code").unwrap(), "161");
        assert_eq!(fields.text("flag").unwrap(), "true");
        assert_eq!(fields.text("name").unwrap(), "X");
    }

    #[test]
    fn test_text_rejects_object() {
        let body = json!({"inventionTitle": {"nested": 1}});
        let err = Fields::document(&body).text("inventionTitle").unwrap_err();
        assert_eq!(
            err,
            MapError::type_mismatch("inventionTitle", "string", "object")
        );
    }

    #[test]
    fn test_int_accepts_numeric_strings() {
        let body = json!({"reelNumber": "52311", "frameNumber": 12});
        let fields = Fields::document(&body);
        assert_eq!(fields.int("reelNumber").unwrap(), 52311);
        assert_eq!(fields.int("frameNumber").unwrap(), 12);
    }

    #[test]
    fn test_int_rejects_non_numeric() {
        let body = json!({"reelNumber": "abc", "pageNumber": 1.5, "count": []});
        let fields = Fields::document(&body);
        assert!(matches!(
            fields.int("reelNumber"),
            Err(MapError::InvalidInteger { .. })
        ));
        assert!(matches!(
            fields.int("pageNumber"),
            Err(MapError::InvalidInteger { .. })
        ));
        assert!(matches!(
            fields.int("count"),
            Err(MapError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_flag_accepts_indicator_letters() {
        let body = json!({"a": "Y", "b": "N", "c": true, "d": "maybe"});
        let fields = Fields::document(&body);
        assert!(fields.flag("a").unwrap());
        assert!(!fields.flag("b").unwrap());
        assert!(fields.flag("c").unwrap());
        assert!(fields.flag("d").is_err());
    }

    #[test]
    fn test_malformed_date_becomes_sentinel() {
        let body = json!({"filingDate": "12/30/2008", "grantDate": 20240501});
        let fields = Fields::document(&body);
        assert_eq!(fields.date("filingDate"), SENTINEL_DATE);
        assert_eq!(fields.date("grantDate"), SENTINEL_DATE);
    }

    #[test]
    fn test_list_with_reports_item_path() {
        let body = json!({"eventDataBag": [{"eventCode": "A"}, "oops"]});
        let fields = Fields::document(&body);
        let err = fields
            .list_with("eventDataBag", |item| item.text("eventCode"))
            .unwrap_err();
        assert_eq!(err.field(), "eventDataBag[1]");
    }

    #[test]
    fn test_list_with_maps_in_order() {
        let body = json!({"eventDataBag": [{"eventCode": "A"}, {"eventCode": "B"}, {}]});
        let codes = Fields::document(&body)
            .list_with("eventDataBag", |item| item.text("eventCode"))
            .unwrap();
        assert_eq!(codes, vec!["A", "B", ""]);
    }

    #[test]
    fn test_list_rejects_non_array() {
        let body = json!({"eventDataBag": "none"});
        let err = Fields::document(&body)
            .list_with("eventDataBag", |item| item.text("eventCode"))
            .unwrap_err();
        assert_eq!(err, MapError::type_mismatch("eventDataBag", "array", "string"));
    }

    #[test]
    fn test_dates_bag_degrades_per_item() {
        let body = json!({"publicationDateBag": ["2009-04-30", "bad"]});
        let dates = Fields::document(&body).dates("publicationDateBag").unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2009, 4, 30).unwrap());
        assert_eq!(dates[1], SENTINEL_DATE);
    }
}
