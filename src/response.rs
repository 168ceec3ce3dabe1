//! Classification of API responses into payloads or structured errors.
//!
//! Status 200 is the only success status. Every other status becomes an
//! [`ApiError`], populated from the body when it carries error fields and
//! from a per-status default message otherwise. Bodies that are not JSON
//! (an HTML error page, an empty body) are treated as `{}` on both paths.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::mapping::Fields;

/// A structured error returned by the API for a non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("USPTO API error {code}: {error}{}", details_suffix(.error_details.as_deref()))]
pub struct ApiError {
    /// Error code from the body, or the HTTP status when the body omits it.
    pub code: i64,
    /// Short error text.
    pub error: String,
    /// Longer explanation, when the API provides one.
    pub error_details: Option<String>,
    /// Correlation identifier for support escalation.
    pub request_identifier: Option<String>,
}

fn details_suffix(details: Option<&str>) -> String {
    details.map(|d| format!(" - {d}")).unwrap_or_default()
}

impl ApiError {
    /// Builds an error from a (possibly empty) body and the HTTP status.
    #[must_use]
    pub fn from_body(body: &Value, status: u16) -> Self {
        let fields = Fields::document(body);
        let code = fields
            .opt_int("code")
            .ok()
            .flatten()
            .unwrap_or_else(|| i64::from(status));
        let error = fields
            .opt_text("error")
            .ok()
            .flatten()
            .unwrap_or_else(|| default_message(status).to_string());
        let error_details = ["errorDetails", "errorDetailed"]
            .iter()
            .find_map(|key| fields.opt_text(key).ok().flatten().filter(|d| !d.is_empty()));
        let request_identifier = fields.opt_text("requestIdentifier").ok().flatten();

        Self {
            code,
            error,
            error_details,
            request_identifier,
        }
    }
}

/// Default error text for a status when the body does not supply one.
#[must_use]
pub fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown Error",
    }
}

/// Parses a response body best-effort; anything that is not JSON becomes `{}`.
#[must_use]
pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Decides whether an exchange succeeded.
///
/// Returns the parsed body for status 200 and an [`ApiError`] for anything else.
///
/// # Errors
///
/// Returns [`ApiError`] for every status other than 200.
pub fn classify_response(status: u16, bytes: &[u8]) -> Result<Value, ApiError> {
    let body = parse_body(bytes);
    if status == 200 {
        Ok(body)
    } else {
        Err(ApiError::from_body(&body, status))
    }
}
