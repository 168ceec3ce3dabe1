//! User-Agent string sent with every API and download request.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/KennethThompson";

/// Default User-Agent identifying the client and its version.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("uspto-odp/{version} (+{PROJECT_UA_URL})")
}
