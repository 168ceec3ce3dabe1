//! Constants for the API client (endpoints, headers, environment variables).

/// Production base path for patent application endpoints.
pub const DEFAULT_BASE_URL: &str = "https://beta-api.uspto.gov/api/v1/patent/applications";

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Environment variable read by [`ClientConfig::from_env`](super::ClientConfig::from_env).
pub const API_KEY_ENV: &str = "USPTO_API_KEY";

/// Optional environment override for the base URL.
pub const BASE_URL_ENV: &str = "USPTO_ODP_BASE_URL";

/// Path (relative to the base URL) of the POST search endpoint.
pub const SEARCH_PATH: &str = "search";

/// Filter field used to resolve a patent number to its application.
pub const PATENT_NUMBER_FILTER: &str = "applicationMetaData.patentNumber";
