//! Error types for the API client.

use thiserror::Error;

use crate::mapping::MapError;
use crate::response::ApiError;

/// Errors returned by [`OdpClient`](super::OdpClient) lookups.
#[derive(Debug, Error)]
pub enum OdpError {
    /// Network-level failure (DNS, connection, TLS, body read). Not retried.
    #[error("network error requesting {url}: {source}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-200 status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 200 response contained a value of the wrong shape.
    #[error("unexpected response shape from {url}: {source}")]
    Decode {
        /// The URL whose body failed to map.
        url: String,
        /// The mapping failure, naming the offending field.
        #[source]
        source: MapError,
    },

    /// A patent number that contains no digits once sanitized.
    #[error("invalid patent number: {input:?}")]
    InvalidPatentNumber {
        /// The raw input.
        input: String,
    },

    /// The configured base URL does not parse.
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// No API key was configured.
    #[error("missing API key (set {var})")]
    MissingApiKey {
        /// Environment variable that should hold the key.
        var: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl OdpError {
    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: MapError) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid patent number error.
    pub fn invalid_patent_number(input: impl Into<String>) -> Self {
        Self::InvalidPatentNumber {
            input: input.into(),
        }
    }

    /// Returns the structured API error, if this is one.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
