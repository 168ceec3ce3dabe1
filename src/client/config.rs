//! Client configuration: API key, base URL and optional timeouts.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::constants::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use super::error::OdpError;

/// Settings for [`OdpClient`](super::OdpClient).
///
/// The library defines no timeout policy of its own; both timeouts are
/// `None` unless the caller opts in.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }

    /// Reads `USPTO_API_KEY` and the optional `USPTO_ODP_BASE_URL` override.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError::MissingApiKey`] if the key is unset or blank.
    pub fn from_env() -> Result<Self, OdpError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(OdpError::MissingApiKey { var: API_KEY_ENV })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Overrides the base URL (e.g. to point at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets a connect timeout on the client this config builds.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a whole-request timeout on the client this config builds.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// The API key sent in the `X-API-KEY` header.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Connect timeout, if one was set.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Whole-request timeout, if one was set.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Checks that the key is present and the base URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError::MissingApiKey`] or [`OdpError::InvalidBaseUrl`].
    pub fn validate(&self) -> Result<(), OdpError> {
        if self.api_key.trim().is_empty() {
            return Err(OdpError::MissingApiKey { var: API_KEY_ENV });
        }
        Url::parse(&self.base_url).map_err(|_| OdpError::InvalidBaseUrl {
            url: self.base_url.clone(),
        })?;
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
