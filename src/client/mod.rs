//! Async client for the patent application endpoints.
//!
//! Each lookup issues exactly one request, classifies the response with
//! [`classify_response`](crate::response::classify_response), and maps a
//! successful body into a typed record. A non-200 answer is logged at error
//! level and returned as [`OdpError::Api`]; transport failures propagate as
//! [`OdpError::Transport`] untouched. Nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use uspto_odp::OdpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OdpClient::new("my-api-key")?;
//! let wrapper = client.get_patent_wrapper("16123456").await?;
//! println!("{}", wrapper.metadata.invention_title);
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod error;
mod patent_number;

pub use config::ClientConfig;
pub use constants::{API_KEY_ENV, API_KEY_HEADER, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::OdpError;
pub use patent_number::{patent_number_filter, sanitize_patent_number};

use std::fmt;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::mapping::MapError;
use crate::models::{
    ApplicationWrapper, AssignmentCollection, ContinuityCollection, DocumentCollection,
    ForeignPriorityCollection, TransactionCollection, WrapperCollection,
};
use crate::response::{ApiError, classify_response};
use crate::user_agent;

use constants::SEARCH_PATH;

/// The per-application GET endpoints, relative to `{base}/{serial}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `{base}/{serial}`: metadata and events.
    Wrapper,
    /// `/documents`: the file history documents.
    Documents,
    /// `/continuity`: parent and child applications.
    Continuity,
    /// `/foreign-priority`: foreign priority claims.
    ForeignPriority,
    /// `/transactions`: the transaction history.
    Transactions,
    /// `/assignment`: recorded assignments.
    Assignment,
}

impl Endpoint {
    /// Path suffix appended after the serial number segment.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Wrapper => "",
            Self::Documents => "/documents",
            Self::Continuity => "/continuity",
            Self::ForeignPriority => "/foreign-priority",
            Self::Transactions => "/transactions",
            Self::Assignment => "/assignment",
        }
    }
}

/// Client for the USPTO Open Data Portal application API.
///
/// Cloning is cheap; clones share the underlying connection pool, and the
/// client may be used from concurrent tasks.
#[derive(Clone)]
pub struct OdpClient {
    http: Client,
    config: ClientConfig,
}

impl OdpClient {
    /// Creates a client for the production API with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError`] if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OdpError> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError`] if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, OdpError> {
        config.validate()?;
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    /// Creates a client that sends requests through a caller-owned
    /// [`reqwest::Client`], so one pool can be shared across clients.
    ///
    /// Timeouts in `config` are ignored; the injected client's own apply.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError`] if the configuration is invalid.
    pub fn with_http_client(config: ClientConfig, http: Client) -> Result<Self, OdpError> {
        config.validate()?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the file wrapper (metadata and events) of an application.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError`] on transport failure, non-200 status, or a
    /// malformed response shape.
    #[instrument(skip(self))]
    pub async fn get_patent_wrapper(
        &self,
        serial_number: &str,
    ) -> Result<ApplicationWrapper, OdpError> {
        self.fetch(
            Endpoint::Wrapper,
            serial_number,
            ApplicationWrapper::from_response,
        )
        .await
    }

    /// Fetches the documents filed or mailed for an application.
    ///
    /// # Errors
    ///
    /// Same as [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_patent_documents(
        &self,
        serial_number: &str,
    ) -> Result<DocumentCollection, OdpError> {
        self.fetch(
            Endpoint::Documents,
            serial_number,
            DocumentCollection::from_value,
        )
        .await
    }

    /// Fetches parent/child continuity data for an application.
    ///
    /// # Errors
    ///
    /// Same as [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_patent_continuity(
        &self,
        serial_number: &str,
    ) -> Result<ContinuityCollection, OdpError> {
        self.fetch(
            Endpoint::Continuity,
            serial_number,
            ContinuityCollection::from_value,
        )
        .await
    }

    /// Fetches foreign priority claims for an application.
    ///
    /// # Errors
    ///
    /// Same as [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_foreign_priority(
        &self,
        serial_number: &str,
    ) -> Result<ForeignPriorityCollection, OdpError> {
        self.fetch(
            Endpoint::ForeignPriority,
            serial_number,
            ForeignPriorityCollection::from_value,
        )
        .await
    }

    /// Fetches the transaction history of an application.
    ///
    /// # Errors
    ///
    /// Same as [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_patent_transactions(
        &self,
        serial_number: &str,
    ) -> Result<TransactionCollection, OdpError> {
        self.fetch(
            Endpoint::Transactions,
            serial_number,
            TransactionCollection::from_value,
        )
        .await
    }

    /// Fetches assignment records for an application.
    ///
    /// # Errors
    ///
    /// Same as [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_patent_assignments(
        &self,
        serial_number: &str,
    ) -> Result<AssignmentCollection, OdpError> {
        self.fetch(
            Endpoint::Assignment,
            serial_number,
            AssignmentCollection::from_value,
        )
        .await
    }

    /// Looks up the application that issued as the given patent.
    ///
    /// The number is sanitized first (`"US11,989,999"` → `"11989999"`).
    /// Returns `None` when the search matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OdpError::InvalidPatentNumber`] before any request when the
    /// input has no digits, and otherwise the same errors as
    /// [`get_patent_wrapper`](Self::get_patent_wrapper).
    #[instrument(skip(self))]
    pub async fn get_app_metadata_from_patent_number(
        &self,
        patent_number: &str,
    ) -> Result<Option<ApplicationWrapper>, OdpError> {
        let sanitized = sanitize_patent_number(patent_number)
            .ok_or_else(|| OdpError::invalid_patent_number(patent_number))?;
        let url = format!("{}/{SEARCH_PATH}", self.config.base_url());
        debug!(%url, patent_number = %sanitized, "searching by patent number");

        let request = self
            .authorized(self.http.post(&url))
            .json(&patent_number_filter(&sanitized));
        self.execute(request, &url, |body| {
            Ok(WrapperCollection::from_value(body)?.into_first())
        })
        .await
    }

    /// Resolves a patent number to its application (serial) number.
    ///
    /// # Errors
    ///
    /// Same as [`get_app_metadata_from_patent_number`](Self::get_app_metadata_from_patent_number).
    pub async fn get_app_number_from_patent_number(
        &self,
        patent_number: &str,
    ) -> Result<Option<String>, OdpError> {
        Ok(self
            .get_app_metadata_from_patent_number(patent_number)
            .await?
            .map(|wrapper| wrapper.application_number)
            .filter(|number| !number.is_empty()))
    }

    /// Full URL for an endpoint and serial number.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint, serial_number: &str) -> String {
        format!(
            "{}/{}{}",
            self.config.base_url(),
            urlencoding::encode(serial_number.trim()),
            endpoint.suffix()
        )
    }

    /// Adds the `accept` and API-key headers every request carries.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.config.api_key())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    async fn fetch<T, F>(&self, endpoint: Endpoint, serial_number: &str, map: F) -> Result<T, OdpError>
    where
        F: FnOnce(&Value) -> Result<T, MapError>,
    {
        let url = self.endpoint_url(endpoint, serial_number);
        debug!(%url, ?endpoint, "requesting");
        let request = self.authorized(self.http.get(&url));
        self.execute(request, &url, map).await
    }

    async fn execute<T, F>(&self, request: RequestBuilder, url: &str, map: F) -> Result<T, OdpError>
    where
        F: FnOnce(&Value) -> Result<T, MapError>,
    {
        let response = request
            .send()
            .await
            .map_err(|e| OdpError::transport(url, e))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| OdpError::transport(url, e))?;

        match classify_response(status, &bytes) {
            Ok(body) => map(&body).map_err(|e| OdpError::decode(url, e)),
            Err(api_error) => {
                log_api_error(url, &api_error);
                Err(OdpError::Api(api_error))
            }
        }
    }
}

impl fmt::Debug for OdpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn log_api_error(url: &str, api_error: &ApiError) {
    error!(
        url,
        code = api_error.code,
        error = %api_error.error,
        details = api_error.error_details.as_deref().unwrap_or("No details provided"),
        request_id = api_error
            .request_identifier
            .as_deref()
            .unwrap_or("No request ID provided"),
        "USPTO API error"
    );
}

fn build_http_client(config: &ClientConfig) -> Result<Client, OdpError> {
    let mut builder = Client::builder()
        .user_agent(user_agent::default_user_agent())
        .gzip(true);
    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(OdpError::ClientBuild)
}
