//! USPTO Open Data Portal client library
//!
//! An async client for the patent application endpoints of the USPTO Open
//! Data Portal. It fetches application file wrappers, documents, continuity,
//! foreign priority, transaction and assignment data keyed by application
//! serial number, maps the loosely-typed JSON into typed records, and streams
//! documents to disk.
//!
//! # Architecture
//!
//! - [`client`] - `OdpClient`, configuration, endpoint dispatch, patent-number lookup
//! - [`response`] - classification of responses into bodies or [`ApiError`]s
//! - [`mapping`] - default-substituting field access over JSON objects
//! - [`models`] - domain records and the generic [`Collection`] envelope
//! - [`download`] - streaming document downloads
//!
//! # Errors
//!
//! Every operation returns `Result`. A non-200 API answer is the
//! [`OdpError::Api`] variant carrying an [`ApiError`]; downloads use their own
//! [`DownloadError`].

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod download;
pub mod mapping;
pub mod models;
pub mod response;
mod user_agent;

// Re-export commonly used types
pub use client::{ClientConfig, Endpoint, OdpClient, OdpError, sanitize_patent_number};
pub use download::{DEFAULT_MIME_TYPE, DownloadError};
pub use mapping::{FromFields, MapError, SENTINEL_DATE};
pub use models::{
    ApplicationAssignment, ApplicationContinuity, ApplicationMetadata, ApplicationWrapper,
    AssignmentCollection, AssignmentRecord, Collection, ContinuityCollection, ContinuityRecord,
    DocumentCollection, DocumentDescriptor, DownloadOption, ForeignPriorityClaim,
    ForeignPriorityCollection, ForeignPriorityData, TransactionCollection, TransactionEvent,
    TransactionHistory,
};
pub use response::{ApiError, classify_response};
