//! Filed and mailed documents with their download options.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};

/// Whether a document was received by or sent from the office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionCategory {
    /// Filed by the applicant.
    Incoming,
    /// Mailed by the office.
    Outgoing,
    /// Kept in the file without being sent.
    Internal,
    /// A value the client does not recognize, kept verbatim.
    Other(String),
    /// The field was absent.
    Unspecified,
}

impl DirectionCategory {
    fn parse(raw: Option<String>) -> Self {
        let Some(raw) = raw else {
            return Self::Unspecified;
        };
        match raw.trim().to_ascii_uppercase().as_str() {
            "INCOMING" => Self::Incoming,
            "OUTGOING" => Self::Outgoing,
            "INTERNAL" => Self::Internal,
            "" => Self::Unspecified,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for DirectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming => f.write_str("INCOMING"),
            Self::Outgoing => f.write_str("OUTGOING"),
            Self::Internal => f.write_str("INTERNAL"),
            Self::Other(raw) => f.write_str(raw),
            Self::Unspecified => Ok(()),
        }
    }
}

/// One format a document can be downloaded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOption {
    /// API mime identifier: `PDF`, `MS_WORD` or `XML`.
    pub mime_type: String,
    /// URL serving this format.
    pub download_url: String,
    /// Number of pages, when the API reports it.
    pub page_count: Option<i64>,
}

impl FromFields for DownloadOption {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            mime_type: fields.text("mimeTypeIdentifier")?,
            download_url: fields.text("downloadUrl")?,
            page_count: fields.opt_int("pageTotalQuantity")?,
        })
    }
}

/// One document in an application's file history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDescriptor {
    /// Application serial number.
    pub application_number: String,
    /// Official date of the document.
    pub official_date: DateTime<FixedOffset>,
    /// Unique document identifier.
    pub document_identifier: String,
    /// Document code, e.g. `CTNF`.
    pub document_code: String,
    /// Description of the document code.
    pub document_description: String,
    /// Whether the document was incoming, outgoing or internal.
    pub direction_category: DirectionCategory,
    /// Formats the document can be downloaded in.
    pub download_options: Vec<DownloadOption>,
}

impl DocumentDescriptor {
    /// Finds the download option for a mime identifier (exact match).
    #[must_use]
    pub fn download_option(&self, mime_type: &str) -> Option<&DownloadOption> {
        self.download_options
            .iter()
            .find(|option| option.mime_type == mime_type)
    }

    /// Mime identifiers offered for this document, in API order.
    #[must_use]
    pub fn available_mime_types(&self) -> Vec<String> {
        self.download_options
            .iter()
            .map(|option| option.mime_type.clone())
            .collect()
    }
}

impl FromFields for DocumentDescriptor {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            official_date: fields.timestamp("officialDate"),
            document_identifier: fields.text("documentIdentifier")?,
            document_code: fields.text("documentCode")?,
            document_description: fields.text("documentCodeDescriptionText")?,
            direction_category: DirectionCategory::parse(fields.opt_text("directionCategory")?),
            download_options: fields.list("downloadOptionBag")?,
        })
    }
}

impl CollectionItem for DocumentDescriptor {
    const BAG_KEY: &'static str = "documentBag";
}

/// Response of the `/documents` endpoint.
pub type DocumentCollection = Collection<DocumentDescriptor>;
