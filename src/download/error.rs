//! Error types for the download module.
//!
//! Local preconditions (missing directory, read-only directory, unavailable
//! format) are separate variants so callers can tell them apart; all three
//! are raised before any network activity.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a document.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The destination directory does not exist (or is not a directory).
    #[error("save path does not exist: {path}")]
    DirectoryMissing {
        /// The directory that was checked.
        path: PathBuf,
    },

    /// The destination directory exists but is read-only.
    #[error("save path is not writable: {path}")]
    DirectoryNotWritable {
        /// The directory that was checked.
        path: PathBuf,
    },

    /// The document has no download option for the requested mime type.
    #[error(
        "mime type '{requested}' not available for this document. Available types: {}",
        .available.join(", ")
    )]
    FormatUnavailable {
        /// The mime identifier that was asked for.
        requested: String,
        /// The mime identifiers the document does offer.
        available: Vec<String>,
    },

    /// The download option carries a URL that does not parse.
    #[error("invalid download URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The download request returned a status other than 200.
    #[error("download failed with status {status}: {url}")]
    Failed {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Network-level error while sending the request or reading the body.
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL being downloaded.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// File system error while checking, creating or writing the file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a missing-directory error.
    pub fn directory_missing(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryMissing { path: path.into() }
    }

    /// Creates a not-writable error.
    pub fn directory_not_writable(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotWritable { path: path.into() }
    }

    /// Creates a format-unavailable error listing the offered types.
    pub fn format_unavailable(requested: impl Into<String>, available: Vec<String>) -> Self {
        Self::FormatUnavailable {
            requested: requested.into(),
            available,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a failed-download error for a non-200 status.
    pub fn failed(url: impl Into<String>, status: u16) -> Self {
        Self::Failed {
            url: url.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
