//! Streaming document downloads.
//!
//! [`OdpClient::download_document`] picks the document's download option for
//! a mime identifier and streams it into a directory without holding the
//! body in memory.
//!
//! Checks run in this order, the first three before any request is sent:
//!
//! 1. the destination directory exists
//! 2. the destination directory is writable (a `.part` file is created in it)
//! 3. the document offers the requested mime type
//! 4. the download request answers 200
//!
//! The body is written to `<name>.part` and renamed over the final name only
//! once it is complete, so a failed download never clobbers an existing file.
//! The partial file is removed on every error path.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use uspto_odp::OdpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OdpClient::new("my-api-key")?;
//! let documents = client.get_patent_documents("16123456").await?;
//! if let Some(document) = documents.items.first() {
//!     let path = client
//!         .download_document(document, Path::new("./downloads"), "PDF", None)
//!         .await?;
//!     println!("Downloaded: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
mod filename;

pub use constants::{DEFAULT_MIME_TYPE, DOWNLOAD_CHUNK_SIZE, PARTIAL_SUFFIX};
pub use error::DownloadError;
pub use filename::{default_filename, extension_for_mime_type, resolve_filename};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use crate::client::OdpClient;
use crate::models::DocumentDescriptor;

impl OdpClient {
    /// Downloads one format of a document into `save_dir`.
    ///
    /// When `filename` is `None` the name is built from the application
    /// number, document code and identifier, with an extension derived from
    /// `mime_type`. Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if:
    /// - `save_dir` is missing or not writable (checked before any request)
    /// - `mime_type` is not offered by the document (checked before any request)
    /// - the download request fails or returns a status other than 200
    /// - writing the file fails
    #[must_use = "download result contains the path to the downloaded file"]
    #[instrument(skip(self, document), fields(document = %document.document_identifier))]
    pub async fn download_document(
        &self,
        document: &DocumentDescriptor,
        save_dir: &Path,
        mime_type: &str,
        filename: Option<&str>,
    ) -> Result<PathBuf, DownloadError> {
        ensure_directory(save_dir).await?;

        let file_path = save_dir.join(resolve_filename(filename, document, mime_type));
        let part_path = partial_path(&file_path);
        let file = create_partial(save_dir, &part_path).await?;

        match self.fetch_into(file, document, mime_type, &part_path).await {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::rename(&part_path, &file_path).await {
                    let _ = tokio::fs::remove_file(&part_path).await;
                    return Err(DownloadError::io(file_path, e));
                }
                info!(
                    path = %file_path.display(),
                    bytes,
                    mime_type,
                    "download complete"
                );
                Ok(file_path)
            }
            Err(error) => {
                debug!(path = %part_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&part_path).await;
                Err(error)
            }
        }
    }

    /// Resolves the download option, requests it and streams the body into
    /// `file`. Consumes `file` so the handle is closed on every return.
    async fn fetch_into(
        &self,
        file: File,
        document: &DocumentDescriptor,
        mime_type: &str,
        part_path: &Path,
    ) -> Result<u64, DownloadError> {
        let option = document.download_option(mime_type).ok_or_else(|| {
            DownloadError::format_unavailable(mime_type, document.available_mime_types())
        })?;
        let url = Url::parse(&option.download_url)
            .map_err(|_| DownloadError::invalid_url(option.download_url.clone()))?;
        debug!(%url, path = %part_path.display(), "starting download");

        let response = self
            .authorized(self.http().get(url.clone()))
            .send()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(DownloadError::failed(url.as_str(), status));
        }

        stream_to_file(file, response, url.as_str(), part_path).await
    }
}

/// Fails unless `dir` is an existing directory without the read-only bit.
async fn ensure_directory(dir: &Path) -> Result<(), DownloadError> {
    let metadata = match tokio::fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => metadata,
        Ok(_) => return Err(DownloadError::directory_missing(dir)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DownloadError::directory_missing(dir));
        }
        Err(e) => return Err(DownloadError::io(dir, e)),
    };
    if metadata.permissions().readonly() {
        return Err(DownloadError::directory_not_writable(dir));
    }
    Ok(())
}

/// Creates the `.part` file, which doubles as the real write-access check
/// for the current user.
async fn create_partial(dir: &Path, part_path: &Path) -> Result<File, DownloadError> {
    File::create(part_path)
        .await
        .map_err(|e| create_error(dir, part_path, e))
}

fn create_error(dir: &Path, part_path: &Path, error: std::io::Error) -> DownloadError {
    if matches!(
        error.kind(),
        std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ReadOnlyFilesystem
    ) {
        DownloadError::directory_not_writable(dir)
    } else {
        DownloadError::io(part_path, error)
    }
}

/// `report.pdf` → `report.pdf.part`, in the same directory.
fn partial_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.file_name().map(OsString::from).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    file_path.with_file_name(name)
}

/// Streams the response body into `file` in slices of at most
/// [`DOWNLOAD_CHUNK_SIZE`], returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        for slice in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            writer
                .write_all(slice)
                .await
                .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
        }
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
