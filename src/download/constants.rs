//! Constants for the download module.

/// Write granularity for streamed document bodies (8 KiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

/// Mime identifier requested when the caller does not name one.
pub const DEFAULT_MIME_TYPE: &str = "PDF";

/// Suffix of the file a body is streamed into before being renamed into place.
pub const PARTIAL_SUFFIX: &str = ".part";
