//! Filename synthesis and sanitization for downloaded documents.

use std::path::Path;

use crate::models::DocumentDescriptor;

/// File extension for an API mime identifier.
///
/// `PDF` → `.pdf`, `MS_WORD` → `.doc`, anything else → `.xml`.
#[must_use]
pub fn extension_for_mime_type(mime_type: &str) -> &'static str {
    match mime_type {
        "PDF" => ".pdf",
        "MS_WORD" => ".doc",
        _ => ".xml",
    }
}

/// Builds `{application}_{code}_{identifier}{ext}` for a document.
#[must_use]
pub fn default_filename(document: &DocumentDescriptor, mime_type: &str) -> String {
    format!(
        "{}_{}_{}{}",
        sanitize_filename_component(&document.application_number),
        sanitize_filename_component(&document.document_code),
        sanitize_filename_component(&document.document_identifier),
        extension_for_mime_type(mime_type)
    )
}

/// Resolves the caller's filename, keeping only its final path component.
///
/// Falls back to [`default_filename`] when none is given or it has no name part.
#[must_use]
pub fn resolve_filename(
    requested: Option<&str>,
    document: &DocumentDescriptor,
    mime_type: &str,
) -> String {
    requested
        .and_then(|name| Path::new(name.trim()).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| default_filename(document, mime_type))
}

/// Replaces characters unsafe in filenames with `_`, collapsing runs.
pub(crate) fn sanitize_filename_component(value: &str) -> String {
    let mut out = String::new();
    let mut prev_sep = false;
    for ch in value.chars() {
        let mapped = match ch {
            c if c.is_alphanumeric() || matches!(c, '-' | '.') => c,
            _ => '_',
        };
        if mapped == '_' {
            if !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else {
            out.push(mapped);
            prev_sep = false;
        }
    }
    out.trim_matches('_').to_string()
}
