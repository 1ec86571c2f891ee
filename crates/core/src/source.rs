//! Reading a document from disk or any reader.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and ingest the document at `path`.
///
/// Only I/O failures are errors. Content problems degrade inside
/// [`Document::from_json_str`].
pub fn read_document(path: impl AsRef<Path>) -> Result<Document, SourceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(Document::from_json_str(&text))
}

/// Read and ingest a document from `reader` (stdin, a response body, ...).
pub fn read_from(mut reader: impl Read) -> Result<Document, SourceError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| SourceError::Io {
            path: PathBuf::from("-"),
            source,
        })?;
    Ok(Document::from_json_str(&text))
}

/// Like [`read_document`], but any failure yields an empty document.
#[must_use]
pub fn read_document_or_empty(path: impl AsRef<Path>) -> Document {
    read_document(path).unwrap_or_else(|err| {
        tracing::warn!(%err, "using empty document");
        Document::default()
    })
}
