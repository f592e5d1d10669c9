// src/source/mod.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::utils::error::SourceError;

/// Uploads above this size are refused.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Formats accepted as question documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Pdf,
    Word,
    OpenDocument,
}

impl DocumentKind {
    /// Detects the kind from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" => Ok(DocumentKind::PlainText),
            "md" | "markdown" => Ok(DocumentKind::Markdown),
            "pdf" => Ok(DocumentKind::Pdf),
            "doc" | "docx" => Ok(DocumentKind::Word),
            "odt" => Ok(DocumentKind::OpenDocument),
            _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn from_mime(mime: &str) -> Result<Self, SourceError> {
        match mime {
            "text/plain" => Ok(DocumentKind::PlainText),
            "text/markdown" => Ok(DocumentKind::Markdown),
            "application/pdf" => Ok(DocumentKind::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(DocumentKind::Word)
            }
            "application/vnd.oasis.opendocument.text" => Ok(DocumentKind::OpenDocument),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }

    /// An explicit MIME type wins over the file extension.
    pub fn detect(path: &Path, mime: Option<&str>) -> Result<Self, SourceError> {
        match mime {
            Some(mime) => Self::from_mime(mime),
            None => Self::from_path(path),
        }
    }

    /// Binary formats need an external text extractor before they can be parsed.
    pub fn is_text(&self) -> bool {
        matches!(self, DocumentKind::PlainText | DocumentKind::Markdown)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::PlainText => "Plain text",
            DocumentKind::Markdown => "Markdown",
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "Word",
            DocumentKind::OpenDocument => "ODT",
        };
        f.write_str(name)
    }
}

/// Decoded text of one input document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// File stem, used to name output files.
    pub name: String,
    pub kind: DocumentKind,
    pub text: String,
}

/// Reads a document from disk as `kind`, checking its size first.
pub async fn load_document(path: &Path, kind: DocumentKind) -> Result<SourceDocument, SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = tokio::fs::metadata(path).await.map_err(io_err)?.len();
    if size > MAX_DOCUMENT_BYTES {
        return Err(SourceError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_DOCUMENT_BYTES,
        });
    }

    if !kind.is_text() {
        return Err(SourceError::NeedsTextExtraction {
            kind,
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    let text = String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding(path.to_path_buf()))?;
    tracing::debug!("Read {} ({} bytes, {})", path.display(), size, kind);

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    Ok(SourceDocument {
        path: path.to_path_buf(),
        name,
        kind,
        text,
    })
}
