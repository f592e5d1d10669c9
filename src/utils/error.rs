// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::source::DocumentKind;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file type '{0}'. Only PDF, Word (DOC/DOCX), ODT and plain text files are allowed.")]
    UnsupportedFormat(String),

    #[error("{} is {size} bytes, larger than the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{kind} document {} must be converted to plain text before question extraction", .path.display())]
    NeedsTextExtraction { kind: DocumentKind, path: PathBuf },

    #[error("{} is not valid UTF-8 text", .0.display())]
    InvalidEncoding(PathBuf),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Loading document failed: {0}")]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
