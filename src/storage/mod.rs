// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::ExtractionReport;
use crate::source::SourceDocument;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory holding every output file for one document: /base_dir/name/
    pub fn document_dir(&self, document: &SourceDocument) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(&document.name);

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }

        Ok(target_dir)
    }

    /// Saves the parsed questions as a JSON array
    pub fn save_questions(&self, document: &SourceDocument, report: &ExtractionReport) -> Result<PathBuf, StorageError> {
        let file_path = self
            .document_dir(document)?
            .join(format!("{}_questions.json", document.name));

        let json = serde_json::to_string_pretty(&report.questions)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved {} questions to {}", report.questions.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the extraction run in JSON format
    pub fn save_metadata(&self, document: &SourceDocument, report: &ExtractionReport) -> Result<PathBuf, StorageError> {
        let file_path = self
            .document_dir(document)?
            .join(format!("{}_meta.json", document.name));

        let metadata = serde_json::json!({
            "source_path": document.path.display().to_string(),
            "document_kind": document.kind,
            "text_length": document.text.len(),
            "boundary_mode": report.boundary_mode(),
            "sections_found": report.sections_found(),
            "sections_dropped": report.sections_dropped(),
            "question_count": report.questions.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
