// src/main.rs
mod utils;
mod extractors;
mod source;
mod storage;

use std::path::PathBuf;

use clap::Parser;
use utils::AppError;
use extractors::{ExtractionReport, ParserConfig, QuestionExtractor};
use source::{DocumentKind, SourceDocument};
use storage::StorageManager;

/// Command Line Interface for the question document extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Decoded question documents (.txt or .md)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for extracted questions
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - save segment-annotated HTML files for debugging
    #[arg(short, long)]
    debug: bool,

    /// MIME type of the inputs, overriding detection from the file extension
    #[arg(long)]
    mime: Option<String>,

    /// Also print the parsed questions as JSON on stdout
    #[arg(short, long)]
    print: bool,

    /// Minimum question length in characters
    #[arg(long, default_value_t = extractors::section::DEFAULT_MIN_QUESTION_CHARS)]
    min_question_len: usize,

    /// Minimum answer length in characters
    #[arg(long, default_value_t = extractors::section::DEFAULT_MIN_ANSWER_CHARS)]
    min_answer_len: usize,
}

impl Args {
    fn parser_config(&self) -> Result<ParserConfig, AppError> {
        if self.min_question_len == 0 || self.min_answer_len == 0 {
            return Err(AppError::Config("Minimum question and answer lengths must be at least 1".to_string()));
        }
        Ok(ParserConfig {
            min_question_chars: self.min_question_len,
            min_answer_chars: self.min_answer_len,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);
    let config = args.parser_config()?;

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Initialize question extractor
    let extractor = QuestionExtractor::new(config);

    // 5. Process each document
    let mut success_count = 0;
    let mut failure_count = 0;

    for path in &args.inputs {
        tracing::info!("Processing document: {}", path.display());

        let loaded = match DocumentKind::detect(path, args.mime.as_deref()) {
            Ok(kind) => source::load_document(path, kind).await,
            Err(e) => Err(e),
        };
        let document = match loaded {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                failure_count += 1;
                continue;
            }
        };

        let report = extractor.extract(&document.text);
        tracing::info!(
            "Extracted {} questions from {} sections ({} dropped, {:?} boundaries)",
            report.questions.len(),
            report.sections_found(),
            report.sections_dropped(),
            report.boundary_mode()
        );
        if report.questions.is_empty() {
            tracing::warn!("No questions found in {}", path.display());
        }

        match save_outputs(&storage, &document, &report, &args) {
            Ok(()) => success_count += 1,
            Err(e) => {
                tracing::error!("Failed to save results for {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!("Failed to process any of {} documents", failure_count)));
    }

    Ok(())
}

fn save_outputs(
    storage: &StorageManager,
    document: &SourceDocument,
    report: &ExtractionReport,
    args: &Args,
) -> Result<(), AppError> {
    storage.save_questions(document, report)?;
    storage.save_metadata(document, report)?;

    if args.debug {
        let debug_path = storage
            .document_dir(document)?
            .join(format!("{}_segments.html", document.name));
        utils::html_debug::create_segment_debug_html(&report.segmentation, &debug_path)?;
    }

    if args.print {
        let json = serde_json::to_string_pretty(&report.questions)
            .map_err(|e| AppError::Processing(format!("Failed to serialize questions: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}
