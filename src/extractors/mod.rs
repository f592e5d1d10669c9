// src/extractors/mod.rs
pub mod classify;
pub mod section;
pub mod segmenter;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use classify::{Category, Difficulty};
pub use section::{parse_section, ParsedQuestion, ParserConfig};
pub use segmenter::{segment, BoundaryMode, Segmentation};

/// Outcome of running the full pipeline over one document.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub questions: Vec<ParsedQuestion>,
    pub segmentation: Segmentation,
}

impl ExtractionReport {
    pub fn sections_found(&self) -> usize {
        self.segmentation.sections.len()
    }

    pub fn sections_dropped(&self) -> usize {
        self.sections_found() - self.questions.len()
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.segmentation.mode
    }
}

/// Segments decoded document text and parses every section into a question.
/// Holds no state between calls.
pub struct QuestionExtractor {
    config: ParserConfig,
}

impl QuestionExtractor {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, text: &str) -> ExtractionReport {
        tracing::debug!("Parsing document text ({} bytes)", text.len());

        let segmentation = segment(text);
        let questions: Vec<ParsedQuestion> = segmentation
            .sections
            .iter()
            .filter_map(|section| parse_section(section, &self.config))
            .collect();

        tracing::debug!(
            "Parsed {} of {} sections ({:?} boundaries)",
            questions.len(),
            segmentation.sections.len(),
            segmentation.mode
        );

        ExtractionReport {
            questions,
            segmentation,
        }
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn parse_document(text: &str) -> Vec<ParsedQuestion> {
        QuestionExtractor::default().extract(text).questions
    }

    const QUIZ: &str = "Web quiz\r\n\r\n\
        1. What is HTML?\r\n\
        * A markup language\r\n\
        * Used for web pages\r\n\
        2. Ok? Yes it is.\r\n\
        **3. What is a SQL index?** A structure that speeds up lookups &amp; joins.\r\n\
        4. Explain how React renders. It diffs a virtual DOM for performance.\r\n";

    #[test]
    fn test_numbered_sections_kept_in_order() {
        let text = "1. What is Python? A programming language.\n\
                    2. What is a database? Organised storage.\n\
                    3. What is a server? A host that answers requests.";
        let questions = parse_document(text);

        let asked: Vec<_> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(asked, vec!["What is Python?", "What is a database?", "What is a server?"]);
        let categories: Vec<_> = questions.iter().map(|q| q.category).collect();
        assert_eq!(categories, vec![Category::Programming, Category::Database, Category::Networking]);
    }

    #[test]
    fn test_mixed_document() {
        let report = QuestionExtractor::default().extract(QUIZ);

        assert_eq!(report.boundary_mode(), BoundaryMode::Markers);
        assert_eq!(report.sections_found(), 4);
        assert_eq!(report.sections_dropped(), 1);

        let q = &report.questions;
        assert_eq!(q.len(), 3);

        assert_eq!(q[0].answer, "A markup language. Used for web pages");

        assert_eq!(q[1].question, "What is a SQL index?");
        // The unmatched closing `**` reads as a bullet, so the bullet rules apply.
        assert_eq!(q[1].answer, "A structure that speeds up lookups & joins");
        assert_eq!(q[1].category, Category::Database);

        assert_eq!(q[2].question, "Explain how React renders.");
        assert_eq!(q[2].difficulty, Difficulty::Advanced);
        assert_eq!(q[2].tags, vec!["REACT", "Performance"]);
    }

    #[test]
    fn test_fallback_document() {
        let report = QuestionExtractor::default().extract("Quiz 1. What is CSS? Style sheets. 2. What is HTML? Markup.");

        assert_eq!(report.boundary_mode(), BoundaryMode::Fallback);
        let asked: Vec<_> = report.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(asked, vec!["What is CSS?", "What is HTML?"]);
    }

    #[test]
    fn test_prose_without_numbers() {
        let questions = parse_document("Networks move packets. Routers pick the path.");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Networks move packets.");
        assert_eq!(questions[0].answer, "Routers pick the path.");
    }

    #[test]
    fn test_byte_order_mark_keeps_first_question() {
        let questions = parse_document("\u{FEFF}1. What is TCP? A network protocol.\n2. What is UDP? A datagram protocol.");
        let asked: Vec<_> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(asked, vec!["What is TCP?", "What is UDP?"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_document("").is_empty());
        assert!(parse_document("\n\n  \r\n").is_empty());
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let first = serde_json::to_string(&parse_document(QUIZ)).unwrap();
        let second = serde_json::to_string(&parse_document(QUIZ)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shape() {
        let questions = parse_document("1. What is HTML? Markup for the web.");
        let json = serde_json::to_value(&questions[0]).unwrap();

        assert_eq!(json["category"], "Web Development");
        assert_eq!(json["subcategory"], "General");
        assert_eq!(json["difficulty"], "Beginner");
        assert_eq!(json["tags"], serde_json::json!(["HTML"]));
        assert!(json["options"].is_null());
    }
}
