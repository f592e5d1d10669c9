// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::extractors::{BoundaryMode, Segmentation};
use crate::utils::error::AppError;

// Length of the highlighted run at the start of each section.
const MARKER_HIGHLIGHT_CHARS: usize = 12;

/// Saves plain text as an HTML page with debug highlights.
/// Highlights are (start, end, mode, title) byte ranges into `text`.
pub fn save_debug_html(text: &str, filename: &Path, highlights: &[(usize, usize, BoundaryMode, String)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("body { white-space: pre-wrap; font-family: monospace; }\n");
    debug_html.push_str(".highlight-markers { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-fallback { background-color: #FFA500; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, mode, title) in sorted_highlights {
        if start < last_pos {
            continue; // Overlaps the previous highlight
        }
        if start > last_pos {
            debug_html.push_str(&escape_html(&text[last_pos..start]));
        }

        let css_class = match mode {
            BoundaryMode::Markers => "highlight-markers",
            BoundaryMode::Fallback => "highlight-fallback",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"{}\">", css_class, escape_html(&title)));
        debug_html.push_str(&escape_html(&text[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&escape_html(&text[last_pos..]));
    }

    debug_html.push_str("\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Writes the normalized text of a segmented document with the start of every section highlighted
pub fn create_segment_debug_html(segmentation: &Segmentation, filename: &Path) -> Result<(), AppError> {
    let text = &segmentation.normalized;

    let highlights: Vec<_> = segmentation
        .sections
        .iter()
        .map(|section| {
            let end = text[section.offset..]
                .char_indices()
                .take_while(|(_, c)| *c != '\n')
                .nth(MARKER_HIGHLIGHT_CHARS)
                .map(|(i, _)| section.offset + i)
                .unwrap_or_else(|| {
                    text[section.offset..]
                        .find('\n')
                        .map(|i| section.offset + i)
                        .unwrap_or(text.len())
                });
            let label = section.label.as_deref().unwrap_or("-");
            let title = format!(
                "Section {} (label {}) at offset {}: {}",
                section.ordinal, label, section.offset, section.heading
            );
            (section.offset, end, segmentation.mode, title)
        })
        .collect();

    save_debug_html(text, filename, &highlights)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::segment;

    #[test]
    fn test_segment_debug_html_marks_sections() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("segments.html");

        let segmentation = segment("1. What is <b>?\nBold.\n2. What is a & b?\nBoth.");
        create_segment_debug_html(&segmentation, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("class=\"highlight-markers\"").count(), 2);
        assert!(html.contains("Section 2 (label 2) at offset"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("b&gt;?"));
        assert!(html.contains("&amp; b?"));
    }

    #[test]
    fn test_fallback_sections_use_fallback_class() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("segments.html");

        let segmentation = segment("Intro text here 1. What is CSS? Styles. 2. What is HTML? Markup.");
        create_segment_debug_html(&segmentation, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("class=\"highlight-fallback\"").count(), 3);
        assert!(!html.contains("class=\"highlight-markers\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
