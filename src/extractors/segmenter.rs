// src/extractors/segmenter.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// --- Regex Patterns (Lazy Static) ---
// A question marker: start of a line, optional `*`/`**`, digits, a period, then the
// rest of that line as inline content. `\s*` may cross a newline, so "1.\nWhat ..."
// still yields "What ..." as the inline content.
static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\*{0,2}([0-9]+)\.\s*\*{0,2}(.*?)\*{0,2}$")
        .expect("Failed to compile BOUNDARY_RE")
});

// Anchored check used by the fallback split: digits, a period, whitespace.
static NUMBERED_ITEM_AHEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[0-9]+\.\s").expect("Failed to compile NUMBERED_ITEM_AHEAD_RE")
});

// --- Data Structures ---

/// How the sections of a document were located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Line-leading number markers were found.
    Markers,
    /// No markers; the text was split before every `N. ` occurrence.
    Fallback,
}

/// A slice of the normalized document believed to hold one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// The digits of the marker ("12" for "12."). `None` for fallback sections.
    pub label: Option<String>,
    /// 1-based position in the section sequence.
    pub ordinal: usize,
    /// Byte offset of the section start in the normalized text.
    pub offset: usize,
    /// Rest of the marker line, without trailing emphasis. Empty for fallback sections.
    pub heading: String,
    /// The trimmed section text, marker included.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Segmentation {
    pub normalized: String,
    pub mode: BoundaryMode,
    pub sections: Vec<RawSection>,
}

/// Converts CRLF and lone CR line endings to LF, drops a leading byte-order mark and
/// trims the whole text.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .trim_start_matches('\u{FEFF}')
        .trim()
        .to_string()
}

/// Normalizes `text` and slices it into one `RawSection` per detected question.
///
/// A numbered line inside an answer (a nested sub-list) is indistinguishable from a
/// question marker and starts a new section.
pub fn segment(text: &str) -> Segmentation {
    let normalized = normalize(text);

    let markers: Vec<(usize, String, String)> = BOUNDARY_RE
        .captures_iter(&normalized)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?.as_str().to_string();
            let heading = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            Some((whole.start(), label, heading))
        })
        .collect();

    tracing::debug!("Found {} question boundaries", markers.len());

    if markers.is_empty() {
        tracing::debug!("No question boundaries found, falling back to digit-period split");
        let sections = fallback_sections(&normalized);
        tracing::debug!("Fallback found {} sections", sections.len());
        return Segmentation {
            normalized,
            mode: BoundaryMode::Fallback,
            sections,
        };
    }

    let mut sections = Vec::with_capacity(markers.len());
    for (i, (start, label, heading)) in markers.iter().enumerate() {
        let end = markers
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(normalized.len());

        tracing::trace!("Question {} at offset {}: '{}'", label, start, heading);

        sections.push(RawSection {
            label: Some(label.clone()),
            ordinal: i + 1,
            offset: *start,
            heading: heading.trim().to_string(),
            text: normalized[*start..end].trim().to_string(),
        });
    }

    Segmentation {
        normalized,
        mode: BoundaryMode::Markers,
        sections,
    }
}

/// Splits before every position that is immediately followed by `digits '.' whitespace`,
/// dropping blank fragments. Positions inside a digit run count too, so "12. " splits
/// before both the "1" and the "2"; the stray "1" fragment is later rejected as too short.
fn fallback_sections(text: &str) -> Vec<RawSection> {
    let mut cuts: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .filter(|&idx| idx > 0 && NUMBERED_ITEM_AHEAD_RE.is_match(&text[idx..]))
        .collect();
    cuts.insert(0, 0);
    cuts.push(text.len());

    cuts.windows(2)
        .filter_map(|w| {
            let fragment = text[w[0]..w[1]].trim();
            (!fragment.is_empty()).then_some((w[0], fragment))
        })
        .enumerate()
        .map(|(i, (offset, fragment))| RawSection {
            label: None,
            ordinal: i + 1,
            offset,
            heading: String::new(),
            text: fragment.to_string(),
        })
        .collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("  a\r\nb\rc\n  "), "a\nb\nc");
    }

    #[test]
    fn test_segments_numbered_questions_in_order() {
        let text = "1. What is HTML?\nMarkup.\n2. What is CSS?\nStyles.\n3. What is JS?\nScripts.";
        let seg = segment(text);

        assert_eq!(seg.mode, BoundaryMode::Markers);
        assert_eq!(seg.sections.len(), 3);
        let labels: Vec<_> = seg.sections.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("1"), Some("2"), Some("3")]);
        assert_eq!(seg.sections[0].text, "1. What is HTML?\nMarkup.");
        assert_eq!(seg.sections[1].heading, "What is CSS?");
        assert_eq!(seg.sections[2].text, "3. What is JS?\nScripts.");
        assert_eq!(seg.sections[2].ordinal, 3);
    }

    #[test]
    fn test_offsets_point_at_marker_lines() {
        let text = "Intro line\n1. First question?\nYes.\n2. Second one?\nNo.";
        let seg = segment(text);

        assert_eq!(seg.sections.len(), 2);
        for section in &seg.sections {
            let at = &seg.normalized[section.offset..];
            assert!(at.starts_with(section.label.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_emphasis_wrapped_markers() {
        let text = "**1. What is SQL?**\nA query language.\n**2.** What is a join?\nCombining rows.";
        let seg = segment(text);

        assert_eq!(seg.sections.len(), 2);
        assert_eq!(seg.sections[0].heading, "What is SQL?");
        assert_eq!(seg.sections[1].heading, "What is a join?");
        assert!(seg.sections[1].text.starts_with("**2.**"));
    }

    #[test]
    fn test_crlf_input_segments_like_lf() {
        let lf = segment("1. What is a server?\nA host.\n2. What is a port?\nAn endpoint.");
        let crlf = segment("1. What is a server?\r\nA host.\r\n2. What is a port?\r\nAn endpoint.");
        assert_eq!(lf.sections, crlf.sections);
    }

    #[test]
    fn test_leading_byte_order_mark_removed() {
        assert_eq!(normalize("\u{FEFF}1. What is TCP?\r\n"), "1. What is TCP?");

        let seg = segment("\u{FEFF}1. What is TCP? A network protocol.\n2. What is UDP? A datagram protocol.");
        assert_eq!(seg.mode, BoundaryMode::Markers);
        let labels: Vec<_> = seg.sections.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("1"), Some("2")]);
        assert_eq!(seg.sections[0].offset, 0);
    }

    #[test]
    fn test_marker_content_on_next_line() {
        let seg = segment("1.\nWhat is X?\nAnswer.");
        assert_eq!(seg.mode, BoundaryMode::Markers);
        assert_eq!(seg.sections.len(), 1);
        assert_eq!(seg.sections[0].heading, "What is X?");
        assert_eq!(seg.sections[0].text, "1.\nWhat is X?\nAnswer.");
    }

    #[test]
    fn test_only_ascii_digits_form_markers() {
        // Arabic-Indic digit one.
        let seg = segment("\u{0661}. What is a server?\nA host. \u{0662}. What is a port?");
        assert_eq!(seg.mode, BoundaryMode::Fallback);
        assert_eq!(seg.sections.len(), 1);
        assert!(seg.sections[0].label.is_none());
    }

    #[test]
    fn test_nested_numbered_list_starts_new_section() {
        let text = "1. What are the steps?\nFollow these:\n2. Open the file\n3. Save it";
        let seg = segment(text);
        assert_eq!(seg.sections.len(), 3);
    }

    #[test]
    fn test_fallback_on_single_line_text() {
        let text = "Quiz 1. What is HTML? Markup. 2. What is CSS? Styles.";
        let seg = segment(text);

        assert_eq!(seg.mode, BoundaryMode::Fallback);
        assert_eq!(seg.sections.len(), 3);
        assert_eq!(seg.sections[0].text, "Quiz");
        assert_eq!(seg.sections[1].text, "1. What is HTML? Markup.");
        assert_eq!(seg.sections[2].text, "2. What is CSS? Styles.");
        assert!(seg.sections.iter().all(|s| s.label.is_none()));
        let ordinals: Vec<_> = seg.sections.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn test_fallback_splits_inside_multi_digit_numbers() {
        let seg = segment("Intro 12. What is a thread?");
        let texts: Vec<_> = seg.sections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Intro", "1", "2. What is a thread?"]);
    }

    #[test]
    fn test_plain_prose_is_one_fallback_section() {
        let seg = segment("Just some prose without any numbering at all.");
        assert_eq!(seg.mode, BoundaryMode::Fallback);
        assert_eq!(seg.sections.len(), 1);
        assert_eq!(seg.sections[0].ordinal, 1);
        assert_eq!(seg.sections[0].offset, 0);
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert!(segment("   \r\n  ").sections.is_empty());
    }
}
