// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::classify::{determine_category, determine_difficulty, extract_tags, Category, Difficulty};
use super::segmenter::RawSection;

// --- Constants ---
pub const DEFAULT_MIN_QUESTION_CHARS: usize = 5;
pub const DEFAULT_MIN_ANSWER_CHARS: usize = 3;
const DEFAULT_SUBCATEGORY: &str = "General";
const UNSEPARATED_ANSWER: &str = "Answer could not be separated from question.";

// --- Regex Patterns for Text Cleanup (Lazy Static) ---
static NUMBER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\*{0,2}[0-9]+\.\s*\*{0,2}").expect("Failed to compile NUMBER_PREFIX_RE")
});

static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*").expect("Failed to compile BOLD_RE")
});

static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`").expect("Failed to compile INLINE_CODE_RE")
});

// --- Regex Patterns for Question/Answer Splitting (Lazy Static) ---
// Bullets are `*` (markdown) or `•` (what PDF text extraction usually emits).

// Question ending in `?`, then a bullet-marked line. `.+` runs to the end of the text.
static QUESTION_WITH_BULLETS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A(.*?\?)\s*([*•].+)").expect("Failed to compile QUESTION_WITH_BULLETS_RE")
});

// The first marker may be a run: an unmatched closing `**` right after the `?`
// reads as the first bullet.
static BULLET_ITEM_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\s*[*•]+[ \t]*|\n\s*[*•]\s*").expect("Failed to compile BULLET_ITEM_SPLIT_RE")
});

static QUESTION_MARK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A(.*?\?)\s*(.+)").expect("Failed to compile QUESTION_MARK_RE")
});

static LEADING_BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[*•]\s*").expect("Failed to compile LEADING_BULLET_RE")
});

static INNER_BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*[*•]\s*").expect("Failed to compile INNER_BULLET_RE")
});

static TRAILING_PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s*\z").expect("Failed to compile TRAILING_PERIOD_RE")
});

// One pattern per interrogative, in priority order. Plain substring match, so "how"
// also fires inside "show".
static QUESTION_WORD_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ["what", "how", "why", "when", "where", "which", "who"]
        .iter()
        .filter_map(|word| {
            Regex::new(&format!(r"(?is)\A(.*?{word}[^.?!]*[.?!])\s*(.+)"))
                .ok()
                .map(|re| (*word, re))
        })
        .collect()
});

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("Failed to compile SENTENCE_END_RE")
});

// --- Data Structures ---

/// Minimum lengths, in characters, a section must reach to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub min_question_chars: usize,
    pub min_answer_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_question_chars: DEFAULT_MIN_QUESTION_CHARS,
            min_answer_chars: DEFAULT_MIN_ANSWER_CHARS,
        }
    }
}

/// One classified question/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuestion {
    pub question: String,
    pub answer: String,
    pub category: Category,
    pub subcategory: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    /// Reserved for multiple-choice questions; never populated.
    pub options: Option<Vec<String>>,
}

/// A question/answer pair produced by one splitting strategy, before entity decoding
/// and length checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaSplit {
    pub question: String,
    pub answer: String,
}

impl QaSplit {
    fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// --- Splitting Strategies ---

pub trait SplitStrategy: Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when this strategy does not recognise the layout of `content`.
    fn split(&self, content: &str) -> Option<QaSplit>;
}

/// "Question?" followed by a bullet list; the bullets become the answer.
pub struct BulletListStrategy;

impl SplitStrategy for BulletListStrategy {
    fn name(&self) -> &'static str {
        "question with bullet points"
    }

    fn split(&self, content: &str) -> Option<QaSplit> {
        let caps = QUESTION_WITH_BULLETS_RE.captures(content)?;
        let question = caps.get(1)?.as_str().trim();

        let items: Vec<&str> = BULLET_ITEM_SPLIT_RE
            .split(caps.get(2)?.as_str())
            .map(str::trim)
            .filter(|item| !item.chars().all(|c| c == '*'))
            .collect();
        let joined = items.join(". ");
        let answer = TRAILING_PERIOD_RE.replace(&joined, "");

        Some(QaSplit::new(question, answer.trim()))
    }
}

/// Everything up to the first `?` is the question, the rest is the answer.
pub struct QuestionMarkStrategy;

impl SplitStrategy for QuestionMarkStrategy {
    fn name(&self) -> &'static str {
        "question mark separator"
    }

    fn split(&self, content: &str) -> Option<QaSplit> {
        let caps = QUESTION_MARK_RE.captures(content)?;
        let question = caps.get(1)?.as_str().trim();

        let answer = caps.get(2)?.as_str().trim();
        let answer = LEADING_BULLET_RE.replace(answer, "");
        let answer = INNER_BULLET_RE.replace_all(&answer, ". ");

        Some(QaSplit::new(question, answer.trim()))
    }
}

/// Splits after the first sentence containing an interrogative word.
pub struct QuestionWordStrategy;

impl SplitStrategy for QuestionWordStrategy {
    fn name(&self) -> &'static str {
        "question word"
    }

    fn split(&self, content: &str) -> Option<QaSplit> {
        QUESTION_WORD_RES.iter().find_map(|(word, re)| {
            let caps = re.captures(content)?;
            let answer = caps.get(2)?.as_str().trim();
            if answer.is_empty() {
                return None;
            }
            tracing::trace!("Split after question word '{}'", word);
            Some(QaSplit::new(caps.get(1)?.as_str().trim(), answer))
        })
    }
}

/// First sentence is the question. Always succeeds, so it goes last.
pub struct SentenceFallbackStrategy;

impl SplitStrategy for SentenceFallbackStrategy {
    fn name(&self) -> &'static str {
        "first sentence fallback"
    }

    fn split(&self, content: &str) -> Option<QaSplit> {
        let sentences = split_sentences(content);
        match sentences.split_first() {
            Some((first, rest)) if !rest.is_empty() => {
                Some(QaSplit::new(first.trim(), rest.join(" ").trim()))
            }
            _ => Some(QaSplit::new(content, UNSEPARATED_ANSWER)),
        }
    }
}

/// Strategies in priority order; the first to return a split wins.
pub static SPLIT_STRATEGIES: &[&dyn SplitStrategy] = &[
    &BulletListStrategy,
    &QuestionMarkStrategy,
    &QuestionWordStrategy,
    &SentenceFallbackStrategy,
];

// --- Section Parsing ---

/// Turns one raw section into a classified question, or `None` if the section does
/// not yield a long enough question and answer.
pub fn parse_section(section: &RawSection, config: &ParserConfig) -> Option<ParsedQuestion> {
    let content = clean_markup(&section.text);

    let (strategy, split) = SPLIT_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.split(&content).map(|split| (strategy.name(), split)))?;
    tracing::trace!("Section {} split by {}", section.ordinal, strategy);

    let question = decode_entities(&split.question);
    let answer = decode_entities(&split.answer);

    let question_len = question.chars().count();
    if question_len < config.min_question_chars {
        tracing::debug!("Dropping section {}: question too short ({} chars)", section.ordinal, question_len);
        return None;
    }

    let answer_len = answer.chars().count();
    if answer_len < config.min_answer_chars {
        tracing::debug!("Dropping section {}: answer too short ({} chars)", section.ordinal, answer_len);
        return None;
    }

    let combined = format!("{} {}", question, answer);

    Some(ParsedQuestion {
        category: determine_category(&combined),
        difficulty: determine_difficulty(&combined),
        tags: extract_tags(&combined),
        question,
        answer,
        subcategory: DEFAULT_SUBCATEGORY.to_string(),
        options: None,
    })
}

/// Removes the leading number marker, bold emphasis and inline code backticks.
fn clean_markup(text: &str) -> String {
    let content = NUMBER_PREFIX_RE.replace(text, "");
    let content = BOLD_RE.replace_all(&content, "$1");
    let content = INLINE_CODE_RE.replace_all(&content, "$1");
    content.trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

/// Splits after each `.`, `!` or `?` that is followed by whitespace. The punctuation
/// stays with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        // The punctuation is a single ASCII byte.
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}
