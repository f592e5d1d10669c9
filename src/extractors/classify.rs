// src/extractors/classify.rs
//
// Keyword rules for filing a question. Every rule is a plain substring test on the
// lower-cased question and answer, so "java" also fires on "javascript".

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    Programming,
    Database,
    Networking,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::Programming => "Programming",
            Category::Database => "Database",
            Category::Networking => "Networking",
            Category::ComputerScience => "Computer Science",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

// Checked top to bottom; the first rule with a matching keyword wins.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["html", "css", "javascript"], Category::WebDevelopment),
    (&["python", "java", "programming"], Category::Programming),
    (&["database", "sql"], Category::Database),
    (&["network", "server"], Category::Networking),
    (&["algorithm", "data structure"], Category::ComputerScience),
];

const ADVANCED_KEYWORDS: &[&str] = &["optimization", "performance", "architecture", "advanced", "complex"];
const INTERMEDIATE_KEYWORDS: &[&str] = &["implementation", "design pattern", "framework", "integration"];

const TECH_KEYWORDS: &[&str] = &[
    "html", "css", "javascript", "python", "java", "sql", "react", "node", "angular", "vue",
];
const CONCEPT_KEYWORDS: &[&str] = &["semantic", "responsive", "accessibility", "seo", "performance", "security"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn determine_category(content: &str) -> Category {
    let lower = content.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| contains_any(&lower, keywords))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

pub fn determine_difficulty(content: &str) -> Difficulty {
    let lower = content.to_lowercase();
    if contains_any(&lower, ADVANCED_KEYWORDS) {
        Difficulty::Advanced
    } else if contains_any(&lower, INTERMEDIATE_KEYWORDS) {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}

/// Technology tags come first, upper-cased, then concept tags, capitalized. Order follows
/// the keyword lists rather than the text.
pub fn extract_tags(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();

    let tech = TECH_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| kw.to_uppercase());

    let concepts = CONCEPT_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| capitalize(kw));

    tech.chain(concepts).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
