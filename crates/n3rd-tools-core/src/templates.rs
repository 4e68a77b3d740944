//! # Templates Module
//!
//! Extraction of `TriviaTemplate(...)` literal blocks from scratch batch
//! files.
//!
//! A block has a fixed shape:
//!
//! ```text
//! TriviaTemplate(
//!   categoryPattern: "...",
//!   correctPool: ["...", ...],
//!   distractorPool: ["...", ...],
//!   theme: "...",
//! )
//! ```
//!
//! Anything that does not match this shape is skipped without error.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BLOCK_PATTERN: &str = r#"(?s)TriviaTemplate\s*\(\s*categoryPattern:\s*"([^"]+)",\s*correctPool:\s*\[(.*?)\],\s*distractorPool:\s*\[(.*?)\],\s*theme:\s*"([^"]+)""#;

const ITEM_PATTERN: &str = r#""([^"]*)""#;

/// Batch files are the editor's unsaved-buffer exports.
pub const BATCH_FILE_PREFIX: &str = "Untitled-";

/// One scraped template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaTemplate {
    pub category_pattern: String,
    pub correct_pool: Vec<String>,
    pub distractor_pool: Vec<String>,
    pub theme: String,
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Compiled block and item patterns.
#[derive(Debug, Clone)]
pub struct TemplateExtractor {
    block: Regex,
    item: Regex,
}

impl TemplateExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            block: Regex::new(BLOCK_PATTERN)?,
            item: Regex::new(ITEM_PATTERN)?,
        })
    }

    /// All well-formed blocks in `content`, in order of appearance.
    #[must_use]
    pub fn extract(&self, content: &str) -> Vec<TriviaTemplate> {
        self.block
            .captures_iter(content)
            .map(|caps| TriviaTemplate {
                category_pattern: caps[1].to_string(),
                correct_pool: self.pool_items(&caps[2]),
                distractor_pool: self.pool_items(&caps[3]),
                theme: caps[4].to_string(),
            })
            .collect()
    }

    // `""` has to match as one literal, or its closing quote opens the next item.
    fn pool_items(&self, array_body: &str) -> Vec<String> {
        self.item
            .captures_iter(array_body)
            .map(|caps| caps[1].trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Whether a file name looks like a template batch file.
#[must_use]
pub fn is_batch_file(file_name: &str) -> bool {
    file_name.starts_with(BATCH_FILE_PREFIX)
}

// =============================================================================
// CATALOG
// =============================================================================

/// Templates grouped by theme. Themes iterate sorted; templates keep the
/// order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateCatalog {
    by_theme: BTreeMap<String, Vec<TriviaTemplate>>,
}

impl TemplateCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, template: TriviaTemplate) {
        self.by_theme
            .entry(template.theme.clone())
            .or_default()
            .push(template);
    }

    pub fn add_all(&mut self, templates: impl IntoIterator<Item = TriviaTemplate>) {
        for template in templates {
            self.add(template);
        }
    }

    /// `(theme, templates)` pairs in theme order.
    pub fn themes(&self) -> impl Iterator<Item = (&str, &[TriviaTemplate])> {
        self.by_theme
            .iter()
            .map(|(theme, templates)| (theme.as_str(), templates.as_slice()))
    }

    #[must_use]
    pub fn theme_count(&self) -> usize {
        self.by_theme.len()
    }

    #[must_use]
    pub fn template_count(&self) -> usize {
        self.by_theme.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_theme.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ONE_BLOCK: &str = r#"
let templates = [
    TriviaTemplate(
        categoryPattern: "Capital of {country}",
        correctPool: ["Paris", "Berlin"],
        distractorPool: ["Lyon", "Munich", "Hamburg"],
        theme: "geography",
    ),
]
"#;

    #[test]
    fn extracts_single_block_with_four_fields() {
        let extractor = TemplateExtractor::new().unwrap();
        let templates = extractor.extract(ONE_BLOCK);

        assert_eq!(templates.len(), 1);
        let t = &templates[0];
        assert_eq!(t.category_pattern, "Capital of {country}");
        assert_eq!(t.correct_pool, vec!["Paris", "Berlin"]);
        assert_eq!(t.distractor_pool, vec!["Lyon", "Munich", "Hamburg"]);
        assert_eq!(t.theme, "geography");
    }

    #[test]
    fn multiline_pools_and_multiple_blocks() {
        let content = r#"
TriviaTemplate(categoryPattern: "a", correctPool: [
    "x",
    "y"
], distractorPool: [
    "z"
], theme: "history")
noise here
TriviaTemplate ( categoryPattern: "b", correctPool: [" spaced "], distractorPool: [], theme: "science" )
"#;
        let templates = TemplateExtractor::new().unwrap().extract(content);
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].correct_pool, vec!["x", "y"]);
        assert_eq!(templates[0].distractor_pool, vec!["z"]);
        assert_eq!(templates[1].correct_pool, vec!["spaced"]);
        assert!(templates[1].distractor_pool.is_empty());
        assert_eq!(templates[1].theme, "science");
    }

    #[test]
    fn malformed_blocks_are_skipped() {
        let content = r#"
TriviaTemplate(categoryPattern: "missing theme", correctPool: ["a"], distractorPool: ["b"])
TriviaTemplate(theme: "x", categoryPattern: "wrong order", correctPool: [], distractorPool: [])
"#;
        let templates = TemplateExtractor::new().unwrap().extract(content);
        assert!(templates.is_empty());
    }

    #[test]
    fn empty_strings_are_not_pool_items() {
        let content = r#"TriviaTemplate(categoryPattern: "c", correctPool: ["", "kept"], distractorPool: ["d"], theme: "t")"#;
        let templates = TemplateExtractor::new().unwrap().extract(content);
        assert_eq!(templates[0].correct_pool, vec!["kept"]);
    }

    #[test]
    fn catalog_groups_by_sorted_theme() {
        let mut catalog = TemplateCatalog::new();
        let make = |cat: &str, theme: &str| TriviaTemplate {
            category_pattern: cat.to_string(),
            correct_pool: vec![],
            distractor_pool: vec![],
            theme: theme.to_string(),
        };
        catalog.add_all([
            make("s1", "science"),
            make("a1", "arts"),
            make("s2", "science"),
        ]);

        assert_eq!(catalog.theme_count(), 2);
        assert_eq!(catalog.template_count(), 3);
        let themes: Vec<(&str, usize)> = catalog.themes().map(|(t, v)| (t, v.len())).collect();
        assert_eq!(themes, vec![("arts", 1), ("science", 2)]);
        let science: Vec<&str> = catalog
            .themes()
            .find(|(t, _)| *t == "science")
            .map(|(_, v)| v.iter().map(|t| t.category_pattern.as_str()).collect())
            .unwrap();
        assert_eq!(science, vec!["s1", "s2"]);
    }

    #[test]
    fn batch_file_names() {
        assert!(is_batch_file("Untitled-1.swift"));
        assert!(is_batch_file("Untitled-12"));
        assert!(!is_batch_file("untitled-1.dart"));
        assert!(!is_batch_file("templates.dart"));
    }
}
