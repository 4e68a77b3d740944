//! # Organize Module
//!
//! Filename -> category lookup for sorting exported animation clips into
//! per-screen folders.

use crate::error::{Result, ToolError};
use serde::Serialize;
use std::collections::BTreeSet;

/// Built-in table for the wallpaper export, in copy order.
const DEFAULT_MAPPINGS: [(&str, &str); 11] = [
    ("first loading.mp4", "logo"),
    ("2nd loading.mp4", "onboarding"),
    ("title screen.mp4", "title"),
    ("mode selection screen.mp4", "mode_selection"),
    ("mode selection.mp4", "mode_selection"),
    ("stat screen.mp4", "stats"),
    ("setting screen.mp4", "settings"),
    ("word of the day.mp4", "word_of_day"),
    ("8.mp4", "shared"),
    ("10.mp4", "shared"),
    ("11.mp4", "shared"),
];

/// One file and the category folder it belongs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub file_name: String,
    pub category: String,
}

/// Ordered filename -> category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationMapping {
    entries: Vec<MappingEntry>,
}

impl Default for AnimationMapping {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MAPPINGS
                .iter()
                .map(|(file, category)| MappingEntry {
                    file_name: (*file).to_string(),
                    category: (*category).to_string(),
                })
                .collect(),
        }
    }
}

impl AnimationMapping {
    /// Parse a JSON object of `"file name": "category"` pairs.
    ///
    /// Key order is kept. Names must be plain file / folder names.
    pub fn from_json(text: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).map_err(|e| ToolError::Mapping(e.to_string()))?;

        let mut entries = Vec::with_capacity(object.len());
        for (file_name, value) in object {
            let category = value.as_str().ok_or_else(|| {
                ToolError::Mapping(format!("category for '{file_name}' is not a string"))
            })?;
            validate_component(&file_name)?;
            validate_component(category)?;
            entries.push(MappingEntry {
                file_name,
                category: category.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// Entries in copy order.
    #[must_use]
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Distinct category names, sorted.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_component(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ToolError::Mapping("empty name".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ToolError::Mapping(format!(
            "'{name}' must be a plain name, not a path"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_table_keeps_order() {
        let mapping = AnimationMapping::default();
        assert_eq!(mapping.len(), 11);
        assert_eq!(mapping.entries()[0].file_name, "first loading.mp4");
        assert_eq!(mapping.entries()[0].category, "logo");
        assert_eq!(mapping.entries()[10].file_name, "11.mp4");
    }

    #[test]
    fn categories_are_distinct() {
        let mapping = AnimationMapping::default();
        let categories = mapping.categories();
        assert_eq!(categories.len(), 8);
        assert!(categories.contains("shared"));
        assert!(categories.contains("mode_selection"));
    }

    #[test]
    fn json_mapping_preserves_key_order() {
        let mapping =
            AnimationMapping::from_json(r#"{"z.mp4": "zeta", "a.mp4": "alpha"}"#).unwrap();
        let names: Vec<&str> = mapping
            .entries()
            .iter()
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["z.mp4", "a.mp4"]);
    }

    #[test]
    fn empty_json_mapping_is_empty() {
        let mapping = AnimationMapping::from_json("{}").unwrap();
        assert!(mapping.is_empty());
        assert!(mapping.categories().is_empty());
        assert!(!AnimationMapping::default().is_empty());
    }

    #[test]
    fn json_mapping_rejects_bad_input() {
        assert!(matches!(
            AnimationMapping::from_json("[1, 2]"),
            Err(ToolError::Mapping(_))
        ));
        assert!(AnimationMapping::from_json(r#"{"a.mp4": 3}"#).is_err());
        assert!(AnimationMapping::from_json(r#"{"a.mp4": "../escape"}"#).is_err());
        assert!(AnimationMapping::from_json(r#"{"": "logo"}"#).is_err());
    }
}
