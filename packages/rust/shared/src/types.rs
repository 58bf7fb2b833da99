//! Core domain types for segmented analysis documents.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DividendLensError;

/// Key of the implicit section that absorbs text before the first heading.
pub const DEFAULT_INTRO_LABEL: &str = "Introduzione";

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A titled block of an analysis document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text with markup and ordinal prefix removed.
    pub title: String,
    /// Trimmed text between this heading and the next one.
    pub body: String,
}

impl Section {
    /// Whether the body has any visible content.
    pub fn has_content(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// SectionMap
// ---------------------------------------------------------------------------

/// Ordered `title -> body` mapping, in first-activation order.
///
/// Serializes as a JSON/TOML object whose key order matches the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(IndexMap<String, String>);

impl SectionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no sections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Body of the section titled `title`.
    pub fn get(&self, title: &str) -> Option<&str> {
        self.0.get(title).map(String::as_str)
    }

    /// Mutable body of the section titled `title`.
    pub fn get_mut(&mut self, title: &str) -> Option<&mut String> {
        self.0.get_mut(title)
    }

    /// Whether a section titled `title` exists.
    pub fn contains(&self, title: &str) -> bool {
        self.0.contains_key(title)
    }

    /// Insert or replace a section body.
    ///
    /// Replacing keeps the section at its original position.
    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<String>) -> Option<String> {
        self.0.insert(title.into(), body.into())
    }

    /// Section titles in document order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(title, body)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, b)| (t.as_str(), b.as_str()))
    }

    /// Convert into owned [`Section`] values, preserving order.
    pub fn into_sections(self) -> Vec<Section> {
        self.0
            .into_iter()
            .map(|(title, body)| Section { title, body })
            .collect()
    }
}

impl FromIterator<(String, String)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// DuplicatePolicy
// ---------------------------------------------------------------------------

/// What to do when a heading cleans to a title that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reset the existing section's body (the later heading wins).
    #[default]
    Overwrite,
    /// Keep the earlier body and append the later one after a blank line.
    Append,
    /// Key later occurrences as `"Title (2)"`, `"Title (3)"`, ...
    Disambiguate,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Append => write!(f, "append"),
            Self::Disambiguate => write!(f, "disambiguate"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = DividendLensError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "append" => Ok(Self::Append),
            "disambiguate" => Ok(Self::Disambiguate),
            other => Err(DividendLensError::parse(format!(
                "unknown duplicate policy '{other}' (expected overwrite, append or disambiguate)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_map_keeps_position_on_replace() {
        let mut map = SectionMap::new();
        map.insert("A", "one");
        map.insert("B", "two");
        let previous = map.insert("A", "three");

        assert_eq!(previous.as_deref(), Some("one"));
        let titles: Vec<&str> = map.titles().collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(map.get("A"), Some("three"));
    }

    #[test]
    fn section_map_serializes_in_order() {
        let map: SectionMap = [
            ("Zeta".to_string(), "z".to_string()),
            ("Alpha".to_string(), "a".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"Zeta":"z","Alpha":"a"}"#);

        let parsed: SectionMap = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, map);
    }

    #[test]
    fn into_sections_preserves_order() {
        let mut map = SectionMap::new();
        map.insert(DEFAULT_INTRO_LABEL, "");
        map.insert("Rischi", "Tasse 2025");

        let sections = map.into_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, DEFAULT_INTRO_LABEL);
        assert!(!sections[0].has_content());
        assert!(sections[1].has_content());
    }

    #[test]
    fn duplicate_policy_parse_and_display() {
        for policy in [
            DuplicatePolicy::Overwrite,
            DuplicatePolicy::Append,
            DuplicatePolicy::Disambiguate,
        ] {
            let parsed: DuplicatePolicy = policy.to_string().parse().expect("parse");
            assert_eq!(parsed, policy);
        }
        assert_eq!(
            " Append ".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::Append
        );
        assert!("merge".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn duplicate_policy_defaults_to_overwrite() {
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Overwrite);
    }
}
