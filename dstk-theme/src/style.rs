//! # Resolved Styles
//!
//! A [ResolvedStyle] is the final, deduplicated attribute list handed to the
//! markup layer. It is produced by folding an ordered stream of
//! `(attribute, value)` pairs with cascade semantics: the last occurrence of a
//! key decides its value, while the key keeps the position where it was first
//! seen.
//!
//! ```rust
//! use dstk_theme::style::ResolvedStyle;
//!
//! let style = ResolvedStyle::from_pairs([
//!     ("background", "blue-500"),
//!     ("color", "white"),
//!     ("background", "red-500"),
//! ]);
//!
//! assert_eq!(style.get("background"), Some("red-500"));
//! assert_eq!(style.keys().collect::<Vec<_>>(), ["background", "color"]);
//! assert_eq!(style.to_declarations(), "background: red-500; color: white");
//! ```

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

/// An ordered attribute set with last-write-wins values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    map: IndexMap<String, String>,
}

impl ResolvedStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self {
            map: IndexMap::with_capacity(16),
        }
    }

    /// Fold pairs in order using cascade semantics.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut style = Self::new();
        for (key, value) in pairs {
            style.apply(key, value);
        }
        style
    }

    /// Apply one declaration.
    ///
    /// A new key is appended; an existing key keeps its position and takes
    /// the new value.
    pub fn apply(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    /// Apply every pair in order.
    pub fn extend<'a>(&mut self, pairs: impl IntoIterator<Item = &'a (String, String)>) {
        for (key, value) in pairs {
            self.apply(key.as_str(), value.as_str());
        }
    }

    /// Get the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Check if an attribute is set.
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Iterate attributes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate attribute keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Consume the style into its ordered pairs.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.map.into_iter().collect()
    }

    /// Render as `key: value` declarations separated by `"; "`.
    pub fn to_declarations(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Display for ResolvedStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_declarations())
    }
}

impl<'a> IntoIterator for &'a ResolvedStyle {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_first_seen_order() {
        let style = ResolvedStyle::from_pairs([
            ("height", "44px"),
            ("color", "white"),
            ("height", "36px"),
            ("border", "none"),
            ("color", "black"),
        ]);

        assert_eq!(
            style.clone().into_pairs(),
            vec![
                ("height".to_string(), "36px".to_string()),
                ("color".to_string(), "black".to_string()),
                ("border".to_string(), "none".to_string()),
            ]
        );
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn test_empty_style() {
        let style = ResolvedStyle::new();
        assert!(style.is_empty());
        assert_eq!(style.to_declarations(), "");
        assert_eq!(style.get("color"), None);
    }

    #[test]
    fn test_display_matches_declarations() {
        let style = ResolvedStyle::from_pairs([("padding", "24px"), ("padding-top", "0")]);
        assert_eq!(style.to_string(), "padding: 24px; padding-top: 0");
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let style = ResolvedStyle::from_pairs([("z", "1"), ("a", "2")]);
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }
}
