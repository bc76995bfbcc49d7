//! Style requests: the per-call input to the variant resolver.

use std::collections::BTreeMap;

use crate::id::ComponentId;
use crate::mode::ThemeMode;

/// Caller-supplied declarations appended after every variant fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawOverride {
    /// Ordered key/value pairs.
    Pairs(Vec<(String, String)>),
    /// Opaque declaration text, `"key: value; key: value"`.
    Declarations(String),
}

impl RawOverride {
    /// Build an override from ordered pairs.
    pub fn pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        RawOverride::Pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Build an override from declaration text.
    pub fn declarations(text: impl Into<String>) -> Self {
        RawOverride::Declarations(text.into())
    }

    /// The override as ordered pairs.
    ///
    /// Declaration text is split on top-level `;` and each part on its first `:`.
    /// A `;` inside parentheses or quotes belongs to the value. Empty parts are
    /// skipped; parts with no `:` or an empty key are dropped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        match self {
            RawOverride::Pairs(pairs) => pairs.clone(),
            RawOverride::Declarations(text) => split_declarations(text)
                .into_iter()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .filter_map(|part| match part.split_once(':') {
                    Some((key, value)) if !key.trim().is_empty() => {
                        Some((key.trim().to_string(), value.trim().to_string()))
                    },
                    _ => {
                        log::debug!("Skipping malformed override declaration '{}'", part);
                        None
                    },
                })
                .collect(),
        }
    }
}

/// Split declaration text on `;` outside parentheses and quoted strings.
fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    parts.push(&text[start..]);
    parts
}

impl From<Vec<(String, String)>> for RawOverride {
    fn from(pairs: Vec<(String, String)>) -> Self {
        RawOverride::Pairs(pairs)
    }
}

impl From<&str> for RawOverride {
    fn from(text: &str) -> Self {
        RawOverride::declarations(text)
    }
}

/// Everything needed to resolve one component's final attributes.
///
/// Axis values are kept sorted by axis name so equal requests hash and
/// compare equal regardless of the order they were built in.
///
/// ```rust
/// use dstk_theme::request::StyleRequest;
/// use dstk_theme::mode::ThemeMode;
///
/// let request = StyleRequest::new("button")
///     .with("variant", "filled")
///     .with("size", "sm")
///     .with_override([("background", "red-500")])
///     .with_theme(ThemeMode::Dark);
///
/// assert_eq!(request.axis_value("size"), Some("sm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRequest {
    /// The component to resolve.
    pub component: ComponentId,
    /// Chosen value per axis name.
    pub axis_values: BTreeMap<String, String>,
    /// Declarations appended last.
    pub raw_override: Option<RawOverride>,
    /// Snapshot of the theme mode.
    pub theme: ThemeMode,
}

impl StyleRequest {
    /// A request for a component with every axis at its default, in light mode.
    pub fn new(component: impl Into<ComponentId>) -> Self {
        Self {
            component: component.into(),
            axis_values: BTreeMap::new(),
            raw_override: None,
            theme: ThemeMode::default(),
        }
    }

    /// Choose a value for an axis.
    pub fn with(mut self, axis: impl Into<String>, value: impl Into<String>) -> Self {
        self.axis_values.insert(axis.into(), value.into());
        self
    }

    /// Set the override from ordered pairs.
    pub fn with_override<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.raw_override = Some(RawOverride::pairs(pairs));
        self
    }

    /// Set the override from any [RawOverride] form.
    pub fn with_raw_override(mut self, raw: impl Into<RawOverride>) -> Self {
        self.raw_override = Some(raw.into());
        self
    }

    /// Set the theme snapshot.
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// The caller-supplied value for an axis, if any.
    pub fn axis_value(&self, axis: &str) -> Option<&str> {
        self.axis_values.get(axis).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_text_is_split_in_order() {
        let raw = RawOverride::declarations("background: red-500; color:white ;; width: calc(100% - 8px)");
        assert_eq!(
            raw.to_pairs(),
            vec![
                ("background".to_string(), "red-500".to_string()),
                ("color".to_string(), "white".to_string()),
                ("width".to_string(), "calc(100% - 8px)".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let raw = RawOverride::declarations("background-image: url(https://example.com/a.png)");
        assert_eq!(raw.to_pairs()[0].1, "url(https://example.com/a.png)");
    }

    #[test]
    fn test_semicolons_inside_values_are_kept() {
        let raw = RawOverride::declarations(
            "background-image: url(data:image/png;base64,AAAA); content: \"a;b\"; color: red",
        );
        assert_eq!(
            raw.to_pairs(),
            vec![
                (
                    "background-image".to_string(),
                    "url(data:image/png;base64,AAAA)".to_string()
                ),
                ("content".to_string(), "\"a;b\"".to_string()),
                ("color".to_string(), "red".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_declarations_are_dropped() {
        let raw = RawOverride::declarations("oops; : nothing; color: blue");
        assert_eq!(raw.to_pairs(), vec![("color".to_string(), "blue".to_string())]);
    }

    #[test]
    fn test_requests_compare_independent_of_build_order() {
        let a = StyleRequest::new("button").with("variant", "tinted").with("size", "lg");
        let b = StyleRequest::new("button").with("size", "lg").with("variant", "tinted");
        assert_eq!(a, b);
    }
}
