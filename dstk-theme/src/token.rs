//! # Token Registry
//!
//! Design tokens are the named primitives a design system is built from:
//! color ramps, the type scale, spacing units, radii, shadows, motion curves
//! and stacking levels. Each token is addressed by a [TokenKey], a
//! `(category, name, weight?)` triple, where the weight indexes ramps such as
//! `color.apple-blue` at `50..900`.
//!
//! The [TokenRegistry] is populated once and then sealed. Sealing happens
//! explicitly through [TokenRegistry::seal] or implicitly on the first
//! [TokenRegistry::resolve]; after that every [TokenRegistry::register] call
//! fails with [ThemeError::RegistryClosed].
//!
//! ```rust
//! use dstk_theme::token::{TokenCategory, TokenKey, TokenRegistry, TokenValue};
//!
//! let mut tokens = TokenRegistry::new();
//! tokens
//!     .register(TokenKey::weighted(TokenCategory::Color, "apple-blue", 500), "#007aff")
//!     .unwrap();
//! tokens.seal();
//!
//! let blue = tokens.resolve(&TokenKey::weighted(TokenCategory::Color, "apple-blue", 500));
//! assert_eq!(blue.unwrap(), &TokenValue::from("#007aff"));
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};

/// The kind of design primitive a token holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenCategory {
    /// Color literals (`#007aff`).
    Color,
    /// Structured text styles, see [TypeScale].
    TypeScale,
    /// Spacing units.
    Spacing,
    /// Corner radii.
    Radius,
    /// Box shadows.
    Shadow,
    /// Transition durations.
    Duration,
    /// Easing curves.
    Easing,
    /// Stacking levels.
    ZIndex,
    /// Content widths.
    Width,
    /// Font stacks.
    FontFamily,
    /// Named font weights.
    FontWeight,
    /// Backdrop blur radii.
    Blur,
    /// Animation shorthands.
    Animation,
}

impl TokenCategory {
    /// Every category, in declaration order.
    pub const ALL: [TokenCategory; 13] = [
        TokenCategory::Color,
        TokenCategory::TypeScale,
        TokenCategory::Spacing,
        TokenCategory::Radius,
        TokenCategory::Shadow,
        TokenCategory::Duration,
        TokenCategory::Easing,
        TokenCategory::ZIndex,
        TokenCategory::Width,
        TokenCategory::FontFamily,
        TokenCategory::FontWeight,
        TokenCategory::Blur,
        TokenCategory::Animation,
    ];

    /// The kebab-case name used in configuration files and references.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::TypeScale => "type-scale",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Radius => "radius",
            TokenCategory::Shadow => "shadow",
            TokenCategory::Duration => "duration",
            TokenCategory::Easing => "easing",
            TokenCategory::ZIndex => "z-index",
            TokenCategory::Width => "width",
            TokenCategory::FontFamily => "font-family",
            TokenCategory::FontWeight => "font-weight",
            TokenCategory::Blur => "blur",
            TokenCategory::Animation => "animation",
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown token category '{}'", s))
    }
}

/// The identity of a token: `(category, name, weight?)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenKey {
    /// The token category.
    pub category: TokenCategory,
    /// The token name within its category.
    pub name: String,
    /// The optional ramp weight.
    pub weight: Option<u16>,
}

impl TokenKey {
    /// A key without a weight.
    pub fn new(category: TokenCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            weight: None,
        }
    }

    /// A key addressing one weight of a ramp.
    pub fn weighted(category: TokenCategory, name: impl Into<String>, weight: u16) -> Self {
        Self {
            category,
            name: name.into(),
            weight: Some(weight),
        }
    }

    /// Parse a `"<category>.<name>"` reference and attach an optional weight.
    ///
    /// The split happens at the first dot, so names may contain dots
    /// themselves (`spacing.4.5`).
    pub fn parse(reference: &str, weight: Option<u16>) -> ThemeResult<Self> {
        let invalid = |reason: String| ThemeError::InvalidTokenRef {
            reference: reference.to_string(),
            reason,
        };

        let (category, name) = reference
            .split_once('.')
            .ok_or_else(|| invalid("expected '<category>.<name>'".to_string()))?;
        if name.is_empty() {
            return Err(invalid("token name is empty".to_string()));
        }
        let category = category.parse::<TokenCategory>().map_err(invalid)?;

        Ok(Self {
            category,
            name: name.to_string(),
            weight,
        })
    }
}

impl Display for TokenKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.weight {
            Some(weight) => write!(f, "{}.{}[{}]", self.category, self.name, weight),
            None => write!(f, "{}.{}", self.category, self.name),
        }
    }
}

/// A structured type-scale entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScale {
    /// Font size (`17px`).
    pub size: String,
    /// Line height (`22px`).
    pub line_height: String,
    /// Letter spacing (`-0.024em`).
    pub letter_spacing: String,
    /// Font weight (`600`).
    pub weight: String,
}

impl TypeScale {
    /// The attribute pairs a type-scale entry expands to inside a fragment.
    pub fn declarations(&self) -> [(&'static str, &str); 4] {
        [
            ("font-size", self.size.as_str()),
            ("line-height", self.line_height.as_str()),
            ("letter-spacing", self.letter_spacing.as_str()),
            ("font-weight", self.weight.as_str()),
        ]
    }
}

/// The value held by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A literal, usually with a unit (`10px`, `#007aff`, `200ms`).
    Literal(String),
    /// A bare number (`z-index` levels, font weights).
    Number(f64),
    /// A structured type-scale record.
    TypeScale(TypeScale),
}

impl TokenValue {
    /// The value as a single attribute literal, or [None] for structured values.
    pub fn as_literal(&self) -> Option<String> {
        match self {
            TokenValue::Literal(value) => Some(value.clone()),
            TokenValue::Number(value) => Some(value.to_string()),
            TokenValue::TypeScale(_) => None,
        }
    }

    /// The type-scale record, if this is one.
    pub fn as_type_scale(&self) -> Option<&TypeScale> {
        match self {
            TokenValue::TypeScale(scale) => Some(scale),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Literal(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Literal(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

impl From<TypeScale> for TokenValue {
    fn from(value: TypeScale) -> Self {
        TokenValue::TypeScale(value)
    }
}

/// The canonical, immutable-once-sealed set of design tokens.
///
/// Lookups are exact: a missing weight never falls back to a neighbouring
/// weight of the same ramp.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: IndexMap<TokenKey, TokenValue>,
    sealed: AtomicBool,
}

impl TokenRegistry {
    /// Create an empty, open registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token.
    ///
    /// Fails with [ThemeError::DuplicateToken] if the key already exists and
    /// with [ThemeError::RegistryClosed] once the registry is sealed.
    pub fn register(&mut self, key: TokenKey, value: impl Into<TokenValue>) -> ThemeResult<()> {
        if *self.sealed.get_mut() {
            return Err(ThemeError::RegistryClosed {
                registry: "token registry",
            });
        }
        if self.tokens.contains_key(&key) {
            return Err(ThemeError::DuplicateToken { key });
        }
        self.tokens.insert(key, value.into());
        Ok(())
    }

    /// Resolve a token by its exact key.
    ///
    /// The first call seals the registry.
    pub fn resolve(&self, key: &TokenKey) -> ThemeResult<&TokenValue> {
        self.sealed.store(true, Ordering::Release);
        self.tokens
            .get(key)
            .ok_or_else(|| ThemeError::UnknownToken { key: key.clone() })
    }

    /// Seal the registry; further registrations fail.
    pub fn seal(&mut self) {
        *self.sealed.get_mut() = true;
    }

    /// Whether the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Whether a token with this key exists.
    pub fn contains(&self, key: &TokenKey) -> bool {
        self.tokens.contains_key(key)
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token has been registered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate all tokens in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&TokenKey, &TokenValue)> {
        self.tokens.iter()
    }

    /// The registered weights of a ramp, ascending.
    pub fn weights(&self, category: TokenCategory, name: &str) -> Vec<u16> {
        let mut weights: Vec<u16> = self
            .tokens
            .keys()
            .filter(|key| key.category == category && key.name == name)
            .filter_map(|key| key.weight)
            .collect();
        weights.sort_unstable();
        weights
    }
}
