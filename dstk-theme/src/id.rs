//! # Component Identifiers
//!
//! A [ComponentId] names a component *type* (`"button"`, `"card-title"`),
//! never an individual rendered element. Resolvers key their declarations by
//! it and every component-related error carries one.
//!
//! ```rust
//! use dstk_theme::id::ComponentId;
//!
//! let button = ComponentId::new("button");
//! assert_eq!(button.as_str(), "button");
//! assert_eq!(button, ComponentId::from("button"));
//! ```

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// An identifier for a component type in the design system.
///
/// Ids are compared, hashed and ordered by their string value, so two ids
/// built from the same text are interchangeable.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new component id.
    ///
    /// ```
    /// let id = dstk_theme::id::ComponentId::new("card-header");
    /// ```
    pub fn new(id: impl ToString) -> Self {
        Self(id.to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ComponentId> for ComponentId {
    fn from(id: &ComponentId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
