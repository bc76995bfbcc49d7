#![warn(missing_docs)]

//! Design tokens and variant resolution for Apple-style interfaces.

pub use dstk_theme as theme;
#[cfg(feature = "services")]
pub use dstk_services as services;

/// A "prelude" for users of the dstk toolkit.
///
/// Importing this module brings into scope the types a markup layer needs
/// to load a design system and resolve component styles.
///
/// ```rust
/// use dstk::prelude::*;
///
/// let apple = DesignSystem::apple().unwrap();
/// let style = apple
///     .resolve(&StyleRequest::new("button").with("size", "lg"))
///     .unwrap();
/// assert_eq!(style.get("height"), Some("56px"));
/// ```
pub mod prelude {
    // Design systems
    pub use crate::theme::config::DesignSystemConfig;
    pub use crate::theme::system::DesignSystem;

    // Tokens
    pub use crate::theme::token::{TokenCategory, TokenKey, TokenRegistry, TokenValue, TypeScale};

    // Variants
    pub use crate::theme::cache::StyleCache;
    pub use crate::theme::id::ComponentId;
    pub use crate::theme::variant::{Component, Fragment, ResolverMode, VariantAxis, VariantResolver};

    // Requests and results
    pub use crate::theme::mode::ThemeMode;
    pub use crate::theme::request::{RawOverride, StyleRequest};
    pub use crate::theme::style::ResolvedStyle;

    // Errors
    pub use crate::theme::error::{ThemeError, ThemeResult};

    // Services
    #[cfg(feature = "services")]
    pub use crate::services::{
        create_shared_theme_switch, AppearanceSettings, SharedThemeSwitch, ThemePreference, ThemeSwitch,
    };
}
