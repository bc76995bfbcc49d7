//! # Design Systems
//!
//! A [DesignSystem] bundles a sealed [TokenRegistry] with a sealed
//! [VariantResolver] whose fragments were built from that registry. It is the
//! usual entry point: load one at startup, then resolve requests against it
//! for the rest of the process.
//!
//! ```rust
//! use dstk_theme::request::StyleRequest;
//! use dstk_theme::system::DesignSystem;
//!
//! let apple = DesignSystem::apple().unwrap();
//! let style = apple
//!     .resolve(&StyleRequest::new("button").with("variant", "destructive"))
//!     .unwrap();
//! assert_eq!(style.get("background-color"), Some("#ff3b30"));
//! ```
//!
//! ## Environment
//!
//! [DesignSystem::from_env_or_default] reads `DSTK_DESIGN_SYSTEM`, which may
//! name a built-in design system (`apple`) or point at a `.toml` file. When
//! the variable is unset the built-in `apple` system is used.

use std::env;
use std::path::Path;

use crate::config::DesignSystemConfig;
use crate::error::{ThemeError, ThemeResult};
use crate::request::StyleRequest;
use crate::style::ResolvedStyle;
use crate::token::TokenRegistry;
use crate::variant::{Component, VariantAxis, VariantResolver};

/// Environment variable selecting the design system.
pub const DESIGN_SYSTEM_ENV: &str = "DSTK_DESIGN_SYSTEM";

static BUILTINS: [(&str, &str); 1] = [("apple", include_str!("../assets/apple.toml"))];

/// A loaded design system: tokens plus component tables, both sealed.
#[derive(Debug)]
pub struct DesignSystem {
    name: String,
    tokens: TokenRegistry,
    variants: VariantResolver,
}

impl DesignSystem {
    /// Build a design system from a parsed configuration.
    ///
    /// Registers every token, seals the registry, resolves every fragment
    /// against it and declares every component. The first broken declaration
    /// aborts the build.
    pub fn from_config(config: DesignSystemConfig) -> ThemeResult<Self> {
        let mut tokens = TokenRegistry::new();
        for decl in config.tokens {
            tokens.register(decl.key, decl.value)?;
        }
        tokens.seal();

        let mut variants = VariantResolver::with_mode(config.mode);
        for decl in config.components {
            let mut component = Component::new().base(decl.base.resolve(&tokens)?);
            for axis_decl in decl.axes {
                let mut axis = VariantAxis::new(axis_decl.name);
                for (value, fragment) in axis_decl.values {
                    axis = axis.value(value, fragment.resolve(&tokens)?);
                }
                if let Some(default) = axis_decl.default {
                    axis = axis.default_value(default);
                }
                component = component.axis(axis);
            }
            variants.declare_component(decl.id, component)?;
        }
        variants.seal();

        log::info!(
            "Loaded design system '{}' with {} tokens and {} components",
            config.name,
            tokens.len(),
            variants.component_ids().count()
        );

        Ok(Self {
            name: config.name,
            tokens,
            variants,
        })
    }

    /// Load a built-in design system by name.
    pub fn builtin(name: &str) -> ThemeResult<Self> {
        let (_, source) = BUILTINS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(|| ThemeError::UnknownDesignSystem {
                name: name.to_string(),
            })?;
        Self::from_config(DesignSystemConfig::from_toml(source)?)
    }

    /// The built-in Apple-style design system.
    pub fn apple() -> ThemeResult<Self> {
        Self::builtin("apple")
    }

    /// Load a design system from a `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        Self::from_config(DesignSystemConfig::from_file(path)?)
    }

    /// Load a design system by built-in name or by path to a `.toml` file.
    pub fn select(name_or_path: &str) -> ThemeResult<Self> {
        let name_or_path = name_or_path.trim();
        if Self::available_builtins().any(|builtin| builtin == name_or_path) {
            return Self::builtin(name_or_path);
        }
        let path = Path::new(name_or_path);
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            return Self::from_file(path);
        }
        Err(ThemeError::UnknownDesignSystem {
            name: name_or_path.to_string(),
        })
    }

    /// Load the design system named by `DSTK_DESIGN_SYSTEM`, or `apple` if unset.
    ///
    /// Errors loading an explicitly named design system are returned as-is.
    pub fn from_env_or_default() -> ThemeResult<Self> {
        match env::var(DESIGN_SYSTEM_ENV) {
            Ok(selection) if !selection.trim().is_empty() => {
                log::debug!("{} is set to '{}'", DESIGN_SYSTEM_ENV, selection);
                Self::select(&selection)
            },
            _ => Self::apple(),
        }
    }

    /// Names of the built-in design systems.
    pub fn available_builtins() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|(name, _)| *name)
    }

    /// The design system name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sealed token registry.
    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// The sealed variant resolver.
    pub fn variants(&self) -> &VariantResolver {
        &self.variants
    }

    /// Resolve a style request.
    pub fn resolve(&self, request: &StyleRequest) -> ThemeResult<ResolvedStyle> {
        self.variants.resolve(request)
    }
}
