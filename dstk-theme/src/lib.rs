#![warn(missing_docs)]

//! # dstk Design Tokens & Variants
//!
//! The core of the dstk design system toolkit: a registry of named design
//! primitives and a resolver that turns semantic style requests
//! (`variant=filled, size=lg`) into concrete, ordered attribute sets.
//!
//! ## Overview
//!
//! - **[TokenRegistry](token::TokenRegistry)**: colors, type scale, spacing,
//!   radii, shadows and motion curves, addressed by `(category, name, weight?)`
//! - **[VariantResolver](variant::VariantResolver)**: per-component axis tables
//!   and the deterministic merge of base, axis, theme and override fragments
//! - **[ResolvedStyle](style::ResolvedStyle)**: the ordered, last-write-wins output
//! - **[DesignSystemConfig](config::DesignSystemConfig)**: TOML design-system documents
//! - **[DesignSystem](system::DesignSystem)**: a loaded, sealed design system
//! - **[StyleCache](cache::StyleCache)**: optional memoization by request
//!
//! ## Quick Start
//!
//! ```rust
//! use dstk_theme::mode::ThemeMode;
//! use dstk_theme::request::StyleRequest;
//! use dstk_theme::system::DesignSystem;
//!
//! let apple = DesignSystem::apple().unwrap();
//!
//! let request = StyleRequest::new("button")
//!     .with("variant", "bordered")
//!     .with("size", "lg")
//!     .with_theme(ThemeMode::Dark);
//!
//! let style = apple.resolve(&request).unwrap();
//! assert_eq!(style.get("border-color"), Some("#48484a"));
//! println!("{}", style);
//! ```
//!
//! ## Precedence
//!
//! Pairs are accumulated in a fixed order and folded so the last occurrence
//! of a key wins while the key keeps its first position:
//!
//! 1. the component's base fragment, then its dark alternates in dark mode
//! 2. each axis in declaration order, then that axis' dark alternates
//! 3. the request's raw override
//!
//! Unknown or omitted axis values resolve to the axis default. Configuration
//! mistakes (duplicate tokens, axes without defaults, unknown token
//! references) fail loudly while the design system is built.
//!
//! ## Environment Variables
//!
//! ```bash
//! export DSTK_DESIGN_SYSTEM=apple                 # built-in design system
//! export DSTK_DESIGN_SYSTEM=./brand.toml          # custom design system file
//! ```

/// Resolved style memoization.
pub mod cache;
/// Hex color helpers.
pub mod color;
/// TOML design-system documents.
pub mod config;
/// Error types.
pub mod error;
/// Component identifiers.
pub mod id;
/// Light and dark theme modes.
pub mod mode;
/// Style requests.
pub mod request;
/// Resolved attribute sets.
pub mod style;
/// Loaded design systems.
pub mod system;
/// Design tokens.
pub mod token;
/// Component variant resolution.
pub mod variant;
