//! # Theme Error Types
//!
//! Error types for the design-system core. Every configuration-time variant
//! names the offending token, component or axis so a broken definition can be
//! fixed straight from the diagnostic.

use std::path::PathBuf;
use thiserror::Error;

use crate::id::ComponentId;
use crate::token::TokenKey;

/// Errors that can occur while building or querying a design system.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A token with the same category, name and weight is already registered.
    #[error("Token '{key}' is already registered")]
    DuplicateToken {
        /// The key that was registered twice.
        key: TokenKey,
    },

    /// No token matches the requested category, name and weight.
    #[error("Unknown token '{key}'")]
    UnknownToken {
        /// The key that could not be found.
        key: TokenKey,
    },

    /// A registry was sealed and no longer accepts declarations.
    #[error("The {registry} is sealed and does not accept new declarations")]
    RegistryClosed {
        /// Which registry rejected the declaration.
        registry: &'static str,
    },

    /// A component with the same id is already declared.
    #[error("Component '{component}' is already declared")]
    DuplicateComponent {
        /// The component that was declared twice.
        component: ComponentId,
    },

    /// An axis declaration is malformed.
    #[error("Component '{component}' has an invalid axis '{axis}': {reason}")]
    InvalidAxis {
        /// The component owning the axis.
        component: ComponentId,
        /// The axis name.
        axis: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No component with the requested id is declared.
    #[error("Unknown component '{component}'")]
    UnknownComponent {
        /// The component that was requested.
        component: ComponentId,
    },

    /// A request named a value outside the axis' value set (strict mode only).
    #[error("Component '{component}' has no value '{value}' on axis '{axis}'")]
    InvalidAxisValue {
        /// The requested component.
        component: ComponentId,
        /// The axis name.
        axis: String,
        /// The rejected value.
        value: String,
    },

    /// A request named an axis the component does not declare (strict mode only).
    #[error("Component '{component}' has no axis '{axis}'")]
    UnknownAxis {
        /// The requested component.
        component: ComponentId,
        /// The unknown axis name.
        axis: String,
    },

    /// A token reference could not be parsed.
    #[error("Invalid token reference '{reference}': {reason}")]
    InvalidTokenRef {
        /// The reference as written.
        reference: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A token value cannot be used the way it was requested.
    #[error("Invalid value for token '{key}': {details}")]
    InvalidTokenValue {
        /// The token whose value was rejected.
        key: TokenKey,
        /// Details about the problem.
        details: String,
    },

    /// A design-system document is structurally wrong.
    #[error("Invalid design system configuration at '{location}': {details}")]
    InvalidConfig {
        /// Dotted path of the offending entry.
        location: String,
        /// Details about the problem.
        details: String,
    },

    /// A design-system file does not exist.
    #[error("Design system file not found: {path:?}")]
    ConfigFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A design-system file is not valid TOML.
    #[error("Failed to parse design system file {path:?}: {details}")]
    ConfigParse {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// No built-in design system with this name exists.
    #[error("Design system '{name}' not found")]
    UnknownDesignSystem {
        /// The requested name.
        name: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an unknown component error.
    pub fn unknown_component(component: impl Into<ComponentId>) -> Self {
        Self::UnknownComponent {
            component: component.into(),
        }
    }

    /// Create an invalid axis error.
    pub fn invalid_axis(
        component: impl Into<ComponentId>,
        axis: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAxis {
            component: component.into(),
            axis: axis.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(location: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            location: location.into(),
            details: details.into(),
        }
    }

    /// Create a configuration parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Returns `true` for errors that stem from a broken design-system
    /// definition rather than from a single request.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::InvalidAxisValue { .. } | Self::UnknownAxis { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenCategory;

    #[test]
    fn test_duplicate_token_names_the_key() {
        let err = ThemeError::DuplicateToken {
            key: TokenKey::weighted(TokenCategory::Color, "apple-blue", 500),
        };
        assert_eq!(err.to_string(), "Token 'color.apple-blue[500]' is already registered");
    }

    #[test]
    fn test_invalid_axis_names_component_and_axis() {
        let err = ThemeError::invalid_axis("button", "size", "axis has no default value");
        let msg = err.to_string();
        assert!(msg.contains("button"));
        assert!(msg.contains("size"));
        assert!(msg.contains("no default"));
    }

    #[test]
    fn test_request_errors_are_not_configuration_errors() {
        let strict = ThemeError::UnknownAxis {
            component: ComponentId::new("button"),
            axis: "tone".to_string(),
        };
        assert!(!strict.is_configuration_error());
        assert!(ThemeError::unknown_component("nope").is_configuration_error());
        assert!(ThemeError::RegistryClosed { registry: "token registry" }.is_configuration_error());
    }
}
