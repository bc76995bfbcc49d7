//! # Design System Configuration
//!
//! A design system is a TOML document declaring tokens and component tables.
//! Declaration order is significant (axes resolve in the order they are
//! written), so the document is walked as an ordered [toml::Table] rather
//! than deserialized into unordered maps.
//!
//! ```toml
//! [meta]
//! name = "example"
//! resolver = "lenient"          # or "strict"
//!
//! [tokens.color.apple-blue]
//! 500 = "#007aff"
//!
//! [tokens.radius]
//! apple = "10px"
//!
//! [tokens.type-scale.headline]
//! size = "17px"
//! line-height = "22px"
//! letter-spacing = "-0.024em"
//! weight = 600
//!
//! [components.button.base]
//! border-radius = { token = "radius.apple" }
//! text = { token = "type-scale.headline" }
//!
//! [components.button.axes.variant]
//! default = "filled"
//!
//! [components.button.axes.variant.values.filled]
//! background-color = { token = "color.apple-blue", weight = 500 }
//!
//! [components.button.axes.variant.values.tinted]
//! background-color = { token = "color.apple-blue", weight = 500, alpha = 0.1 }
//!
//! [components.button.axes.variant.values.tinted.dark]
//! background-color = { token = "color.apple-blue", weight = 500, alpha = 0.2 }
//! ```
//!
//! Token references are resolved against a sealed [TokenRegistry] when the
//! component tables are built, see [FragmentDecl::resolve].

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::color;
use crate::error::{ThemeError, ThemeResult};
use crate::id::ComponentId;
use crate::token::{TokenCategory, TokenKey, TokenRegistry, TokenValue, TypeScale};
use crate::variant::{Fragment, ResolverMode};

/// Reserved fragment sub-table holding dark-mode alternates.
const DARK_TABLE: &str = "dark";

/// A parsed design-system document.
#[derive(Debug, Clone)]
pub struct DesignSystemConfig {
    /// Display name from `[meta]`.
    pub name: String,
    /// Resolver mode from `[meta] resolver`.
    pub mode: ResolverMode,
    /// Token declarations in document order.
    pub tokens: Vec<TokenDecl>,
    /// Component declarations in document order.
    pub components: Vec<ComponentDecl>,
}

/// One token declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDecl {
    /// The token identity.
    pub key: TokenKey,
    /// The token value.
    pub value: TokenValue,
}

/// One component declaration, before token references are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDecl {
    /// The component id.
    pub id: ComponentId,
    /// The base fragment.
    pub base: FragmentDecl,
    /// The axes in document order.
    pub axes: Vec<AxisDecl>,
}

/// One axis declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDecl {
    /// The axis name.
    pub name: String,
    /// The declared default, validated when the component is declared.
    pub default: Option<String>,
    /// Values and their fragments in document order.
    pub values: Vec<(String, FragmentDecl)>,
}

/// An attribute value as written in a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDecl {
    /// A literal used verbatim.
    Literal(String),
    /// A token reference with an optional opacity modifier.
    Token {
        /// The referenced token.
        key: TokenKey,
        /// Opacity applied to a hex color, `0.0..=1.0`.
        alpha: Option<f32>,
    },
}

impl ValueDecl {
    /// Resolve into attribute pairs for `attribute`.
    ///
    /// Type-scale tokens expand into four declarations; everything else
    /// yields exactly one pair.
    pub fn resolve(
        &self,
        attribute: &str,
        tokens: &TokenRegistry,
    ) -> ThemeResult<Vec<(String, String)>> {
        let (key, alpha) = match self {
            ValueDecl::Literal(literal) => return Ok(vec![(attribute.to_string(), literal.clone())]),
            ValueDecl::Token { key, alpha } => (key, *alpha),
        };

        let value = tokens.resolve(key)?;
        if let Some(scale) = value.as_type_scale() {
            if alpha.is_some() {
                return Err(ThemeError::InvalidTokenValue {
                    key: key.clone(),
                    details: "an alpha modifier only applies to colors".to_string(),
                });
            }
            return Ok(scale
                .declarations()
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect());
        }

        let literal = value.as_literal().ok_or_else(|| ThemeError::InvalidTokenValue {
            key: key.clone(),
            details: "token has no literal form".to_string(),
        })?;
        let literal = match alpha {
            Some(alpha) => color::with_alpha(&literal, alpha).map_err(|details| {
                ThemeError::InvalidTokenValue {
                    key: key.clone(),
                    details,
                }
            })?,
            None => literal,
        };
        Ok(vec![(attribute.to_string(), literal)])
    }
}

/// A fragment as written, with dark alternates kept apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentDecl {
    /// Base attributes in document order.
    pub attributes: Vec<(String, ValueDecl)>,
    /// Dark-mode alternates in document order.
    pub dark: Vec<(String, ValueDecl)>,
}

impl FragmentDecl {
    /// Resolve every token reference into literal pairs.
    pub fn resolve(&self, tokens: &TokenRegistry) -> ThemeResult<Fragment> {
        let mut fragment = Fragment::new();
        for (attribute, value) in &self.attributes {
            for (key, literal) in value.resolve(attribute, tokens)? {
                fragment.push(key, literal);
            }
        }
        for (attribute, value) in &self.dark {
            for (key, literal) in value.resolve(attribute, tokens)? {
                fragment.push_dark(key, literal);
            }
        }
        Ok(fragment)
    }
}

impl DesignSystemConfig {
    /// Load a design system from a `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::ConfigFileNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(ThemeError::invalid_config(
                path.display().to_string(),
                "unsupported configuration file format, use .toml",
            ));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Load a design system from TOML content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, origin: &Path) -> ThemeResult<Self> {
        let document: Table = toml::from_str(content)
            .map_err(|e| ThemeError::parse_error(PathBuf::from(origin), e.to_string()))?;

        let mut name = None;
        let mut mode = ResolverMode::default();
        let mut tokens = Vec::new();
        let mut components = Vec::new();

        for (section, value) in &document {
            let table = expect_table(value, section)?;
            match section.as_str() {
                "meta" => {
                    name = Some(expect_str(required(table, "name", "meta")?, "meta.name")?.to_string());
                    if let Some(resolver) = table.get("resolver") {
                        mode = parse_mode(expect_str(resolver, "meta.resolver")?)?;
                    }
                },
                "tokens" => {
                    for (category, entries) in table {
                        parse_category(category, entries, &mut tokens)?;
                    }
                },
                "components" => {
                    for (id, body) in table {
                        components.push(parse_component(id, body)?);
                    }
                },
                other => {
                    return Err(ThemeError::invalid_config(other, "unknown section"));
                },
            }
        }

        let name = name.ok_or_else(|| ThemeError::invalid_config("meta", "missing [meta] section"))?;
        log::debug!(
            "Parsed design system '{}' from {}: {} tokens, {} components",
            name,
            origin.display(),
            tokens.len(),
            components.len()
        );

        Ok(Self {
            name,
            mode,
            tokens,
            components,
        })
    }
}

fn parse_mode(value: &str) -> ThemeResult<ResolverMode> {
    match value {
        "lenient" => Ok(ResolverMode::Lenient),
        "strict" => Ok(ResolverMode::Strict),
        other => Err(ThemeError::invalid_config(
            "meta.resolver",
            format!("expected \"lenient\" or \"strict\", found \"{}\"", other),
        )),
    }
}

fn parse_category(category: &str, entries: &Value, out: &mut Vec<TokenDecl>) -> ThemeResult<()> {
    let location = format!("tokens.{}", category);
    let category: TokenCategory = category
        .parse()
        .map_err(|details: String| ThemeError::invalid_config(&location, details))?;

    for (name, value) in expect_table(entries, &location)? {
        let location = format!("{}.{}", location, name);
        match value {
            Value::Table(record) if category == TokenCategory::TypeScale => out.push(TokenDecl {
                key: TokenKey::new(category, name.as_str()),
                value: TokenValue::TypeScale(parse_type_scale(record, &location)?),
            }),
            Value::Table(ramp) => {
                for (weight, value) in ramp {
                    let location = format!("{}.{}", location, weight);
                    let weight = weight.parse::<u16>().map_err(|_| {
                        ThemeError::invalid_config(&location, "ramp keys must be numeric weights")
                    })?;
                    out.push(TokenDecl {
                        key: TokenKey::weighted(category, name.as_str(), weight),
                        value: scalar_token(value, &location)?,
                    });
                }
            },
            value => out.push(TokenDecl {
                key: TokenKey::new(category, name.as_str()),
                value: scalar_token(value, &location)?,
            }),
        }
    }
    Ok(())
}

fn parse_type_scale(record: &Table, location: &str) -> ThemeResult<TypeScale> {
    let field = |name: &str| -> ThemeResult<String> {
        let location = format!("{}.{}", location, name);
        literal(required(record, name, location.as_str())?, &location)
    };
    Ok(TypeScale {
        size: field("size")?,
        line_height: field("line-height")?,
        letter_spacing: field("letter-spacing")?,
        weight: field("weight")?,
    })
}

fn scalar_token(value: &Value, location: &str) -> ThemeResult<TokenValue> {
    match value {
        Value::Integer(number) => Ok(TokenValue::Number(*number as f64)),
        Value::Float(number) => Ok(TokenValue::Number(*number)),
        Value::Array(stack) => Ok(TokenValue::Literal(font_stack(stack, location)?)),
        value => literal(value, location).map(TokenValue::Literal),
    }
}

/// Join a font stack, quoting family names that contain whitespace.
fn font_stack(stack: &[Value], location: &str) -> ThemeResult<String> {
    let families = stack
        .iter()
        .map(|family| {
            let family = expect_str(family, location)?;
            if family.contains(char::is_whitespace) && !family.starts_with('"') {
                Ok(format!("\"{}\"", family))
            } else {
                Ok(family.to_string())
            }
        })
        .collect::<ThemeResult<Vec<_>>>()?;
    Ok(families.join(", "))
}

fn parse_component(id: &str, body: &Value) -> ThemeResult<ComponentDecl> {
    let location = format!("components.{}", id);
    let mut component = ComponentDecl {
        id: ComponentId::new(id),
        base: FragmentDecl::default(),
        axes: Vec::new(),
    };

    for (key, value) in expect_table(body, &location)? {
        let location = format!("{}.{}", location, key);
        match key.as_str() {
            "base" => component.base = parse_fragment(value, &location)?,
            "axes" => {
                for (axis, body) in expect_table(value, &location)? {
                    component.axes.push(parse_axis(axis, body, &format!("{}.{}", location, axis))?);
                }
            },
            _ => return Err(ThemeError::invalid_config(location, "expected 'base' or 'axes'")),
        }
    }
    Ok(component)
}

fn parse_axis(name: &str, body: &Value, location: &str) -> ThemeResult<AxisDecl> {
    let mut axis = AxisDecl {
        name: name.to_string(),
        default: None,
        values: Vec::new(),
    };

    for (key, value) in expect_table(body, location)? {
        let location = format!("{}.{}", location, key);
        match key.as_str() {
            "default" => axis.default = Some(expect_str(value, &location)?.to_string()),
            "values" => {
                for (option, fragment) in expect_table(value, &location)? {
                    let fragment = parse_fragment(fragment, &format!("{}.{}", location, option))?;
                    axis.values.push((option.clone(), fragment));
                }
            },
            _ => return Err(ThemeError::invalid_config(location, "expected 'default' or 'values'")),
        }
    }
    Ok(axis)
}

fn parse_fragment(value: &Value, location: &str) -> ThemeResult<FragmentDecl> {
    let mut fragment = FragmentDecl::default();
    for (attribute, value) in expect_table(value, location)? {
        let location = format!("{}.{}", location, attribute);
        if attribute == DARK_TABLE {
            for (attribute, value) in expect_table(value, &location)? {
                let location = format!("{}.{}", location, attribute);
                fragment.dark.push((attribute.clone(), parse_value(value, &location)?));
            }
        } else {
            fragment.attributes.push((attribute.clone(), parse_value(value, &location)?));
        }
    }
    Ok(fragment)
}

fn parse_value(value: &Value, location: &str) -> ThemeResult<ValueDecl> {
    let Value::Table(reference) = value else {
        return literal(value, location).map(ValueDecl::Literal);
    };

    let mut token = None;
    let mut weight = None;
    let mut alpha = None;
    for (key, value) in reference {
        let location = format!("{}.{}", location, key);
        match key.as_str() {
            "token" => token = Some(expect_str(value, &location)?),
            "weight" => {
                let number = value
                    .as_integer()
                    .and_then(|n| u16::try_from(n).ok())
                    .ok_or_else(|| ThemeError::invalid_config(&location, "weight must be an integer in 0..=65535"))?;
                weight = Some(number);
            },
            "alpha" => {
                let number = match value {
                    Value::Float(f) => *f as f32,
                    Value::Integer(i) => *i as f32,
                    _ => return Err(ThemeError::invalid_config(location, "alpha must be a number")),
                };
                alpha = Some(number);
            },
            _ => {
                return Err(ThemeError::invalid_config(
                    location,
                    "token references accept 'token', 'weight' and 'alpha'",
                ))
            },
        }
    }

    let token = token.ok_or_else(|| ThemeError::invalid_config(location, "missing 'token'"))?;
    Ok(ValueDecl::Token {
        key: TokenKey::parse(token, weight)?,
        alpha,
    })
}

fn literal(value: &Value, location: &str) -> ThemeResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Integer(number) => Ok(number.to_string()),
        Value::Float(number) => Ok(number.to_string()),
        other => Err(ThemeError::invalid_config(
            location,
            format!("expected a string or number, found {}", other.type_str()),
        )),
    }
}

fn required<'a>(table: &'a Table, key: &str, location: &str) -> ThemeResult<&'a Value> {
    table
        .get(key)
        .ok_or_else(|| ThemeError::invalid_config(location, format!("missing '{}'", key)))
}

fn expect_table<'a>(value: &'a Value, location: &str) -> ThemeResult<&'a Table> {
    value.as_table().ok_or_else(|| {
        ThemeError::invalid_config(location, format!("expected a table, found {}", value.type_str()))
    })
}

fn expect_str<'a>(value: &'a Value, location: &str) -> ThemeResult<&'a str> {
    value.as_str().ok_or_else(|| {
        ThemeError::invalid_config(location, format!("expected a string, found {}", value.type_str()))
    })
}
