//! # Variant Resolution
//!
//! Components declare a set of *axes* (`variant`, `size`, ...). Every axis
//! maps each allowed value to a [Fragment] of attribute pairs and names one
//! default value. The [VariantResolver] turns a [StyleRequest] into a
//! [ResolvedStyle] by stacking, in this order:
//!
//! 1. the component's base fragment,
//! 2. one fragment per axis in declaration order, using the requested value
//!    or the axis default,
//! 3. the request's raw override.
//!
//! Every fragment appends its dark alternates right after its own pairs when
//! the request is resolved in [ThemeMode::Dark]. The accumulated pairs are
//! then folded with cascade semantics, so later stages win on shared keys.
//!
//! ```rust
//! use dstk_theme::mode::ThemeMode;
//! use dstk_theme::request::StyleRequest;
//! use dstk_theme::variant::{Component, Fragment, VariantAxis, VariantResolver};
//!
//! let mut resolver = VariantResolver::new();
//! resolver
//!     .declare_component(
//!         "badge",
//!         Component::new().axis(
//!             VariantAxis::new("tone")
//!                 .value("neutral", Fragment::new().set("color", "gray-700").dark("color", "gray-200"))
//!                 .value("alert", Fragment::new().set("color", "red-500"))
//!                 .default_value("neutral"),
//!         ),
//!     )
//!     .unwrap();
//!
//! let style = resolver
//!     .resolve(&StyleRequest::new("badge").with_theme(ThemeMode::Dark))
//!     .unwrap();
//! assert_eq!(style.get("color"), Some("gray-200"));
//! ```

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};
use crate::id::ComponentId;
use crate::mode::ThemeMode;
use crate::request::StyleRequest;
use crate::style::ResolvedStyle;

/// An ordered list of literal attribute pairs, with optional dark-mode alternates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pairs: Vec<(String, String)>,
    dark: Vec<(String, String)>,
}

impl Fragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fragment from ordered pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            dark: Vec::new(),
        }
    }

    /// Append a base pair.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a dark-mode alternate pair.
    pub fn dark(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dark.push((key.into(), value.into()));
        self
    }

    /// Append a base pair in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a dark-mode alternate pair in place.
    pub fn push_dark(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.dark.push((key.into(), value.into()));
    }

    /// The base pairs in declaration order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// The dark-mode alternates in declaration order.
    pub fn dark_pairs(&self) -> &[(String, String)] {
        &self.dark
    }

    /// Whether the fragment declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.dark.is_empty()
    }

    fn apply_to(&self, style: &mut ResolvedStyle, theme: ThemeMode) {
        style.extend(&self.pairs);
        if theme.is_dark() {
            style.extend(&self.dark);
        }
    }
}

/// A named dimension of stylistic choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAxis {
    name: String,
    values: IndexMap<String, Fragment>,
    default: Option<String>,
}

impl VariantAxis {
    /// Start declaring an axis.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
            default: None,
        }
    }

    /// Add an allowed value and its fragment.
    pub fn value(mut self, value: impl Into<String>, fragment: Fragment) -> Self {
        self.values.insert(value.into(), fragment);
        self
    }

    /// Designate the default value.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The allowed values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The designated default, if set.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The fragment of a value.
    pub fn fragment(&self, value: &str) -> Option<&Fragment> {
        self.values.get(value)
    }

    fn validate(&self, component: &ComponentId) -> ThemeResult<()> {
        if self.values.is_empty() {
            return Err(ThemeError::invalid_axis(component, &self.name, "axis declares no values"));
        }
        match &self.default {
            None => Err(ThemeError::invalid_axis(component, &self.name, "axis has no default value")),
            Some(default) if !self.values.contains_key(default) => Err(ThemeError::invalid_axis(
                component,
                &self.name,
                format!("default '{}' is not one of the declared values", default),
            )),
            Some(_) => Ok(()),
        }
    }

    /// The fragment to use for a requested value, falling back to the default.
    ///
    /// Only called on validated axes, which always have a default fragment.
    fn select(&self, requested: Option<&str>) -> Option<&Fragment> {
        requested
            .and_then(|value| self.values.get(value))
            .or_else(|| self.default.as_deref().and_then(|default| self.values.get(default)))
    }
}

/// A component declaration: an optional base fragment plus ordered axes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    base: Fragment,
    axes: Vec<VariantAxis>,
}

impl Component {
    /// Create a component with no base attributes and no axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base fragment applied before any axis.
    pub fn base(mut self, base: Fragment) -> Self {
        self.base = base;
        self
    }

    /// Append an axis.
    pub fn axis(mut self, axis: VariantAxis) -> Self {
        self.axes.push(axis);
        self
    }

    /// Create a component from ordered axes.
    pub fn with_axes(axes: impl IntoIterator<Item = VariantAxis>) -> Self {
        Self {
            base: Fragment::new(),
            axes: axes.into_iter().collect(),
        }
    }

    /// The base fragment.
    pub fn base_fragment(&self) -> &Fragment {
        &self.base
    }

    /// The axes in declaration order.
    pub fn axes(&self) -> &[VariantAxis] {
        &self.axes
    }

    /// Look up an axis by name.
    pub fn axis_named(&self, name: &str) -> Option<&VariantAxis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    fn validate(&self, id: &ComponentId) -> ThemeResult<()> {
        for (index, axis) in self.axes.iter().enumerate() {
            if self.axes[..index].iter().any(|earlier| earlier.name == axis.name) {
                return Err(ThemeError::invalid_axis(id, &axis.name, "axis is declared more than once"));
            }
            axis.validate(id)?;
        }
        Ok(())
    }
}

/// How the resolver treats request values it does not recognise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResolverMode {
    /// Unknown axis values fall back to the axis default; unknown axis
    /// names are ignored.
    #[default]
    Lenient,
    /// Unknown axis values and axis names fail the request.
    Strict,
}

/// Resolves style requests against declared components.
///
/// Declarations happen during initialization through `&mut self`; after
/// that, [VariantResolver::resolve] only reads and is safe to call from many
/// threads at once.
#[derive(Debug, Clone, Default)]
pub struct VariantResolver {
    components: IndexMap<ComponentId, Component>,
    mode: ResolverMode,
    sealed: bool,
}

impl VariantResolver {
    /// Create an empty resolver in [ResolverMode::Lenient].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty resolver with the given mode.
    pub fn with_mode(mode: ResolverMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The resolver mode.
    pub fn mode(&self) -> ResolverMode {
        self.mode
    }

    /// Declare how a component's axes resolve to fragments.
    ///
    /// Fails with [ThemeError::DuplicateComponent] if the id is taken,
    /// [ThemeError::InvalidAxis] if an axis is empty, lacks a default or
    /// repeats a name, and [ThemeError::RegistryClosed] after [Self::seal].
    pub fn declare_component(
        &mut self,
        id: impl Into<ComponentId>,
        component: Component,
    ) -> ThemeResult<()> {
        let id = id.into();
        if self.sealed {
            return Err(ThemeError::RegistryClosed {
                registry: "variant resolver",
            });
        }
        if self.components.contains_key(&id) {
            return Err(ThemeError::DuplicateComponent { component: id });
        }
        component.validate(&id)?;

        log::trace!("Declared component '{}' with {} axes", id, component.axes.len());
        self.components.insert(id, component);
        Ok(())
    }

    /// Close the resolver for further declarations.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the resolver has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Look up a declared component.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Iterate declared component ids in declaration order.
    pub fn component_ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.components.keys()
    }

    /// Resolve a request into its final attribute set.
    ///
    /// Returns [ThemeError::UnknownComponent] for undeclared components. In
    /// [ResolverMode::Strict] unrecognised axis names or values fail with
    /// [ThemeError::UnknownAxis] or [ThemeError::InvalidAxisValue]; in
    /// [ResolverMode::Lenient] they resolve as if omitted.
    pub fn resolve(&self, request: &StyleRequest) -> ThemeResult<ResolvedStyle> {
        let component = self
            .components
            .get(&request.component)
            .ok_or_else(|| ThemeError::unknown_component(&request.component))?;

        if self.mode == ResolverMode::Strict {
            self.check_strict(component, request)?;
        }

        let mut style = ResolvedStyle::new();
        component.base.apply_to(&mut style, request.theme);

        for axis in &component.axes {
            let requested = request.axis_value(&axis.name);
            if let Some(value) = requested {
                if !axis.values.contains_key(value) {
                    log::trace!(
                        "'{}' is not a value of {}.{}, using the default",
                        value,
                        request.component,
                        axis.name
                    );
                }
            }
            if let Some(fragment) = axis.select(requested) {
                fragment.apply_to(&mut style, request.theme);
            }
        }

        if let Some(raw) = &request.raw_override {
            for (key, value) in raw.to_pairs() {
                style.apply(key, value);
            }
        }

        Ok(style)
    }

    fn check_strict(&self, component: &Component, request: &StyleRequest) -> ThemeResult<()> {
        for (axis_name, value) in &request.axis_values {
            let axis = component
                .axis_named(axis_name)
                .ok_or_else(|| ThemeError::UnknownAxis {
                    component: request.component.clone(),
                    axis: axis_name.clone(),
                })?;
            if !axis.values.contains_key(value) {
                return Err(ThemeError::InvalidAxisValue {
                    component: request.component.clone(),
                    axis: axis_name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Component {
        Component::new()
            .axis(
                VariantAxis::new("variant")
                    .value(
                        "filled",
                        Fragment::new().set("background", "blue-500").set("color", "white"),
                    )
                    .value(
                        "bordered",
                        Fragment::new()
                            .set("background", "transparent")
                            .set("color", "label-primary")
                            .set("border", "gray-300")
                            .dark("border", "gray-700"),
                    )
                    .default_value("filled"),
            )
            .axis(
                VariantAxis::new("size")
                    .value("sm", Fragment::new().set("height", "36px"))
                    .value("default", Fragment::new().set("height", "44px"))
                    .default_value("default"),
            )
    }

    fn resolver() -> VariantResolver {
        let mut resolver = VariantResolver::new();
        resolver.declare_component("button", button()).unwrap();
        resolver
    }

    #[test]
    fn test_defaults_fill_omitted_axes() {
        let style = resolver().resolve(&StyleRequest::new("button")).unwrap();
        assert_eq!(
            style.into_pairs(),
            vec![
                ("background".to_string(), "blue-500".to_string()),
                ("color".to_string(), "white".to_string()),
                ("height".to_string(), "44px".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_value_behaves_like_default() {
        let resolver = resolver();
        let fallback = resolver
            .resolve(&StyleRequest::new("button").with("variant", "neon").with("size", "xxl"))
            .unwrap();
        let defaults = resolver.resolve(&StyleRequest::new("button")).unwrap();
        assert_eq!(fallback, defaults);
    }

    #[test]
    fn test_unknown_axis_name_is_ignored_when_lenient() {
        let resolver = resolver();
        let style = resolver
            .resolve(&StyleRequest::new("button").with("tone", "loud"))
            .unwrap();
        assert_eq!(style, resolver.resolve(&StyleRequest::new("button")).unwrap());
    }

    #[test]
    fn test_dark_alternate_overrides_base_pair() {
        let resolver = resolver();
        let request = StyleRequest::new("button").with("variant", "bordered");

        let light = resolver.resolve(&request.clone().with_theme(ThemeMode::Light)).unwrap();
        let dark = resolver.resolve(&request.with_theme(ThemeMode::Dark)).unwrap();

        assert_eq!(light.get("border"), Some("gray-300"));
        assert_eq!(dark.get("border"), Some("gray-700"));
        assert_eq!(
            light.keys().collect::<Vec<_>>(),
            dark.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_later_axis_wins_on_shared_key() {
        let mut resolver = VariantResolver::new();
        resolver
            .declare_component(
                "chip",
                Component::new()
                    .axis(
                        VariantAxis::new("variant")
                            .value("solid", Fragment::new().set("padding", "8px").set("color", "white"))
                            .default_value("solid"),
                    )
                    .axis(
                        VariantAxis::new("size")
                            .value("sm", Fragment::new().set("padding", "4px"))
                            .default_value("sm"),
                    ),
            )
            .unwrap();

        let style = resolver.resolve(&StyleRequest::new("chip")).unwrap();
        assert_eq!(style.get("padding"), Some("4px"));
        assert_eq!(style.keys().next(), Some("padding"));
    }

    #[test]
    fn test_override_beats_theme_alternate() {
        let style = resolver()
            .resolve(
                &StyleRequest::new("button")
                    .with("variant", "bordered")
                    .with_override([("border", "none")])
                    .with_theme(ThemeMode::Dark),
            )
            .unwrap();
        assert_eq!(style.get("border"), Some("none"));
    }

    #[test]
    fn test_base_fragment_comes_first() {
        let mut resolver = VariantResolver::new();
        resolver
            .declare_component(
                "pill",
                Component::new()
                    .base(Fragment::new().set("display", "inline-flex").set("color", "black"))
                    .axis(
                        VariantAxis::new("tone")
                            .value("info", Fragment::new().set("color", "blue-500"))
                            .default_value("info"),
                    ),
            )
            .unwrap();

        let style = resolver.resolve(&StyleRequest::new("pill")).unwrap();
        assert_eq!(style.to_declarations(), "display: inline-flex; color: blue-500");
    }

    #[test]
    fn test_later_axis_pair_beats_earlier_dark_alternate() {
        let mut resolver = VariantResolver::new();
        resolver
            .declare_component(
                "tag",
                Component::new()
                    .axis(
                        VariantAxis::new("variant")
                            .value(
                                "outline",
                                Fragment::new().set("border", "gray-300").dark("border", "gray-700"),
                            )
                            .default_value("outline"),
                    )
                    .axis(
                        VariantAxis::new("emphasis")
                            .value("strong", Fragment::new().set("border", "blue-500"))
                            .value("quiet", Fragment::new())
                            .default_value("quiet"),
                    ),
            )
            .unwrap();

        let strong = StyleRequest::new("tag")
            .with("emphasis", "strong")
            .with_theme(ThemeMode::Dark);
        assert_eq!(resolver.resolve(&strong).unwrap().get("border"), Some("blue-500"));

        let quiet = StyleRequest::new("tag").with_theme(ThemeMode::Dark);
        assert_eq!(resolver.resolve(&quiet).unwrap().get("border"), Some("gray-700"));
    }

    #[test]
    fn test_axis_pair_beats_base_dark_alternate() {
        let mut resolver = VariantResolver::new();
        resolver
            .declare_component(
                "panel",
                Component::new()
                    .base(
                        Fragment::new()
                            .set("background", "white")
                            .set("color", "black")
                            .dark("background", "gray-900")
                            .dark("color", "white"),
                    )
                    .axis(
                        VariantAxis::new("tone")
                            .value("accent", Fragment::new().set("background", "blue-500"))
                            .default_value("accent"),
                    ),
            )
            .unwrap();

        let dark = resolver
            .resolve(&StyleRequest::new("panel").with_theme(ThemeMode::Dark))
            .unwrap();
        assert_eq!(dark.to_declarations(), "background: blue-500; color: white");
    }

    #[test]
    fn test_component_without_axes() {
        let mut resolver = VariantResolver::new();
        resolver
            .declare_component("divider", Component::new().base(Fragment::new().set("height", "1px")))
            .unwrap();
        let style = resolver.resolve(&StyleRequest::new("divider")).unwrap();
        assert_eq!(style.get("height"), Some("1px"));
    }

    #[test]
    fn test_unknown_component_fails() {
        let err = resolver().resolve(&StyleRequest::new("nonexistent")).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownComponent { component } if component.as_str() == "nonexistent"));
    }

    #[test]
    fn test_duplicate_component_fails() {
        let mut resolver = resolver();
        let err = resolver.declare_component("button", button()).unwrap_err();
        assert!(matches!(err, ThemeError::DuplicateComponent { .. }));
    }

    #[test]
    fn test_axis_without_default_is_invalid() {
        let mut resolver = VariantResolver::new();
        let err = resolver
            .declare_component(
                "button",
                Component::new().axis(VariantAxis::new("size").value("sm", Fragment::new())),
            )
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidAxis { axis, .. } if axis == "size"));
        assert!(resolver.component("button").is_none());
    }

    #[test]
    fn test_axis_without_values_is_invalid() {
        let mut resolver = VariantResolver::new();
        let err = resolver
            .declare_component(
                "button",
                Component::new().axis(VariantAxis::new("size").default_value("sm")),
            )
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidAxis { .. }));
    }

    #[test]
    fn test_default_outside_value_set_is_invalid() {
        let mut resolver = VariantResolver::new();
        let err = resolver
            .declare_component(
                "button",
                Component::new().axis(
                    VariantAxis::new("size")
                        .value("sm", Fragment::new())
                        .default_value("md"),
                ),
            )
            .unwrap_err();
        assert!(err.to_string().contains("'md'"));
    }

    #[test]
    fn test_repeated_axis_name_is_invalid() {
        let size = VariantAxis::new("size")
            .value("sm", Fragment::new())
            .default_value("sm");
        let mut resolver = VariantResolver::new();
        let err = resolver
            .declare_component("button", Component::with_axes([size.clone(), size]))
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidAxis { .. }));
    }

    #[test]
    fn test_sealed_resolver_rejects_declarations() {
        let mut resolver = resolver();
        resolver.seal();
        let err = resolver
            .declare_component("card", Component::new())
            .unwrap_err();
        assert!(matches!(err, ThemeError::RegistryClosed { .. }));
        assert!(resolver.resolve(&StyleRequest::new("button")).is_ok());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_values() {
        let mut resolver = VariantResolver::with_mode(ResolverMode::Strict);
        resolver.declare_component("button", button()).unwrap();

        let err = resolver
            .resolve(&StyleRequest::new("button").with("variant", "neon"))
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidAxisValue { value, .. } if value == "neon"));

        let err = resolver
            .resolve(&StyleRequest::new("button").with("tone", "loud"))
            .unwrap_err();
        assert!(matches!(err, ThemeError::UnknownAxis { axis, .. } if axis == "tone"));

        assert!(resolver
            .resolve(&StyleRequest::new("button").with("size", "sm"))
            .is_ok());
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VariantResolver>();
    }
}
