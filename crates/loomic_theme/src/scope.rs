//! Style scopes and token application
//!
//! A [`StyleScope`] is the live property bag one rendering context reads its
//! colors from (the document root's custom properties in a browser). Each
//! context owns exactly one scope; [`apply`] writes a [`DerivedTokenSet`]
//! into it.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::theme::ColorScheme;
use crate::tokens::{ColorToken, DerivedTokenSet, Hsl};

/// Default custom property prefix
pub const DEFAULT_PREFIX: &str = "--clr-";

/// Which tokens an [`apply`] call writes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyVariant {
    /// Brand hues and their hover/subtle variants only. Background and
    /// foreground stay under the context's own scheme rules.
    BrandOnly,
    /// Everything, including background, foreground and surface tones
    #[default]
    Full,
}

impl ApplyVariant {
    /// Tokens written by this variant, in write order
    pub fn tokens(self) -> &'static [ColorToken] {
        match self {
            ApplyVariant::BrandOnly => &ColorToken::BRAND,
            ApplyVariant::Full => &ColorToken::ALL,
        }
    }
}

/// Property bag for one rendering context
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleScope {
    #[serde(skip)]
    prefix: String,
    /// Scheme class currently set on the scope (`.dark` when dark)
    scheme_class: Option<ColorScheme>,
    properties: IndexMap<String, String>,
}

impl Default for StyleScope {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleScope {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            scheme_class: None,
            properties: IndexMap::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full property name for a token, e.g. `--clr-primary-hover`
    pub fn property_name(&self, token: ColorToken) -> String {
        format!("{}{}", self.prefix, token.name())
    }

    /// Set a raw property, overwriting any prior value
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        trace!("StyleScope::set_property {} = {}", name, value);
        self.properties.insert(name, value);
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.properties.shift_remove(name)
    }

    pub fn set_token(&mut self, token: ColorToken, value: Hsl) {
        let name = self.property_name(token);
        self.set_property(name, value.to_string());
    }

    /// Read a token back, if it was written and still parses
    pub fn token(&self, token: ColorToken) -> Option<Hsl> {
        self.property(&self.property_name(token))
            .and_then(|value| Hsl::parse(value).ok())
    }

    pub fn scheme_class(&self) -> Option<ColorScheme> {
        self.scheme_class
    }

    pub fn set_scheme_class(&mut self, scheme: ColorScheme) {
        self.scheme_class = Some(scheme);
    }

    /// Properties in first-write order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
        self.scheme_class = None;
    }

    /// Render as a CSS rule, e.g. `:root { --clr-primary: 85 75% 55%; }`.
    ///
    /// A dark scheme class is rendered as `<selector>.dark`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = String::new();
        let _ = match self.scheme_class {
            Some(ColorScheme::Dark) => writeln!(css, "{selector}.dark {{"),
            _ => writeln!(css, "{selector} {{"),
        };
        for (name, value) in &self.properties {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push('}');
        css.push('\n');
        css
    }
}

/// Write `tokens` into `scope`.
///
/// Existing values for the written names are overwritten; names the variant
/// does not cover are left as they are.
pub fn apply(tokens: &DerivedTokenSet, scope: &mut StyleScope, variant: ApplyVariant) {
    for &token in variant.tokens() {
        scope.set_token(token, tokens.get(token));
    }
}
