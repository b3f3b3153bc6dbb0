//! Palette registry
//!
//! An ordered map from theme key to [`Theme`]. Order is declaration order and
//! drives menu rendering. The registry always contains its default key, so
//! [`ThemeRegistry::resolve`] can turn any requested key (unknown, missing,
//! garbage from storage) into a usable theme without failing.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::theme::Theme;

/// Key the built-in registry falls back to
pub const DEFAULT_THEME_KEY: &str = "default";

/// Ordered collection of themes with a guaranteed fallback
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Theme>,
    default_key: String,
}

/// On-disk theme file: a list of `[[themes]]` tables
#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// Build a registry from themes in declaration order.
    ///
    /// Fails if a theme is out of range, a key repeats, or `default_key` is
    /// not among the themes.
    pub fn new(default_key: impl Into<String>, themes: impl IntoIterator<Item = Theme>) -> Result<Self> {
        let mut registry = Self {
            themes: IndexMap::new(),
            default_key: default_key.into(),
        };
        for theme in themes {
            registry.register(theme)?;
        }
        if !registry.themes.contains_key(&registry.default_key) {
            return Err(ThemeError::NotFound(registry.default_key));
        }
        Ok(registry)
    }

    /// The seven built-in presets, `"default"` as fallback
    pub fn builtin() -> Self {
        let themes = ThemePreset::all()
            .iter()
            .map(|preset| (preset.id().to_string(), preset.theme()))
            .collect();
        Self {
            themes,
            default_key: DEFAULT_THEME_KEY.to_string(),
        }
    }

    /// Append a theme after validating it
    pub fn register(&mut self, theme: Theme) -> Result<()> {
        theme.validate()?;
        if self.themes.contains_key(&theme.key) {
            return Err(ThemeError::DuplicateTheme(theme.key));
        }
        debug!("ThemeRegistry::register - {}", theme.key);
        self.themes.insert(theme.key.clone(), theme);
        Ok(())
    }

    /// Parse a TOML theme file and register every theme in it.
    ///
    /// Returns the number of themes added. Nothing is registered if any
    /// theme in the file is rejected.
    pub fn extend_from_toml(&mut self, src: &str) -> Result<usize> {
        let file: ThemeFile = toml::from_str(src)?;
        let mut staged = self.clone();
        for theme in file.themes.iter().cloned() {
            staged.register(theme)?;
        }
        *self = staged;
        Ok(file.themes.len())
    }

    /// Find a theme by key
    pub fn lookup(&self, key: &str) -> Result<&Theme> {
        self.themes
            .get(key)
            .ok_or_else(|| ThemeError::NotFound(key.to_string()))
    }

    /// Find a theme by key, falling back to the default theme
    pub fn resolve(&self, key: Option<&str>) -> &Theme {
        match key.map(str::trim) {
            Some(k) => match self.lookup(k) {
                Ok(theme) => theme,
                Err(_) => {
                    debug!("ThemeRegistry::resolve - unknown key {:?}, using default", k);
                    self.default_theme()
                }
            },
            None => self.default_theme(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.themes.contains_key(key)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn default_theme(&self) -> &Theme {
        // Construction guarantees the default key is present.
        &self.themes[self.default_key.as_str()]
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.themes.keys().map(String::as_str)
    }

    /// Themes in declaration order
    pub fn themes(&self) -> impl Iterator<Item = &Theme> + '_ {
        self.themes.values()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
