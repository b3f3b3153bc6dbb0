//! Loomic configuration file handling

use anyhow::{Context, Result};
use loomic_theme::{
    ContextOptions, LightnessPolicy, Theme, ThemeRegistry, DEFAULT_THEME_KEY, THEME_STORAGE_KEY,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "loomic.toml";

/// Top-level Loomic configuration (loomic.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoomicConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Custom themes appended after the built-in presets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<Theme>,
}

/// Theme selection settings
#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Fallback theme key
    #[serde(default = "default_theme_key")]
    pub default: String,
    /// Storage key holding the selection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Keep unclamped hover lightness
    #[serde(default)]
    pub legacy_lightness: bool,
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}

fn default_storage_key() -> String {
    THEME_STORAGE_KEY.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: default_theme_key(),
            storage_key: default_storage_key(),
            legacy_lightness: false,
        }
    }
}

/// Durable store location
#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".loomic/storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Preview URL settings
#[derive(Debug, Deserialize, Serialize)]
pub struct PreviewConfig {
    /// Origin prepended to `/preview/...`; empty for root-relative URLs
    #[serde(default)]
    pub base_url: String,
    /// Component used when none is given on the command line
    #[serde(default = "default_component")]
    pub component: String,
}

fn default_component() -> String {
    "button".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            component: default_component(),
        }
    }
}

impl LoomicConfig {
    /// Load `path` if given, else `loomic.toml` in the working directory if
    /// present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.is_file() {
                    Self::load_from(local)
                } else {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file, or from `loomic.toml` inside a directory
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config file found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: LoomicConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!(
            "loaded {} ({} custom themes)",
            config_path.display(),
            config.themes.len()
        );
        Ok(config)
    }

    /// Built-in presets plus custom themes, with the configured default
    pub fn registry(&self) -> Result<ThemeRegistry> {
        let builtin = ThemeRegistry::builtin();
        let themes = builtin.themes().cloned().chain(self.themes.iter().cloned());
        ThemeRegistry::new(&self.theme.default, themes).context("Invalid theme configuration")
    }

    pub fn lightness_policy(&self) -> LightnessPolicy {
        if self.theme.legacy_lightness {
            LightnessPolicy::Legacy
        } else {
            LightnessPolicy::Clamp
        }
    }

    /// Options for a full-page context
    pub fn context_options(&self) -> ContextOptions {
        ContextOptions::full()
            .with_policy(self.lightness_policy())
            .with_storage_key(&self.theme.storage_key)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomic_theme::{ColorScheme, Hsl};
    use pretty_assertions::assert_eq;

    const CUSTOM: &str = r#"
[theme]
default = "mint"
legacy_lightness = true

[storage]
path = "state/themes.json"

[preview]
base_url = "https://loomic.dev"

[[themes]]
key = "mint"
name = "Mint"

[themes.light]
primary = "160 60% 45%"
secondary = "180 50% 40%"
accent = "140 70% 50%"
background = "160 20% 97%"
foreground = "160 40% 10%"

[themes.dark]
primary = "160 60% 55%"
secondary = "180 50% 50%"
accent = "140 70% 60%"
background = "160 30% 8%"
foreground = "160 10% 94%"
"#;

    #[test]
    fn empty_file_uses_defaults() {
        let config: LoomicConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.default, "default");
        assert_eq!(config.theme.storage_key, "loomic-theme");
        assert!(!config.theme.legacy_lightness);
        assert_eq!(config.storage.path, PathBuf::from(".loomic/storage.json"));
        assert_eq!(config.preview.component, "button");
        assert_eq!(config.lightness_policy(), LightnessPolicy::Clamp);
    }

    #[test]
    fn custom_theme_becomes_default() {
        let config: LoomicConfig = toml::from_str(CUSTOM).unwrap();
        let registry = config.registry().unwrap();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.keys().last(), Some("mint"));
        assert_eq!(registry.resolve(Some("nonexistent-theme")).key, "mint");
        assert_eq!(
            registry.default_theme().colors(ColorScheme::Dark).primary,
            Hsl::new(160.0, 60.0, 55.0)
        );
        assert_eq!(config.lightness_policy(), LightnessPolicy::Legacy);
        assert_eq!(config.context_options().policy, LightnessPolicy::Legacy);
    }

    #[test]
    fn unknown_default_is_rejected() {
        let config: LoomicConfig = toml::from_str("[theme]\ndefault = \"nope\"").unwrap();
        assert!(config.registry().is_err());
    }

    #[test]
    fn duplicate_custom_key_is_rejected() {
        let src = CUSTOM.replace("key = \"mint\"", "key = \"ocean\"");
        let config: LoomicConfig = toml::from_str(&src).unwrap();
        assert!(config.registry().is_err());
    }

    #[test]
    fn load_from_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), CUSTOM).unwrap();

        let from_dir = LoomicConfig::load_from(dir.path()).unwrap();
        let from_file = LoomicConfig::load(Some(&dir.path().join(CONFIG_FILE_NAME))).unwrap();
        assert_eq!(from_dir.theme.default, "mint");
        assert_eq!(from_file.preview.base_url, "https://loomic.dev");

        let missing = LoomicConfig::load_from(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config: LoomicConfig = toml::from_str(CUSTOM).unwrap();
        let reparsed: LoomicConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed.themes, config.themes);
        assert_eq!(reparsed.storage.path, config.storage.path);
    }
}
