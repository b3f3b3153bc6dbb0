//! Theme records and color schemes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::tokens::Hsl;

/// Light or dark rendering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(ThemeError::InvalidScheme(s.to_string())),
        }
    }
}

/// User-facing display mode choice.
///
/// `System` defers to whatever scheme the host reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ModePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ModePreference::Light => "light",
            ModePreference::Dark => "dark",
            ModePreference::System => "system",
        }
    }

    /// Concrete scheme for this preference given the host's scheme
    pub fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            ModePreference::Light => ColorScheme::Light,
            ModePreference::Dark => ColorScheme::Dark,
            ModePreference::System => system,
        }
    }
}

impl fmt::Display for ModePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ModePreference::Light),
            "dark" => Ok(ModePreference::Dark),
            "system" => Ok(ModePreference::System),
            _ => Err(ThemeError::InvalidScheme(s.to_string())),
        }
    }
}

impl From<ColorScheme> for ModePreference {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ModePreference::Light,
            ColorScheme::Dark => ModePreference::Dark,
        }
    }
}

/// Palette for one scheme: three brand hues plus base colors
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorSet {
    pub primary: Hsl,
    pub secondary: Hsl,
    pub accent: Hsl,
    pub background: Hsl,
    pub foreground: Hsl,
}

impl ColorSet {
    /// Named triples, for validation and display
    pub fn triples(&self) -> [(&'static str, Hsl); 5] {
        [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("background", self.background),
            ("foreground", self.foreground),
        ]
    }
}

/// A named theme with both scheme variants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Stable key used for storage and broadcast
    pub key: String,
    /// User-facing display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub light: ColorSet,
    pub dark: ColorSet,
}

impl Theme {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        light: ColorSet,
        dark: ColorSet,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            light,
            dark,
        }
    }

    /// Palette for the given scheme
    pub fn colors(&self, scheme: ColorScheme) -> &ColorSet {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Check every triple of both palettes against the nominal HSL ranges
    pub fn validate(&self) -> Result<()> {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            for (role, hsl) in self.colors(scheme).triples() {
                if let Some(detail) = hsl.range_error() {
                    return Err(ThemeError::OutOfRange {
                        theme: self.key.clone(),
                        detail: format!("{scheme} {role}: {detail}"),
                    });
                }
            }
        }
        Ok(())
    }
}
