//! Built-in theme presets shipped with the Loomic showcase.

use std::fmt::{Display, Formatter};

use crate::theme::{ColorSet, Theme};
use crate::tokens::Hsl;

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Lime-to-cyan gradient palette, the fallback for unknown keys.
    Default,
    /// Coral and turquoise.
    CoralReef,
    /// Deep blues and cyan.
    Ocean,
    /// Peach, pink and gold.
    Sunset,
    /// Greens and earth tones.
    Forest,
    /// Berry and plum.
    BerryWine,
    /// Emerald with gold.
    EmeraldGlow,
}

impl ThemePreset {
    /// Stable preset id for storage/broadcast.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CoralReef => "loomic",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Forest => "forest",
            Self::BerryWine => "crimson",
            Self::EmeraldGlow => "midnight",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Loomic",
            Self::CoralReef => "Coral Reef",
            Self::Ocean => "Ocean",
            Self::Sunset => "Sunset Bliss",
            Self::Forest => "Forest",
            Self::BerryWine => "Berry Wine",
            Self::EmeraldGlow => "Emerald Glow",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "Vibrant gradients from lime to cyan",
            Self::CoralReef => "Warm coral and turquoise",
            Self::Ocean => "Deep blues and cyan",
            Self::Sunset => "Soft peach and warm tones",
            Self::Forest => "Natural greens and earth tones",
            Self::BerryWine => "Sophisticated berry and plum",
            Self::EmeraldGlow => "Rich emerald with gold",
        }
    }

    /// Full preset list, in menu order.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 7] = [
            ThemePreset::Default,
            ThemePreset::CoralReef,
            ThemePreset::Ocean,
            ThemePreset::Sunset,
            ThemePreset::Forest,
            ThemePreset::BerryWine,
            ThemePreset::EmeraldGlow,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    /// Build the light/dark theme record for this preset.
    pub fn theme(self) -> Theme {
        let (light, dark) = match self {
            Self::Default => (default_light(), default_dark()),
            Self::CoralReef => (coral_light(), coral_dark()),
            Self::Ocean => (ocean_light(), ocean_dark()),
            Self::Sunset => (sunset_light(), sunset_dark()),
            Self::Forest => (forest_light(), forest_dark()),
            Self::BerryWine => (berry_light(), berry_dark()),
            Self::EmeraldGlow => (emerald_light(), emerald_dark()),
        };
        Theme::new(
            self.id(),
            self.display_name(),
            self.description(),
            light,
            dark,
        )
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_theme(preset: ThemePreset) -> Theme {
    preset.theme()
}

const fn hsl(h: f64, s: f64, l: f64) -> Hsl {
    Hsl::new(h, s, l)
}

fn default_light() -> ColorSet {
    ColorSet {
        primary: hsl(85.0, 75.0, 55.0),
        secondary: hsl(175.0, 80.0, 50.0),
        accent: hsl(195.0, 85.0, 55.0),
        background: hsl(40.0, 9.0, 96.0),
        foreground: hsl(0.0, 0.0, 10.0),
    }
}

fn default_dark() -> ColorSet {
    ColorSet {
        primary: hsl(85.0, 85.0, 60.0),
        secondary: hsl(175.0, 85.0, 55.0),
        accent: hsl(195.0, 90.0, 60.0),
        background: hsl(0.0, 0.0, 3.0),
        foreground: hsl(0.0, 0.0, 95.0),
    }
}

fn coral_light() -> ColorSet {
    ColorSet {
        primary: hsl(11.0, 90.0, 62.0),
        secondary: hsl(173.0, 80.0, 40.0),
        accent: hsl(340.0, 82.0, 52.0),
        background: hsl(258.0, 15.0, 96.0),
        foreground: hsl(222.2, 84.0, 4.9),
    }
}

fn coral_dark() -> ColorSet {
    ColorSet {
        primary: hsl(11.0, 90.0, 65.0),
        secondary: hsl(173.0, 80.0, 50.0),
        accent: hsl(340.0, 82.0, 60.0),
        background: hsl(0.0, 0.0, 10.0),
        foreground: hsl(0.0, 0.0, 94.0),
    }
}

fn ocean_light() -> ColorSet {
    ColorSet {
        primary: hsl(200.0, 100.0, 45.0),
        secondary: hsl(185.0, 100.0, 40.0),
        accent: hsl(220.0, 90.0, 50.0),
        background: hsl(200.0, 18.0, 95.0),
        foreground: hsl(200.0, 100.0, 10.0),
    }
}

fn ocean_dark() -> ColorSet {
    ColorSet {
        primary: hsl(200.0, 100.0, 55.0),
        secondary: hsl(185.0, 100.0, 50.0),
        accent: hsl(220.0, 90.0, 65.0),
        background: hsl(200.0, 60.0, 8.0),
        foreground: hsl(200.0, 20.0, 94.0),
    }
}

fn sunset_light() -> ColorSet {
    ColorSet {
        primary: hsl(24.0, 85.0, 60.0),
        secondary: hsl(340.0, 75.0, 65.0),
        accent: hsl(45.0, 90.0, 55.0),
        background: hsl(20.0, 21.0, 95.0),
        foreground: hsl(15.0, 80.0, 15.0),
    }
}

fn sunset_dark() -> ColorSet {
    ColorSet {
        primary: hsl(24.0, 85.0, 65.0),
        secondary: hsl(340.0, 75.0, 70.0),
        accent: hsl(45.0, 90.0, 60.0),
        background: hsl(15.0, 40.0, 12.0),
        foreground: hsl(20.0, 30.0, 92.0),
    }
}

fn forest_light() -> ColorSet {
    ColorSet {
        primary: hsl(140.0, 60.0, 40.0),
        secondary: hsl(160.0, 50.0, 45.0),
        accent: hsl(80.0, 60.0, 50.0),
        background: hsl(140.0, 13.0, 95.0),
        foreground: hsl(140.0, 70.0, 15.0),
    }
}

fn forest_dark() -> ColorSet {
    ColorSet {
        primary: hsl(140.0, 60.0, 50.0),
        secondary: hsl(160.0, 50.0, 55.0),
        accent: hsl(80.0, 60.0, 60.0),
        background: hsl(140.0, 30.0, 10.0),
        foreground: hsl(140.0, 20.0, 92.0),
    }
}

fn berry_light() -> ColorSet {
    ColorSet {
        primary: hsl(335.0, 78.0, 48.0),
        secondary: hsl(275.0, 60.0, 50.0),
        accent: hsl(0.0, 72.0, 51.0),
        background: hsl(350.0, 17.0, 95.0),
        foreground: hsl(350.0, 80.0, 15.0),
    }
}

fn berry_dark() -> ColorSet {
    ColorSet {
        primary: hsl(335.0, 78.0, 60.0),
        secondary: hsl(275.0, 60.0, 65.0),
        accent: hsl(0.0, 72.0, 60.0),
        background: hsl(335.0, 35.0, 12.0),
        foreground: hsl(350.0, 20.0, 92.0),
    }
}

fn emerald_light() -> ColorSet {
    ColorSet {
        primary: hsl(160.0, 84.0, 39.0),
        secondary: hsl(140.0, 60.0, 40.0),
        accent: hsl(45.0, 96.0, 53.0),
        background: hsl(215.0, 16.0, 96.0),
        foreground: hsl(215.0, 80.0, 15.0),
    }
}

fn emerald_dark() -> ColorSet {
    ColorSet {
        primary: hsl(160.0, 84.0, 50.0),
        secondary: hsl(140.0, 60.0, 50.0),
        accent: hsl(45.0, 96.0, 60.0),
        background: hsl(215.0, 45.0, 8.0),
        foreground: hsl(215.0, 20.0, 92.0),
    }
}
