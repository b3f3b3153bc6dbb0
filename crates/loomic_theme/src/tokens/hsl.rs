//! HSL color triples
//!
//! Every palette entry and every derived token is an [`Hsl`] value. The wire
//! form is the bare CSS-variable body `"<h> <s>% <l>%"` (for example
//! `"200 100% 55%"`), which stylesheets wrap as `hsl(var(--clr-primary))`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, ThemeError};

/// Hue/saturation/lightness triple.
///
/// Hue is in degrees, saturation and lightness in percent. Components are
/// `f64` so formatted output matches palette literals such as `222.2` or
/// `4.9` exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Same hue and saturation, different lightness
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Shift lightness by `delta` percentage points (may leave the nominal range)
    pub fn shift_lightness(self, delta: f64) -> Self {
        self.with_lightness(self.l + delta)
    }

    /// Clamp saturation and lightness into `[0, 100]`
    pub fn clamped(self) -> Self {
        Self {
            h: self.h,
            s: self.s.clamp(0.0, 100.0),
            l: self.l.clamp(0.0, 100.0),
        }
    }

    /// Hue in `[0, 360)`, saturation and lightness in `[0, 100]`
    pub fn is_valid(&self) -> bool {
        self.range_error().is_none()
    }

    /// Describe the first out-of-range component, if any
    pub(crate) fn range_error(&self) -> Option<String> {
        if !(0.0..360.0).contains(&self.h) {
            return Some(format!("hue {} not in [0, 360)", self.h));
        }
        if !(0.0..=100.0).contains(&self.s) {
            return Some(format!("saturation {} not in [0, 100]", self.s));
        }
        if !(0.0..=100.0).contains(&self.l) {
            return Some(format!("lightness {} not in [0, 100]", self.l));
        }
        None
    }

    /// CSS color function form, e.g. `hsl(200 100% 55%)`
    pub fn to_css(&self) -> String {
        format!("hsl({self})")
    }

    /// Parse the `"<h> <s>% <l>%"` form. The `%` signs are optional.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || ThemeError::InvalidHsl(text.to_string());

        let mut parts = text.split_whitespace();
        let (Some(h), Some(s), Some(l), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let number = |part: &str| -> Result<f64> {
            let value: f64 = part
                .strip_suffix('%')
                .unwrap_or(part)
                .parse()
                .map_err(|_| invalid())?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(invalid())
            }
        };

        if h.ends_with('%') {
            return Err(invalid());
        }

        Ok(Self::new(number(h)?, number(s)?, number(l)?))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

impl FromStr for Hsl {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hsl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
