//! Token derivation
//!
//! Turns a palette ([`ColorSet`]) and a [`ColorScheme`] into the full
//! [`DerivedTokenSet`]. This is the only place the offset rules live; every
//! surface that needs tokens (owner, followers, CLI) calls into it.
//!
//! Per brand hue `(h, s, l)`:
//! - hover: `l + 10` in dark mode, `l - 10` in light mode
//! - subtle: `15` in dark mode, `97` in light mode, regardless of `l`
//!
//! Surface tones are offsets from the background lightness:
//! card/surface/surface-hover at `+3/+5/+7` (dark) or `-2/-4/-6` (light).
//!
//! Hue and saturation are always carried through unchanged.

use crate::theme::{ColorScheme, ColorSet};
use crate::tokens::{BrandTokens, DerivedTokenSet, Hsl};

/// Hover lightness shift in percentage points
pub const HOVER_DELTA: f64 = 10.0;
/// Subtle lightness in dark mode
pub const SUBTLE_LIGHTNESS_DARK: f64 = 15.0;
/// Subtle lightness in light mode
pub const SUBTLE_LIGHTNESS_LIGHT: f64 = 97.0;
/// Card/surface/surface-hover offsets from background lightness in dark mode
pub const SURFACE_OFFSETS_DARK: [f64; 3] = [3.0, 5.0, 7.0];
/// Card/surface/surface-hover offsets from background lightness in light mode
pub const SURFACE_OFFSETS_LIGHT: [f64; 3] = [-2.0, -4.0, -6.0];

/// What to do with derived lightness that leaves `[0, 100]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightnessPolicy {
    /// Clamp derived lightness into `[0, 100]`
    #[default]
    Clamp,
    /// Keep the raw arithmetic, e.g. `l = 95` in dark mode hovers at `105`
    Legacy,
}

impl LightnessPolicy {
    fn apply(self, hsl: Hsl) -> Hsl {
        match self {
            LightnessPolicy::Clamp => hsl.with_lightness(hsl.l.clamp(0.0, 100.0)),
            LightnessPolicy::Legacy => hsl,
        }
    }
}

/// Derive the token set with the default (clamping) policy
pub fn derive(colors: &ColorSet, scheme: ColorScheme) -> DerivedTokenSet {
    derive_with(colors, scheme, LightnessPolicy::default())
}

/// Derive the token set with an explicit lightness policy
pub fn derive_with(colors: &ColorSet, scheme: ColorScheme, policy: LightnessPolicy) -> DerivedTokenSet {
    let [card, surface, surface_hover] = surface_offsets(scheme)
        .map(|offset| policy.apply(colors.background.shift_lightness(offset)));

    DerivedTokenSet {
        scheme,
        background: colors.background,
        foreground: colors.foreground,
        primary: brand(colors.primary, scheme, policy),
        secondary: brand(colors.secondary, scheme, policy),
        accent: brand(colors.accent, scheme, policy),
        card,
        surface,
        surface_hover,
    }
}

/// Hover and subtle variants for one brand hue
pub fn brand(base: Hsl, scheme: ColorScheme, policy: LightnessPolicy) -> BrandTokens {
    let hover_delta = match scheme {
        ColorScheme::Dark => HOVER_DELTA,
        ColorScheme::Light => -HOVER_DELTA,
    };

    BrandTokens {
        base,
        hover: policy.apply(base.shift_lightness(hover_delta)),
        subtle: base.with_lightness(subtle_lightness(scheme)),
    }
}

pub fn subtle_lightness(scheme: ColorScheme) -> f64 {
    match scheme {
        ColorScheme::Dark => SUBTLE_LIGHTNESS_DARK,
        ColorScheme::Light => SUBTLE_LIGHTNESS_LIGHT,
    }
}

fn surface_offsets(scheme: ColorScheme) -> [f64; 3] {
    match scheme {
        ColorScheme::Dark => SURFACE_OFFSETS_DARK,
        ColorScheme::Light => SURFACE_OFFSETS_LIGHT,
    }
}
