//! Color tokens for theming

use crate::theme::ColorScheme;
use crate::tokens::Hsl;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum ColorToken {
    // Base colors
    Background,
    Foreground,

    // Brand colors
    Primary,
    PrimaryHover,
    PrimarySubtle,
    Secondary,
    SecondaryHover,
    SecondarySubtle,
    Accent,
    AccentHover,
    AccentSubtle,

    // Surface colors (derived from background)
    Card,
    Surface,
    SurfaceHover,
}

impl ColorToken {
    /// Every token, in style-scope write order
    pub const ALL: [ColorToken; 14] = [
        ColorToken::Background,
        ColorToken::Foreground,
        ColorToken::Primary,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::Card,
        ColorToken::Surface,
        ColorToken::SurfaceHover,
        ColorToken::PrimaryHover,
        ColorToken::PrimarySubtle,
        ColorToken::SecondaryHover,
        ColorToken::SecondarySubtle,
        ColorToken::AccentHover,
        ColorToken::AccentSubtle,
    ];

    /// Brand tokens only, in style-scope write order
    pub const BRAND: [ColorToken; 9] = [
        ColorToken::Primary,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::PrimaryHover,
        ColorToken::PrimarySubtle,
        ColorToken::SecondaryHover,
        ColorToken::SecondarySubtle,
        ColorToken::AccentHover,
        ColorToken::AccentSubtle,
    ];

    /// Token name as used in style scopes (without the `--clr-` prefix)
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::Foreground => "foreground",
            ColorToken::Primary => "primary",
            ColorToken::PrimaryHover => "primary-hover",
            ColorToken::PrimarySubtle => "primary-subtle",
            ColorToken::Secondary => "secondary",
            ColorToken::SecondaryHover => "secondary-hover",
            ColorToken::SecondarySubtle => "secondary-subtle",
            ColorToken::Accent => "accent",
            ColorToken::AccentHover => "accent-hover",
            ColorToken::AccentSubtle => "accent-subtle",
            ColorToken::Card => "card",
            ColorToken::Surface => "surface",
            ColorToken::SurfaceHover => "surface-hover",
        }
    }

    /// Look a token up by its scope name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }

    /// Whether the token belongs to a brand hue (primary/secondary/accent)
    pub fn is_brand(self) -> bool {
        Self::BRAND.contains(&self)
    }
}

/// One brand hue and its derived variants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrandTokens {
    pub base: Hsl,
    pub hover: Hsl,
    pub subtle: Hsl,
}

/// Full set of computed color tokens for one (theme, scheme) pair.
///
/// Never persisted; rebuild it with [`crate::derive`] whenever the theme or
/// the scheme changes.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedTokenSet {
    /// Scheme the tokens were derived for
    pub scheme: ColorScheme,

    // Base colors
    pub background: Hsl,
    pub foreground: Hsl,

    // Brand colors
    pub primary: BrandTokens,
    pub secondary: BrandTokens,
    pub accent: BrandTokens,

    // Surface colors
    pub card: Hsl,
    pub surface: Hsl,
    pub surface_hover: Hsl,
}

impl DerivedTokenSet {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Hsl {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Foreground => self.foreground,
            ColorToken::Primary => self.primary.base,
            ColorToken::PrimaryHover => self.primary.hover,
            ColorToken::PrimarySubtle => self.primary.subtle,
            ColorToken::Secondary => self.secondary.base,
            ColorToken::SecondaryHover => self.secondary.hover,
            ColorToken::SecondarySubtle => self.secondary.subtle,
            ColorToken::Accent => self.accent.base,
            ColorToken::AccentHover => self.accent.hover,
            ColorToken::AccentSubtle => self.accent.subtle,
            ColorToken::Card => self.card,
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceHover => self.surface_hover,
        }
    }

    /// All `(token, value)` pairs, in write order
    pub fn entries(&self) -> impl Iterator<Item = (ColorToken, Hsl)> + '_ {
        ColorToken::ALL
            .into_iter()
            .map(move |token| (token, self.get(token)))
    }

    /// Brand `(token, value)` pairs, in write order
    pub fn brand_entries(&self) -> impl Iterator<Item = (ColorToken, Hsl)> + '_ {
        ColorToken::BRAND
            .into_iter()
            .map(move |token| (token, self.get(token)))
    }
}
