use loomic_theme::{
    derive, ColorScheme, ColorToken, Hsl, ThemePreset, ThemeRegistry, DEFAULT_THEME_KEY,
};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec!["crimson", "default", "forest", "loomic", "midnight", "ocean", "sunset"]
    );
}

#[test]
fn preset_ids_round_trip() {
    for &preset in ThemePreset::all() {
        assert_eq!(ThemePreset::from_id(preset.id()), Some(preset));
        assert_eq!(preset.theme().key, preset.id());
        assert_eq!(preset.to_string(), preset.display_name());
    }
    assert_eq!(ThemePreset::from_id("nonexistent-theme"), None);
}

#[test]
fn presets_are_within_nominal_ranges() {
    for preset in ThemePreset::all() {
        let theme = preset.theme();
        theme
            .validate()
            .unwrap_or_else(|e| panic!("preset {preset:?} invalid: {e}"));
    }
}

#[test]
fn presets_have_distinct_light_and_dark_primary() {
    for preset in ThemePreset::all() {
        let theme = preset.theme();
        assert_ne!(
            theme.colors(ColorScheme::Light).primary,
            theme.colors(ColorScheme::Dark).primary,
            "Preset {:?} should have distinct light/dark primary colors",
            preset
        );
    }
}

#[test]
fn every_theme_and_scheme_derives_deterministically() {
    let registry = ThemeRegistry::builtin();
    for theme in registry.themes() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let colors = theme.colors(scheme);
            let first = derive(colors, scheme);
            let second = derive(colors, scheme);
            assert_eq!(first, second, "theme={} scheme={scheme}", theme.key);

            let rendered = |t: &loomic_theme::DerivedTokenSet| -> Vec<String> {
                t.entries().map(|(_, v)| v.to_string()).collect()
            };
            assert_eq!(rendered(&first), rendered(&second));
        }
    }
}

#[test]
fn subtle_lightness_is_fixed_per_scheme() {
    let registry = ThemeRegistry::builtin();
    for theme in registry.themes() {
        for (scheme, expected) in [(ColorScheme::Dark, 15.0), (ColorScheme::Light, 97.0)] {
            let tokens = derive(theme.colors(scheme), scheme);
            for token in [
                ColorToken::PrimarySubtle,
                ColorToken::SecondarySubtle,
                ColorToken::AccentSubtle,
            ] {
                assert_eq!(
                    tokens.get(token).l,
                    expected,
                    "theme={} scheme={scheme} token={token:?}",
                    theme.key
                );
            }
        }
    }
}

#[test]
fn hover_lightness_shifts_by_ten() {
    let registry = ThemeRegistry::builtin();
    for theme in registry.themes() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let colors = theme.colors(scheme);
            let tokens = derive(colors, scheme);
            let delta = if scheme.is_dark() { 10.0 } else { -10.0 };

            for (base, brand) in [
                (colors.primary, tokens.primary),
                (colors.secondary, tokens.secondary),
                (colors.accent, tokens.accent),
            ] {
                assert_eq!(brand.hover.l, base.l + delta, "theme={}", theme.key);
                assert_eq!(brand.hover.h, base.h);
                assert_eq!(brand.hover.s, base.s);
                assert_eq!(brand.subtle.h, base.h);
                assert_eq!(brand.subtle.s, base.s);
            }
        }
    }
}

#[test]
fn unknown_key_resolves_to_default_tokens() {
    let registry = ThemeRegistry::builtin();
    let fallback = registry.resolve(Some("nonexistent-theme"));
    assert_eq!(fallback.key, DEFAULT_THEME_KEY);

    let default = registry.lookup(DEFAULT_THEME_KEY).unwrap();
    for scheme in [ColorScheme::Light, ColorScheme::Dark] {
        assert_eq!(
            derive(fallback.colors(scheme), scheme),
            derive(default.colors(scheme), scheme)
        );
    }
}

#[test]
fn default_theme_light_primary_scenario() {
    let registry = ThemeRegistry::builtin();
    let tokens = derive(
        registry.default_theme().colors(ColorScheme::Light),
        ColorScheme::Light,
    );
    assert_eq!(tokens.get(ColorToken::Primary), Hsl::new(85.0, 75.0, 55.0));
    assert_eq!(tokens.get(ColorToken::PrimaryHover), Hsl::new(85.0, 75.0, 45.0));
    assert_eq!(tokens.get(ColorToken::PrimarySubtle), Hsl::new(85.0, 75.0, 97.0));
    assert_eq!(tokens.get(ColorToken::PrimaryHover).to_string(), "85 75% 45%");
}
