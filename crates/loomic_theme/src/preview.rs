//! Embedded preview surface
//!
//! Components are previewed in a sandboxed child context loaded from
//! `/preview/<component>?theme=<key>&mode=<light|dark>`. The child applies
//! brand tokens only and keeps its own base colors: in light mode it pins a
//! warm off-white background, in dark mode it defers to the scheme rules.

use tracing::debug;

use crate::registry::DEFAULT_THEME_KEY;
use crate::scope::StyleScope;
use crate::theme::ColorScheme;
use crate::tokens::{ColorToken, Hsl};

/// Background pinned by the preview in light mode
pub const PREVIEW_LIGHT_BACKGROUND: Hsl = Hsl::new(40.0, 15.0, 96.0);
/// Foreground pinned by the preview in light mode
pub const PREVIEW_LIGHT_FOREGROUND: Hsl = Hsl::new(240.0, 10.0, 10.0);

/// Theme and scheme a preview context was loaded with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewParams {
    pub theme: String,
    pub scheme: ColorScheme,
}

impl Default for PreviewParams {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_KEY.to_string(),
            scheme: ColorScheme::Dark,
        }
    }
}

impl PreviewParams {
    pub fn new(theme: impl Into<String>, scheme: ColorScheme) -> Self {
        Self {
            theme: theme.into(),
            scheme,
        }
    }

    /// Parse a query string (with or without the leading `?`).
    ///
    /// Missing or empty `theme` means the default theme; missing or empty
    /// `mode` means dark, and any other `mode` besides `dark` means light.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);
            match name {
                "theme" if !value.is_empty() => params.theme = value,
                "mode" if !value.is_empty() => {
                    params.scheme = if value == "dark" {
                        ColorScheme::Dark
                    } else {
                        ColorScheme::Light
                    }
                }
                _ => {}
            }
        }

        debug!("PreviewParams::from_query - {:?}", params);
        params
    }

    /// Query string without the leading `?`
    pub fn to_query(&self) -> String {
        format!(
            "theme={}&mode={}",
            urlencoding::encode(&self.theme),
            self.scheme.as_str()
        )
    }
}

/// Build the preview URL for `component` under `base`.
///
/// `base` may be empty (root-relative URL) or carry a trailing slash.
pub fn preview_url(base: &str, component: &str, params: &PreviewParams) -> String {
    format!(
        "{}/preview/{}?{}",
        base.trim_end_matches('/'),
        urlencoding::encode(component),
        params.to_query()
    )
}

/// Split a preview URL back into component and parameters
pub fn parse_preview_url(url: &str) -> Option<(String, PreviewParams)> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let (_, component) = path.rsplit_once("/preview/")?;
    let component = decode(component.trim_end_matches('/'));
    if component.is_empty() || component.contains('/') {
        return None;
    }
    Some((component, PreviewParams::from_query(query)))
}

/// Apply the preview context's scheme class and base colors to `scope`
pub fn apply_preview_base(scope: &mut StyleScope, scheme: ColorScheme) {
    scope.set_scheme_class(scheme);
    match scheme {
        ColorScheme::Light => {
            scope.set_token(ColorToken::Background, PREVIEW_LIGHT_BACKGROUND);
            scope.set_token(ColorToken::Foreground, PREVIEW_LIGHT_FOREGROUND);
        }
        ColorScheme::Dark => {
            for token in [ColorToken::Background, ColorToken::Foreground] {
                let name = scope.property_name(token);
                scope.remove_property(&name);
            }
        }
    }
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(|v| v.into_owned())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_defaults() {
        assert_eq!(PreviewParams::from_query(""), PreviewParams::default());
        assert_eq!(
            PreviewParams::from_query("?theme="),
            PreviewParams::new("default", ColorScheme::Dark)
        );
    }

    #[test]
    fn non_dark_mode_means_light() {
        for mode in ["light", "system", "DARK"] {
            let params = PreviewParams::from_query(&format!("theme=ocean&mode={mode}"));
            assert_eq!(params.scheme, ColorScheme::Light, "mode={mode:?}");
            assert_eq!(params.theme, "ocean");
        }
        for query in ["mode=dark", "theme=ocean&mode=", "theme=ocean&mode"] {
            assert_eq!(
                PreviewParams::from_query(query).scheme,
                ColorScheme::Dark,
                "query={query:?}"
            );
        }
    }

    #[test]
    fn builds_and_parses_urls() {
        let params = PreviewParams::new("sunset", ColorScheme::Light);
        let url = preview_url("https://loomic.dev/", "glass-morphism", &params);
        assert_eq!(
            url,
            "https://loomic.dev/preview/glass-morphism?theme=sunset&mode=light"
        );
        assert_eq!(
            parse_preview_url(&url),
            Some(("glass-morphism".to_string(), params))
        );
        assert_eq!(
            preview_url("", "mega-menu", &PreviewParams::default()),
            "/preview/mega-menu?theme=default&mode=dark"
        );
    }

    #[test]
    fn encodes_unusual_keys() {
        let params = PreviewParams::new("my theme&co", ColorScheme::Dark);
        assert_eq!(params.to_query(), "theme=my%20theme%26co&mode=dark");
        assert_eq!(PreviewParams::from_query(&params.to_query()), params);
    }

    #[test]
    fn rejects_non_preview_urls() {
        assert_eq!(parse_preview_url("/components?theme=ocean"), None);
        assert_eq!(parse_preview_url("/preview/?theme=ocean"), None);
    }

    #[test]
    fn preview_base_pins_light_and_clears_dark() {
        let mut scope = StyleScope::new();
        apply_preview_base(&mut scope, ColorScheme::Light);
        assert_eq!(scope.property("--clr-background"), Some("40 15% 96%"));
        assert_eq!(scope.property("--clr-foreground"), Some("240 10% 10%"));
        assert_eq!(scope.scheme_class(), Some(ColorScheme::Light));

        apply_preview_base(&mut scope, ColorScheme::Dark);
        assert_eq!(scope.property("--clr-background"), None);
        assert_eq!(scope.property("--clr-foreground"), None);
        assert_eq!(scope.scheme_class(), Some(ColorScheme::Dark));
    }
}
