//! Web player bridge rules.
//!
//! The web player has a different element structure than the desktop client
//! Spicetify themes target (`<aside>` instead of `<footer>`, Encore progress
//! bars instead of `x-progressBar-*`, no `main-yourLibraryX-*` classes).
//! The bridge catalogue re-creates the desktop look using selectors that stay
//! stable across web deploys: element IDs, `data-testid` and
//! `data-encore-id` attributes.
//!
//! The catalogue lives in `bridge.css`, a MiniJinja template whose only
//! placeholders are colors looked up through [`Palette`]. Decorative
//! variants are gated by classes the content script toggles on `<body>`:
//!
//! | Class | Effect |
//! |-------|--------|
//! | `clear-thick-bars` | full-height progress and volume bars |
//! | `clear-nyan-cat` | rainbow progress fill with the Nyan Cat handle |
//! | `clear-sonic` | dancing character above the progress bar |
//! | `clear-paused` + `clear-pause-dim` | dims the decorations while paused |

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Result, ThemeError};
use crate::palette::Palette;

/// Template source of the bridge catalogue.
pub const BRIDGE_TEMPLATE: &str = include_str!("bridge.css");

const TEMPLATE_NAME: &str = "bridge.css";

const NYAN_BACKGROUND_GIF: &str = include_str!("../../assets/nyan-cat-background.gif.b64");
const NYAN_SLIDER_GIF: &str = include_str!("../../assets/nyan-cat-slider.gif.b64");

static ENV: Lazy<std::result::Result<Environment<'static>, minijinja::Error>> =
    Lazy::new(|| build_environment(BRIDGE_TEMPLATE));

fn build_environment(
    source: &'static str,
) -> std::result::Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env.add_template(TEMPLATE_NAME, source)?;
    Ok(env)
}

/// Values substituted into the bridge template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeContext {
    pub main: String,
    pub text: String,
    pub accent: String,
    pub border: String,
    pub card: String,
    pub rgb_text: String,
    pub rgb_card: String,
    pub rgb_accent: String,
    pub nyan_background: String,
    pub nyan_slider: String,
}

impl BridgeContext {
    /// Looks up every color the catalogue needs.
    pub fn from_palette(palette: &Palette<'_>) -> Result<Self> {
        Ok(Self {
            main: palette.css_hex("main")?,
            text: palette.css_hex("text")?,
            accent: palette.css_hex("accent")?,
            border: palette.css_hex("border")?,
            card: palette.css_hex("card")?,
            rgb_text: palette.rgb("text")?,
            rgb_card: palette.rgb("card")?,
            rgb_accent: palette.rgb("accent")?,
            nyan_background: gif_url(NYAN_BACKGROUND_GIF),
            nyan_slider: gif_url(NYAN_SLIDER_GIF),
        })
    }
}

fn gif_url(base64: &str) -> String {
    format!("url(\"data:image/gif;base64,{}\")", base64.trim())
}

/// Renders the bridge catalogue for the active scheme.
///
/// Every declaration carries `!important`; this output is not normalized.
pub fn generate_bridge_rules(palette: &Palette<'_>) -> Result<String> {
    let context = BridgeContext::from_palette(palette)?;
    let env = ENV
        .as_ref()
        .map_err(|e| ThemeError::Template(e.to_string()))?;
    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::ColorScheme;

    fn render(entries: &[(&str, &str)]) -> String {
        let scheme = ColorScheme::new(
            "dark",
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        generate_bridge_rules(&Palette::new(&scheme)).unwrap()
    }

    #[test]
    fn test_template_syntax_error_is_kept() {
        let err = build_environment("a {\n  color: {{ text ;\n}").unwrap_err();
        assert_eq!(err.kind(), minijinja::ErrorKind::SyntaxError);

        let theme_err = ThemeError::from(err);
        assert_eq!(theme_err.stage(), "css generation");
        assert!(theme_err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_bundled_template_compiles() {
        assert!(ENV.is_ok());
    }

    #[test]
    fn test_template_has_no_unresolved_placeholders() {
        let css = render(&[]);
        assert!(!css.contains("{{"));
        assert!(!css.contains("}}"));
    }

    #[test]
    fn test_fallback_colors() {
        let css = render(&[]);
        assert!(css.contains("#main-view {\n  border: 1px solid #262626 !important;"));
        assert!(css.contains("  background-color: #0a0a0a !important;"));
        assert!(css.contains("  --section-background-base: #171717 !important;"));
        assert!(css.contains("  --fg-color: rgba(250,250,250, 1) !important;"));
    }

    #[test]
    fn test_scheme_colors() {
        let css = render(&[("border", "333"), ("accent", "#ff0000"), ("card", "101010")]);
        assert!(css.contains("border: 1px solid #333 !important;"));
        assert!(css.contains("  background-color: #ff0000 !important;"));
        assert!(css.contains("  --bg-color: rgba(255,0,0, 0.125) !important;"));
        assert!(css.contains("  background-color: rgba(16,16,16, 0.5) !important;"));
    }

    #[test]
    fn test_gated_variants_present() {
        let css = render(&[]);
        assert!(css.contains("body.clear-thick-bars [data-testid=\"playback-progressbar\"] {"));
        assert!(css.contains("body.clear-nyan-cat [data-testid=\"now-playing-bar\"]"));
        assert!(css.contains("body.clear-sonic [data-testid=\"playback-progressbar\"]::before {"));
        assert!(css.contains("body.clear-paused.clear-pause-dim.clear-sonic"));
    }

    #[test]
    fn test_gif_data_uris_are_embedded() {
        let css = render(&[]);
        assert!(css.contains("background-image: url(\"data:image/gif;base64,R0lGODlhMAAM"));
        assert!(css.contains("background-image: url(\"data:image/gif;base64,R0lGODlhIgAV"));
        assert!(!css.contains("base64,\n"));
    }

    #[test]
    fn test_every_declaration_is_forced() {
        let css = render(&[]);
        let mut in_comment = false;
        for line in css.lines() {
            let t = line.trim();
            if t.starts_with("/*") {
                in_comment = !t.ends_with("*/");
                continue;
            }
            if in_comment || t.is_empty() || t.ends_with('{') || t.ends_with(',') || t == "}" {
                continue;
            }
            assert!(t.ends_with("!important;"), "unforced declaration: {}", line);
        }
    }

    #[test]
    fn test_output_framing() {
        let css = render(&[]);
        assert!(css.starts_with("\n/* ===== Web player bridge CSS (stable selectors) ===== */\n"));
        assert!(css.ends_with("  padding: 0 1.5rem !important;\n}\n"));
    }

    #[test]
    fn test_invalid_color_fails() {
        let scheme = ColorScheme::new("dark", vec![("card".into(), "12345".into())]);
        assert!(generate_bridge_rules(&Palette::new(&scheme)).is_err());
    }
}
