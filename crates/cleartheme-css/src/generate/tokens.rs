//! Encore design-token overrides.
//!
//! The Spotify web player styles itself through Encore tokens
//! (`--background-base`, `--text-base`, ...) rather than the `--spice-*`
//! variables Spicetify provides on desktop. Overriding the tokens makes the
//! player's own CSS pick up the scheme colors.

use crate::error::Result;
use crate::palette::Palette;

/// How a token's value is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    /// The scheme color for the key, as `#hex`.
    Hex(&'static str),
    /// The scheme color for the key, as `rgba(R,G,B, alpha)`.
    Rgba(&'static str, &'static str),
    /// A fixed CSS value independent of the scheme.
    Literal(&'static str),
}

impl TokenValue {
    fn resolve(&self, palette: &Palette<'_>) -> Result<String> {
        match self {
            TokenValue::Hex(key) => palette.css_hex(key),
            TokenValue::Rgba(key, alpha) => Ok(format!("rgba({}, {})", palette.rgb(key)?, alpha)),
            TokenValue::Literal(css) => Ok((*css).to_string()),
        }
    }
}

/// Selectors the overrides are scoped to.
pub const DESIGN_TOKEN_SELECTORS: &[&str] = &[
    ".encore-dark-theme",
    ".encore-dark-theme .encore-base-set",
    ".encore-dark-theme .encore-inverted-dark-set",
];

/// The token catalogue, in emission order.
pub const DESIGN_TOKENS: &[(&str, TokenValue)] = &[
    ("--background-base", TokenValue::Hex("main")),
    ("--background-highlight", TokenValue::Hex("highlight")),
    ("--background-press", TokenValue::Hex("main")),
    ("--background-elevated-base", TokenValue::Hex("main-elevated")),
    ("--background-elevated-highlight", TokenValue::Hex("highlight-elevated")),
    ("--background-elevated-press", TokenValue::Hex("highlight")),
    ("--background-tinted-base", TokenValue::Rgba("text", "0.04")),
    ("--background-tinted-highlight", TokenValue::Rgba("text", "0.07")),
    ("--background-tinted-press", TokenValue::Rgba("text", "0.03")),
    ("--text-base", TokenValue::Hex("text")),
    ("--text-subdued", TokenValue::Hex("subtext")),
    ("--text-bright-accent", TokenValue::Hex("accent")),
    ("--text-positive", TokenValue::Hex("accent")),
    ("--text-negative", TokenValue::Literal("#f15e6c")),
    ("--text-warning", TokenValue::Literal("#ffa42b")),
    ("--essential-base", TokenValue::Hex("text")),
    ("--essential-subdued", TokenValue::Hex("subtext")),
    ("--essential-bright-accent", TokenValue::Hex("accent")),
    ("--essential-negative", TokenValue::Literal("#e91429")),
    ("--essential-positive", TokenValue::Hex("accent")),
    ("--decorative-base", TokenValue::Hex("accent")),
    ("--decorative-subdued", TokenValue::Hex("subtext")),
];

/// Renders the design-token override block.
///
/// Every declaration carries `!important`; this output is not normalized.
pub fn generate_design_tokens(palette: &Palette<'_>) -> Result<String> {
    let mut lines = vec![
        String::new(),
        "/* ===== Encore design system overrides (web player) ===== */".to_string(),
    ];

    let last = DESIGN_TOKEN_SELECTORS.len() - 1;
    for (i, selector) in DESIGN_TOKEN_SELECTORS.iter().enumerate() {
        let sep = if i == last { " {" } else { "," };
        lines.push(format!("{}{}", selector, sep));
    }

    for (property, value) in DESIGN_TOKENS {
        lines.push(format!(
            "  {}: {} !important;",
            property,
            value.resolve(palette)?
        ));
    }
    lines.push("}".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::ColorScheme;

    fn palette_of(entries: &[(&str, &str)]) -> ColorScheme {
        ColorScheme::new(
            "dark",
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_catalogue_size() {
        assert_eq!(DESIGN_TOKENS.len(), 22);
    }

    #[test]
    fn test_every_declaration_is_forced() {
        let scheme = palette_of(&[]);
        let css = generate_design_tokens(&Palette::new(&scheme)).unwrap();
        let declarations: Vec<_> = css.lines().filter(|l| l.starts_with("  --")).collect();
        assert_eq!(declarations.len(), DESIGN_TOKENS.len());
        assert!(declarations.iter().all(|l| l.ends_with(" !important;")));
    }

    #[test]
    fn test_selector_block() {
        let scheme = palette_of(&[]);
        let css = generate_design_tokens(&Palette::new(&scheme)).unwrap();
        assert!(css.contains(
            ".encore-dark-theme,\n\
             .encore-dark-theme .encore-base-set,\n\
             .encore-dark-theme .encore-inverted-dark-set {\n"
        ));
        assert!(css.ends_with("\n}"));
    }

    #[test]
    fn test_fallbacks_when_scheme_is_empty() {
        let scheme = palette_of(&[]);
        let css = generate_design_tokens(&Palette::new(&scheme)).unwrap();
        assert!(css.contains("  --background-base: #0a0a0a !important;"));
        assert!(css.contains("  --text-subdued: #737373 !important;"));
        assert!(css.contains("  --background-tinted-base: rgba(250,250,250, 0.04) !important;"));
        assert!(css.contains("  --text-negative: #f15e6c !important;"));
    }

    #[test]
    fn test_scheme_values_override_fallbacks() {
        let scheme = palette_of(&[("main", "111111"), ("text", "#000")]);
        let css = generate_design_tokens(&Palette::new(&scheme)).unwrap();
        assert!(css.contains("  --background-base: #111111 !important;"));
        assert!(css.contains("  --background-press: #111111 !important;"));
        assert!(css.contains("  --text-base: #000 !important;"));
        assert!(css.contains("  --background-tinted-press: rgba(0,0,0, 0.03) !important;"));
    }

    #[test]
    fn test_invalid_text_color_fails() {
        let scheme = palette_of(&[("text", "zzz")]);
        assert!(generate_design_tokens(&Palette::new(&scheme)).is_err());
    }
}
