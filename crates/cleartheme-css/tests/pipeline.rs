//! End-to-end tests for the stylesheet pipeline.

use cleartheme_css::{
    add_important, build_theme_css, generate_root_properties, SchemeSet, ThemeError,
    ThemeSources, MARKER,
};
use insta::assert_snapshot;

const COLOR_INI: &str = "\
[dark]
text               = fafafa
subtext            = 737373
main               = 0a0a0a
main-elevated      = 171717
highlight          = 171717
highlight-elevated = 262626
accent             = fafafa
card               = 171717
border             = 262626

[light]
text = 0a0a0a
main = fafafa
";

const USER_CSS: &str = "\
/* Clear theme
 * base styles: keep; these lines untouched
 */
.Root__top-container {
  background-color: var(--spice-main);
  gap: 0.5rem;
}

@media (max-width: 800px) {
  .Root__nav-bar {
    display: none !important;
  }
}
";

#[test]
fn root_properties_then_normalized() {
    let schemes = SchemeSet::parse("[dark]\ntext=fafafa\n").unwrap();
    let css = generate_root_properties(schemes.active().unwrap()).unwrap();

    assert!(css.contains(":root {"));
    assert!(css.contains("--spice-text: #fafafa;"));
    assert!(css.contains("--spice-rgb-text: 250,250,250;"));

    let normalized = add_important(&css);
    assert!(normalized.contains("--spice-text: #fafafa !important;"));
    assert!(normalized.contains("--spice-rgb-text: 250,250,250 !important;"));
    // Header comment and braces are untouched.
    assert!(normalized.starts_with("/* Auto-generated from color.ini [dark] */\n:root {\n"));
    assert!(normalized.ends_with("\n}"));
}

#[test]
fn base_stylesheet_examples() {
    assert_eq!(add_important("color: red;"), "color: red !important;");
    assert_eq!(add_important("/* color: red; */"), "/* color: red; */");
    assert_eq!(
        add_important(r#"background: url("a;b") ;"#),
        r#"background: url("a;b")  !important;"#
    );
}

#[test]
fn full_build_section_order() {
    let theme = build_theme_css(&ThemeSources {
        color_ini: COLOR_INI,
        base_css: USER_CSS,
    })
    .unwrap();
    let css = &theme.css;

    assert!(css.starts_with(MARKER));
    let root = css.find(":root {").unwrap();
    let base = css.find(".Root__top-container {").unwrap();
    let tokens = css.find("/* ===== Encore design system overrides").unwrap();
    let bridge = css.find("/* ===== Web player bridge CSS").unwrap();
    assert!(root < base && base < tokens && tokens < bridge);
}

#[test]
fn full_build_normalizes_base_only_where_needed() {
    let theme = build_theme_css(&ThemeSources {
        color_ini: COLOR_INI,
        base_css: USER_CSS,
    })
    .unwrap();
    let css = &theme.css;

    assert!(css.contains("  background-color: var(--spice-main) !important;"));
    assert!(css.contains("  gap: 0.5rem !important;"));
    assert!(css.contains(" * base styles: keep; these lines untouched\n"));
    assert!(css.contains("    display: none !important;\n"));
    assert!(!css.contains("!important !important"));
}

#[test]
fn full_build_uses_dark_scheme() {
    let theme = build_theme_css(&ThemeSources {
        color_ini: COLOR_INI,
        base_css: "",
    })
    .unwrap();

    assert_eq!(theme.scheme_name, "dark");
    assert_eq!(theme.scheme_count, 2);
    assert!(theme
        .css
        .contains("  --background-elevated-highlight: #262626 !important;"));
    assert!(theme
        .css
        .contains("/* Auto-generated from color.ini [dark] */"));
}

#[test]
fn full_build_is_deterministic() {
    let sources = ThemeSources {
        color_ini: COLOR_INI,
        base_css: USER_CSS,
    };
    let first = build_theme_css(&sources).unwrap();
    let second = build_theme_css(&sources).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_color_aborts_build() {
    let err = build_theme_css(&ThemeSources {
        color_ini: "[dark]\naccent = not-a-color\n",
        base_css: "",
    })
    .unwrap_err();

    assert_eq!(err.stage(), "color conversion");
    match err {
        ThemeError::InvalidColor { key, value, .. } => {
            assert_eq!(key.as_deref(), Some("accent"));
            assert_eq!(value, "not-a-color");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn malformed_scheme_file_aborts_build() {
    let err = build_theme_css(&ThemeSources {
        color_ini: "text = fafafa\n",
        base_css: "",
    })
    .unwrap_err();
    assert_eq!(err.stage(), "scheme parsing");
}

#[test]
fn first_declared_scheme_without_dark() {
    let theme = build_theme_css(&ThemeSources {
        color_ini: "[light]\ntext = 0a0a0a\n\n[custom]\ntext = ffffff\n",
        base_css: "",
    })
    .unwrap();
    assert_eq!(theme.scheme_name, "light");
    assert!(theme.css.contains("--spice-rgb-text: 10,10,10 !important;"));
}

#[test]
fn full_build_snapshot() {
    let theme = build_theme_css(&ThemeSources {
        color_ini: COLOR_INI,
        base_css: USER_CSS,
    })
    .unwrap();
    assert_snapshot!("assembled_theme_css", theme.css);
}
