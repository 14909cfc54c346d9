//! # Clear Theme CSS - Stylesheet Pipeline for the Web Extension
//!
//! `cleartheme-css` turns the theme's static sources (a Spicetify-style
//! `color.ini` and the hand-written `user.css`) into the single `theme.css`
//! the browser extension injects into the Spotify web player.
//!
//! ## Pipeline
//!
//! ```text
//! color.ini ──► SchemeSet ──► active scheme ──┬─► :root properties ──► add_important ─┐
//!                                            ├─► design tokens ──────────────────────┤
//!                                            └─► bridge rules ───────────────────────┤
//! user.css ──────────────────────────────────────────────────────► add_important ────┴─► assemble
//! ```
//!
//! Every step is a pure function of its input text; re-running the pipeline
//! on unchanged inputs yields byte-identical output.
//!
//! ## Core Concepts
//!
//! - [`SchemeSet`] / [`ColorScheme`]: parsed color file, order preserved
//! - [`Rgb`] / [`hex_to_rgb`]: hex colors to `R,G,B` triples
//! - [`Palette`]: scheme lookups with documented fallbacks
//! - [`add_important`]: forces `!important` onto declarations
//! - [`assemble`] / [`build_theme_css`]: the final stylesheet
//!
//! ## Quick Start
//!
//! ```rust
//! use cleartheme_css::{build_theme_css, ThemeSources};
//!
//! let theme = build_theme_css(&ThemeSources {
//!     color_ini: "[dark]\ntext = fafafa\n",
//!     base_css: ".main {\n  color: var(--spice-text);\n}",
//! })
//! .unwrap();
//!
//! assert_eq!(theme.scheme_name, "dark");
//! assert!(theme.css.contains("--spice-rgb-text: 250,250,250 !important;"));
//! assert!(theme.css.contains("color: var(--spice-text) !important;"));
//! ```

mod assemble;
mod color;
mod error;
pub mod generate;
mod normalize;
mod palette;
mod scheme;

pub use assemble::{
    assemble, build_theme_css, generate_fragments, ThemeCss, ThemeSources, MARKER,
};
pub use color::{hex_to_rgb, normalize_hex, Rgb};
pub use error::{Result, ThemeError};
pub use generate::{
    generate_bridge_rules, generate_design_tokens, generate_root_properties, Section,
    StylesheetFragment,
};
pub use normalize::{add_important, count_important, ImportanceNormalizer, ScanState, IMPORTANT};
pub use palette::{fallback, Palette, FALLBACKS};
pub use scheme::{ColorScheme, SchemeSet, DEFAULT_SECTION, PREFERRED_SCHEME};
