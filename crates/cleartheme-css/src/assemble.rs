//! Assembly of the final `theme.css`.
//!
//! Chrome silently drops all but one stylesheet when a content script lists
//! several, so everything is merged into a single file. Order is fixed:
//!
//! 1. [`MARKER`], proving the extension stylesheet loaded
//! 2. root custom properties, normalized
//! 3. the base stylesheet, normalized
//! 4. design-token overrides, as generated
//! 5. bridge rules, as generated
//!
//! Sections are separated by a blank line.

use crate::error::Result;
use crate::generate::{
    generate_bridge_rules, generate_design_tokens, generate_root_properties, Section,
    StylesheetFragment,
};
use crate::normalize::count_important;
use crate::palette::Palette;
use crate::scheme::SchemeSet;

/// Leading block of every assembled stylesheet. The content script checks
/// for `--clear-ext-loaded` to detect that the CSS was injected.
pub const MARKER: &str = "/* clear-theme-marker */\nhtml { --clear-ext-loaded: 1 !important; }\n\n";

const SECTION_SEPARATOR: &str = "\n\n";

/// Concatenates fragments in [`Section::ORDER`] after the marker.
///
/// Fragments are rendered through [`StylesheetFragment::render`], so the
/// normalized sections get `!important` here. Fragments are placed by their
/// section, not by slice order; a missing section contributes an empty string.
pub fn assemble(fragments: &[StylesheetFragment]) -> String {
    let body: Vec<String> = Section::ORDER
        .iter()
        .map(|section| {
            fragments
                .iter()
                .filter(|f| f.section() == *section)
                .map(StylesheetFragment::render)
                .collect::<Vec<_>>()
                .join(SECTION_SEPARATOR)
        })
        .collect();

    let mut css = String::from(MARKER);
    css.push_str(&body.join(SECTION_SEPARATOR));
    css
}

/// Text inputs of the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSources<'a> {
    /// Content of the color-scheme file.
    pub color_ini: &'a str,
    /// Content of the base stylesheet.
    pub base_css: &'a str,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCss {
    /// The assembled stylesheet.
    pub css: String,
    /// Name of the scheme the colors came from.
    pub scheme_name: String,
    /// Number of schemes declared in the color file.
    pub scheme_count: usize,
}

impl ThemeCss {
    /// Number of `!important` modifiers in the stylesheet.
    pub fn important_count(&self) -> usize {
        count_important(&self.css)
    }
}

/// Generates the per-section fragments for a parsed scheme set.
pub fn generate_fragments(schemes: &SchemeSet, base_css: &str) -> Result<Vec<StylesheetFragment>> {
    let scheme = schemes.active()?;
    let palette = Palette::new(scheme);

    Ok(vec![
        StylesheetFragment::new(Section::Colors, generate_root_properties(scheme)?),
        StylesheetFragment::new(Section::Base, base_css),
        StylesheetFragment::new(Section::DesignTokens, generate_design_tokens(&palette)?),
        StylesheetFragment::new(Section::Bridge, generate_bridge_rules(&palette)?),
    ])
}

/// Runs the whole pipeline: parse, generate, normalize, assemble.
pub fn build_theme_css(sources: &ThemeSources<'_>) -> Result<ThemeCss> {
    let schemes = SchemeSet::parse(sources.color_ini)?;
    let fragments = generate_fragments(&schemes, sources.base_css)?;
    let scheme_name = schemes.active()?.name().to_string();
    tracing::debug!(
        scheme = %scheme_name,
        schemes = schemes.len(),
        "generated stylesheet fragments"
    );

    Ok(ThemeCss {
        css: assemble(&fragments),
        scheme_name,
        scheme_count: schemes.len(),
    })
}
