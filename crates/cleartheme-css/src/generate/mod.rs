//! CSS generators.
//!
//! Three independent generators turn the active color scheme into stylesheet
//! text:
//!
//! | Generator | Output | Forcing modifiers |
//! |-----------|--------|-------------------|
//! | [`generate_root_properties`] | `:root` custom properties (`--spice-*`) | added later by the normalizer |
//! | [`generate_design_tokens`] | Encore design-token overrides | carried already |
//! | [`generate_bridge_rules`] | web player bridge rules | carried already |
//!
//! The root-properties output is always passed through
//! [`add_important`](crate::add_important). The two fixed catalogues are
//! hand-authored with `!important` on every declaration and are emitted as-is.

mod bridge;
mod root;
mod tokens;

pub use bridge::{generate_bridge_rules, BridgeContext, BRIDGE_TEMPLATE};
pub use root::generate_root_properties;
pub use tokens::{generate_design_tokens, TokenValue, DESIGN_TOKENS, DESIGN_TOKEN_SELECTORS};

use std::fmt;

/// Logical section of the assembled stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Root custom properties from the active scheme.
    Colors,
    /// The hand-written base stylesheet.
    Base,
    /// Encore design-token overrides.
    DesignTokens,
    /// Web player bridge rules.
    Bridge,
}

impl Section {
    /// Assembly order of the final stylesheet.
    pub const ORDER: [Section; 4] = [
        Section::Colors,
        Section::Base,
        Section::DesignTokens,
        Section::Bridge,
    ];

    /// Whether this section goes through the importance normalizer.
    pub fn is_normalized(self) -> bool {
        matches!(self, Section::Colors | Section::Base)
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Colors => "colors",
            Section::Base => "base",
            Section::DesignTokens => "design-tokens",
            Section::Bridge => "bridge",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stylesheet text tagged with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetFragment {
    section: Section,
    text: String,
}

impl StylesheetFragment {
    pub fn new(section: Section, text: impl Into<String>) -> Self {
        Self {
            section,
            text: text.into(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text as it appears in the assembled stylesheet:
    /// normalized for [`Section::is_normalized`] sections, untouched otherwise.
    pub fn render(&self) -> String {
        if self.section.is_normalized() {
            crate::normalize::add_important(&self.text)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_and_normalization() {
        let normalized: Vec<_> = Section::ORDER
            .iter()
            .map(|s| (s.name(), s.is_normalized()))
            .collect();
        assert_eq!(
            normalized,
            vec![
                ("colors", true),
                ("base", true),
                ("design-tokens", false),
                ("bridge", false),
            ]
        );
    }

    #[test]
    fn test_fragment_render() {
        let base = StylesheetFragment::new(Section::Base, "a {\n  color: red;\n}");
        assert_eq!(base.render(), "a {\n  color: red !important;\n}");

        let bridge = StylesheetFragment::new(Section::Bridge, "a {\n  color: red;\n}");
        assert_eq!(bridge.render(), "a {\n  color: red;\n}");
    }
}
