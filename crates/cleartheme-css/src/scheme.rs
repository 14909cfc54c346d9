//! Color-scheme file parsing.
//!
//! Scheme files use the INI grammar popularized by Spicetify's `color.ini`:
//!
//! ```ini
//! ; comments start with ';' or '#'
//! [dark]
//! text       = fafafa
//! main       = 0a0a0a
//! accent:      fafafa
//!
//! [light]
//! text = 0a0a0a
//! ```
//!
//! Each section becomes a [`ColorScheme`]; the whole file becomes a
//! [`SchemeSet`]. Declaration order is preserved everywhere so that the
//! generated stylesheet is byte-identical across builds.
//!
//! # Grammar
//!
//! - Blank lines are ignored; full-line comments start with `#` or `;`.
//!   Inline comments are not recognized and stay part of the value.
//! - `[name]` opens a section. `[DEFAULT]` is special: its keys are inherited
//!   by every section that does not define them.
//! - `key = value` or `key: value`, split at the first delimiter. Keys are
//!   lower-cased; keys and values are trimmed.
//! - An indented line directly after a key continues that key's value.
//! - Duplicate sections, duplicate keys within a section, and key lines
//!   before the first section header are errors.

use std::path::Path;

use crate::error::{Result, ThemeError};

/// Name of the section whose keys are inherited by every scheme.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Name of the scheme preferred by [`SchemeSet::active`].
pub const PREFERRED_SCHEME: &str = "dark";

/// A named, ordered set of color-key to hex-value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    name: String,
    entries: Vec<(String, String)>,
}

impl ColorScheme {
    /// Creates a scheme from ordered entries.
    pub fn new(name: impl Into<String>, entries: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a color value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All schemes declared in one color file, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeSet {
    schemes: Vec<ColorScheme>,
}

impl SchemeSet {
    /// Parses scheme file content.
    ///
    /// An input without any section parses to an empty set; use
    /// [`active`](Self::active) to turn that into an error.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Parse`] naming the offending line.
    pub fn parse(content: &str) -> Result<Self> {
        Parser::default().parse(content)
    }

    /// Reads and parses a scheme file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Load`] if the file cannot be read, or a parse
    /// error carrying the file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|e| e.with_path(path))
    }

    pub fn get(&self, name: &str) -> Option<&ColorScheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// Scheme names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorScheme> {
        self.schemes.iter()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Selects the scheme used for generation: `dark` if declared, otherwise
    /// the first declared scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NoSchemes`] for an empty set.
    pub fn active(&self) -> Result<&ColorScheme> {
        self.get(PREFERRED_SCHEME)
            .or_else(|| self.schemes.first())
            .ok_or(ThemeError::NoSchemes { path: None })
    }
}

/// Single-pass line parser. Sections are collected in order and the
/// `[DEFAULT]` section is merged in at the end.
#[derive(Default)]
struct Parser {
    defaults: Vec<(String, String)>,
    sections: Vec<(String, Vec<(String, String)>)>,
    /// Index into `sections`, or `None` while inside `[DEFAULT]`.
    current: Option<Option<usize>>,
    /// Whether the previous significant line was a key, so that an indented
    /// line continues its value.
    continuable: bool,
}

impl Parser {
    fn parse(mut self, content: &str) -> Result<SchemeSet> {
        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                self.continuable = false;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(char::is_whitespace);
            if indented && self.continuable {
                self.continue_value(trimmed);
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
                let name = trimmed[1..trimmed.len() - 1].trim();
                self.open_section(name, line_no)?;
                continue;
            }

            self.add_entry(trimmed, line_no)?;
        }

        Ok(self.finish())
    }

    fn open_section(&mut self, name: &str, line: usize) -> Result<()> {
        if name.is_empty() {
            return Err(parse_error(line, "empty section name"));
        }
        self.continuable = false;

        if name == DEFAULT_SECTION {
            self.current = Some(None);
            return Ok(());
        }
        if self.sections.iter().any(|(n, _)| n == name) {
            return Err(parse_error(line, format!("duplicate section '{}'", name)));
        }
        self.sections.push((name.to_string(), Vec::new()));
        self.current = Some(Some(self.sections.len() - 1));
        Ok(())
    }

    fn add_entry(&mut self, line_text: &str, line: usize) -> Result<()> {
        let current = self.current.ok_or_else(|| {
            parse_error(line, format!("'{}' appears before any section header", line_text))
        })?;

        let split = line_text
            .find(['=', ':'])
            .ok_or_else(|| parse_error(line, format!("expected 'key = value', got '{}'", line_text)))?;
        let key = line_text[..split].trim().to_lowercase();
        let value = line_text[split + 1..].trim().to_string();
        if key.is_empty() {
            return Err(parse_error(line, "empty key"));
        }

        let (section_name, entries) = match current {
            Some(i) => {
                let (name, entries) = &mut self.sections[i];
                (name.as_str(), entries)
            }
            None => (DEFAULT_SECTION, &mut self.defaults),
        };
        if entries.iter().any(|(k, _)| *k == key) {
            return Err(parse_error(
                line,
                format!("duplicate key '{}' in section '{}'", key, section_name),
            ));
        }
        entries.push((key, value));
        self.continuable = true;
        Ok(())
    }

    fn continue_value(&mut self, text: &str) {
        let entries = match self.current {
            Some(Some(i)) => &mut self.sections[i].1,
            Some(None) => &mut self.defaults,
            None => return,
        };
        if let Some((_, value)) = entries.last_mut() {
            value.push('\n');
            value.push_str(text);
        }
    }

    fn finish(self) -> SchemeSet {
        let defaults = self.defaults;
        let schemes = self
            .sections
            .into_iter()
            .map(|(name, mut entries)| {
                for (key, value) in &defaults {
                    if !entries.iter().any(|(k, _)| k == key) {
                        entries.push((key.clone(), value.clone()));
                    }
                }
                ColorScheme::new(name, entries)
            })
            .collect();
        SchemeSet { schemes }
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ThemeError {
    ThemeError::Parse {
        path: None,
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; Clear theme colors
[dark]
text        = fafafa
subtext     = 737373
main        = 0a0a0a

[light]
text = 0a0a0a
main: fafafa
";

    #[test]
    fn test_parse_sections_in_order() {
        let set = SchemeSet::parse(SAMPLE).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["dark", "light"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let set = SchemeSet::parse(SAMPLE).unwrap();
        let dark = set.get("dark").unwrap();
        let keys: Vec<_> = dark.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["text", "subtext", "main"]);
        assert_eq!(dark.get("main"), Some("0a0a0a"));
    }

    #[test]
    fn test_parse_colon_delimiter() {
        let set = SchemeSet::parse(SAMPLE).unwrap();
        assert_eq!(set.get("light").unwrap().get("main"), Some("fafafa"));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let set = SchemeSet::parse("[dark]\nMain-Elevated = 171717\n").unwrap();
        assert_eq!(set.get("dark").unwrap().get("main-elevated"), Some("171717"));
    }

    #[test]
    fn test_value_keeps_hash_and_inline_text() {
        let set = SchemeSet::parse("[dark]\ntext = #fafafa ; note\n").unwrap();
        assert_eq!(set.get("dark").unwrap().get("text"), Some("#fafafa ; note"));
    }

    #[test]
    fn test_hash_comment_lines() {
        let set = SchemeSet::parse("# header\n[dark]\n  # indented comment\ntext = fff\n").unwrap();
        assert_eq!(set.get("dark").unwrap().len(), 1);
    }

    #[test]
    fn test_active_prefers_dark() {
        let set = SchemeSet::parse("[light]\ntext = 000\n[dark]\ntext = fff\n").unwrap();
        assert_eq!(set.active().unwrap().name(), "dark");
    }

    #[test]
    fn test_active_falls_back_to_first() {
        let set = SchemeSet::parse("[light]\ntext = 000\n[custom]\ntext = fff\n").unwrap();
        assert_eq!(set.active().unwrap().name(), "light");
    }

    #[test]
    fn test_active_on_empty_set() {
        let set = SchemeSet::parse("; nothing here\n").unwrap();
        assert!(set.is_empty());
        assert!(matches!(set.active(), Err(ThemeError::NoSchemes { .. })));
    }

    #[test]
    fn test_default_section_is_inherited() {
        let set = SchemeSet::parse(
            "[DEFAULT]\nborder = 262626\ntext = ffffff\n[dark]\ntext = fafafa\n",
        )
        .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["dark"]);
        let dark = set.get("dark").unwrap();
        let entries: Vec<_> = dark.iter().collect();
        assert_eq!(entries, vec![("text", "fafafa"), ("border", "262626")]);
    }

    #[test]
    fn test_continuation_line() {
        let set = SchemeSet::parse("[dark]\ntext = fa\n  fa\n").unwrap();
        assert_eq!(set.get("dark").unwrap().get("text"), Some("fa\nfa"));
    }

    #[test]
    fn test_entry_before_section_is_error() {
        let err = SchemeSet::parse("text = fff\n[dark]\n").unwrap_err();
        match err {
            ThemeError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_section_is_error() {
        let err = SchemeSet::parse("[dark]\n[dark]\n").unwrap_err();
        assert!(err.to_string().contains("duplicate section 'dark'"));
    }

    #[test]
    fn test_duplicate_key_is_error() {
        let err = SchemeSet::parse("[dark]\ntext = fff\nTEXT = 000\n").unwrap_err();
        assert!(err.to_string().contains("duplicate key 'text'"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_line_without_delimiter_is_error() {
        let err = SchemeSet::parse("[dark]\njust-a-word\n").unwrap_err();
        assert!(matches!(err, ThemeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = SchemeSet::from_file("/definitely/not/here/color.ini").unwrap_err();
        assert!(matches!(err, ThemeError::Load { .. }));
    }

    #[test]
    fn test_from_file_attaches_path_to_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color.ini");
        std::fs::write(&path, "oops\n").unwrap();
        let err = SchemeSet::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("color.ini"));
    }
}
