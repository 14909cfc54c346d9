//! Forcing `!important` onto stylesheet declarations.
//!
//! The extension's stylesheet is injected before the page's own stylesheets,
//! so at equal specificity it loses the cascade. Appending `!important` to
//! every declaration makes it win regardless of load order.
//!
//! This is a line scanner, not a CSS parser. It assumes one declaration per
//! line and keeps every other byte of the input exactly as it was.
//!
//! # Scanner
//!
//! Two states, [`ScanState::Normal`] and [`ScanState::InBlockComment`]:
//!
//! - A line containing `/*` but no `*/` enters the comment state and is
//!   passed through. Every line is then passed through until one containing
//!   `*/` leaves the state.
//! - In the normal state a line is passed through when its trimmed form is
//!   empty, starts with `/*`, `*` or `//`, ends with `{`, is exactly `}`,
//!   starts with `@`, already contains `!important`, or lacks either `:` or
//!   `;`.
//! - Any other line gets ` !important` inserted before its *last* `;`, so a
//!   `;` inside a quoted URL earlier on the line is left alone.
//!
//! A `;` that follows the declaration's real end on the same line (for
//! example inside a trailing comment) is mistaken for the terminator. That
//! limitation is kept as-is.
//!
//! # Example
//!
//! ```rust
//! use cleartheme_css::add_important;
//!
//! let css = "a {\n  color: red;\n  /* color: blue; */\n}";
//! assert_eq!(
//!     add_important(css),
//!     "a {\n  color: red !important;\n  /* color: blue; */\n}"
//! );
//! ```

/// The forcing modifier.
pub const IMPORTANT: &str = "!important";

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Normal,
    InBlockComment,
}

/// Line-oriented `!important` inserter.
#[derive(Debug, Default)]
pub struct ImportanceNormalizer {
    state: ScanState,
    inserted: usize,
}

impl ImportanceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of declarations modified so far.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Processes one line (without its `\n`) and returns the output line.
    pub fn process_line<'a>(&mut self, line: &'a str) -> std::borrow::Cow<'a, str> {
        use std::borrow::Cow;

        let stripped = line.trim();

        if self.state == ScanState::InBlockComment {
            if stripped.contains("*/") {
                self.state = ScanState::Normal;
            }
            return Cow::Borrowed(line);
        }
        if stripped.contains("/*") && !stripped.contains("*/") {
            self.state = ScanState::InBlockComment;
            return Cow::Borrowed(line);
        }

        if !is_declaration(stripped) {
            return Cow::Borrowed(line);
        }

        match line.rfind(';') {
            Some(idx) => {
                self.inserted += 1;
                Cow::Owned(format!("{} {};{}", &line[..idx], IMPORTANT, &line[idx + 1..]))
            }
            None => Cow::Borrowed(line),
        }
    }

    /// Processes a whole stylesheet. Lines are split on `\n` only.
    pub fn process(&mut self, css: &str) -> String {
        let mut out = String::with_capacity(css.len() + css.len() / 8);
        for (i, line) in css.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.process_line(line));
        }
        out
    }
}

/// Guard predicates for the normal state, applied to a trimmed line.
fn is_declaration(stripped: &str) -> bool {
    !(stripped.is_empty()
        || stripped.starts_with("/*")
        || stripped.starts_with('*')
        || stripped.starts_with("//")
        || stripped.ends_with('{')
        || stripped == "}"
        || stripped.starts_with('@')
        || stripped.contains(IMPORTANT)
        || !stripped.contains(';')
        || !stripped.contains(':'))
}

/// Adds `!important` to every declaration in `css` that lacks it.
///
/// Idempotent: running the output through again changes nothing.
pub fn add_important(css: &str) -> String {
    let mut normalizer = ImportanceNormalizer::new();
    let out = normalizer.process(css);
    tracing::trace!(declarations = normalizer.inserted(), "forced declarations");
    out
}

/// Counts occurrences of `!important` in `css`.
pub fn count_important(css: &str) -> usize {
    css.matches(IMPORTANT).count()
}
