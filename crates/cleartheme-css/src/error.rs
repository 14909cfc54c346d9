//! Error types for the stylesheet pipeline.
//!
//! Every failure in the pipeline is fatal to the build. [`ThemeError`] carries
//! enough context (path, line, color key) for the driver to print a message
//! that names the failing stage without any further lookup.

use std::path::PathBuf;

/// Error type for scheme parsing, color conversion and CSS generation.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A required input file could not be read.
    #[error("failed to read {}", .path.display())]
    Load {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The color-scheme file violates the section/key grammar.
    #[error("{}line {line}: {message}", location(.path))]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The color-scheme file declares no scheme at all.
    #[error("{}no color scheme sections found", location(.path))]
    NoSchemes {
        /// Optional source file path.
        path: Option<PathBuf>,
    },

    /// A color value cannot be resolved to three RGB components.
    #[error("invalid color {}'{value}': {reason}", key_label(.key))]
    InvalidColor {
        /// The scheme key the value was looked up under, when known.
        key: Option<String>,
        /// The offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The bridge catalogue template failed to render.
    #[error("template error: {0}")]
    Template(String),
}

impl ThemeError {
    /// Creates a color error that is not yet attached to a scheme key.
    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ThemeError::InvalidColor {
            key: None,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attaches a scheme key to a color error. Other variants pass through.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            ThemeError::InvalidColor { value, reason, .. } => ThemeError::InvalidColor {
                key: Some(key.to_string()),
                value,
                reason,
            },
            other => other,
        }
    }

    /// Attaches a source path to parse errors. Other variants pass through.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ThemeError::Parse { line, message, .. } => ThemeError::Parse {
                path: Some(path.into()),
                line,
                message,
            },
            ThemeError::NoSchemes { .. } => ThemeError::NoSchemes {
                path: Some(path.into()),
            },
            other => other,
        }
    }

    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            ThemeError::Load { .. } => "reading inputs",
            ThemeError::Parse { .. } | ThemeError::NoSchemes { .. } => "scheme parsing",
            ThemeError::InvalidColor { .. } => "color conversion",
            ThemeError::Template(_) => "css generation",
        }
    }
}

impl From<minijinja::Error> for ThemeError {
    fn from(err: minijinja::Error) -> Self {
        ThemeError::Template(err.to_string())
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!("{}: ", p.display()))
        .unwrap_or_default()
}

fn key_label(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!("for key '{}' ", k))
        .unwrap_or_default()
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
