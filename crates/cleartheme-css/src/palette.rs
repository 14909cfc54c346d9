//! Color lookup with documented fallbacks.
//!
//! The fixed-catalogue generators look colors up by well-known scheme keys.
//! Schemes are free to omit any of them, so every key the catalogues use has
//! a fallback in [`FALLBACKS`]. Lookups go through [`Palette`] so that the
//! catalogues never inline a fallback literal themselves.

use crate::color::{normalize_hex, Rgb};
use crate::error::{Result, ThemeError};
use crate::scheme::ColorScheme;

/// Fallback hex value for each scheme key the catalogues reference.
pub const FALLBACKS: &[(&str, &str)] = &[
    ("main", "0a0a0a"),
    ("main-elevated", "171717"),
    ("highlight", "171717"),
    ("highlight-elevated", "171717"),
    ("text", "fafafa"),
    ("subtext", "737373"),
    ("accent", "fafafa"),
    ("border", "262626"),
    ("card", "171717"),
];

/// Returns the fallback hex for `key`, if the key is catalogued.
pub fn fallback(key: &str) -> Option<&'static str> {
    FALLBACKS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, hex)| *hex)
}

/// The active scheme viewed through the fallback table.
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    scheme: &'a ColorScheme,
}

impl<'a> Palette<'a> {
    pub fn new(scheme: &'a ColorScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &'a ColorScheme {
        self.scheme
    }

    /// Returns the scheme value for `key`, or its fallback.
    ///
    /// The value is returned without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] if the scheme lacks the key and
    /// no fallback is catalogued for it.
    pub fn hex(&self, key: &str) -> Result<&'a str> {
        self.scheme
            .get(key)
            .or_else(|| fallback(key))
            .map(normalize_hex)
            .ok_or_else(|| {
                ThemeError::invalid_color("", "key is not in the scheme and has no fallback")
                    .with_key(key)
            })
    }

    /// Returns the value for `key` as CSS hex text, e.g. `#fafafa`.
    ///
    /// The value is checked to be a valid color even though it is emitted
    /// as written.
    pub fn css_hex(&self, key: &str) -> Result<String> {
        let hex = self.hex(key)?;
        Rgb::from_hex(hex).map_err(|e| e.with_key(key))?;
        Ok(format!("#{}", hex))
    }

    /// Returns the value for `key` as a decimal `R,G,B` triple.
    pub fn rgb(&self, key: &str) -> Result<String> {
        let hex = self.hex(key)?;
        Rgb::from_hex(hex)
            .map(|rgb| rgb.to_string())
            .map_err(|e| e.with_key(key))
    }
}
