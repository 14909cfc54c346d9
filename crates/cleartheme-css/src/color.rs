//! Hex color parsing and RGB triple formatting.
//!
//! Scheme files store colors as hex strings. The generated stylesheet needs
//! two representations of each: the hex value itself and a decimal `R,G,B`
//! triple that can be dropped into `rgba(var(--spice-rgb-x), 0.5)`.
//!
//! Accepted input:
//!
//! - 6-digit hex: `fafafa`, `#fafafa`
//! - 3-digit hex: `f0a`, `#f0a` (each digit is doubled: `ff00aa`)
//! - Surrounding whitespace is ignored
//!
//! # Example
//!
//! ```rust
//! use cleartheme_css::{hex_to_rgb, Rgb};
//!
//! assert_eq!(hex_to_rgb("#fafafa").unwrap(), "250,250,250");
//! assert_eq!(hex_to_rgb("f0a").unwrap(), "255,0,170");
//!
//! let rgb: Rgb = "250,250,250".parse().unwrap();
//! assert_eq!(rgb.to_hex(), "fafafa");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ThemeError};

/// A color resolved to three byte-valued components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color, with or without a leading `#`, in 3- or 6-digit form.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] when the digits are not exactly
    /// 3 or 6 hex characters.
    pub fn from_hex(value: &str) -> Result<Self> {
        let hex = normalize_hex(value);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::invalid_color(
                value,
                "contains non-hex characters",
            ));
        }

        match hex.len() {
            // 3-digit hex: rgb -> rrggbb
            3 => {
                let digit = |i: usize| parse_component(&hex[i..i + 1], value).map(|d| d * 17);
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| parse_component(&hex[i..i + 2], value);
                Ok(Self::new(pair(0)?, pair(2)?, pair(4)?))
            }
            n => Err(ThemeError::invalid_color(
                value,
                format!("expected 3 or 6 hex digits, got {}", n),
            )),
        }
    }

    /// Renders the color as 6 lower-case hex digits without a `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// Formats as a comma-separated decimal triple: `250,250,250`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ThemeError;

    /// Parses a decimal triple as produced by [`Display`](fmt::Display).
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ThemeError::invalid_color(
                s,
                format!("expected 3 components, got {}", parts.len()),
            ));
        }

        let mut components = [0u8; 3];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part.parse::<u8>().map_err(|_| {
                ThemeError::invalid_color(s, format!("component {} is not in 0-255", i))
            })?;
        }

        Ok(Self::new(components[0], components[1], components[2]))
    }
}

/// Strips surrounding whitespace and a single leading `#`.
pub fn normalize_hex(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim()
}

/// Converts a hex color to its `R,G,B` decimal string.
pub fn hex_to_rgb(value: &str) -> Result<String> {
    Ok(Rgb::from_hex(value)?.to_string())
}

fn parse_component(digits: &str, original: &str) -> Result<u8> {
    u8::from_str_radix(digits, 16)
        .map_err(|_| ThemeError::invalid_color(original, format!("invalid hex digits '{}'", digits)))
}
