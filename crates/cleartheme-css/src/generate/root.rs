//! `:root` custom properties from the active scheme.

use crate::color::{normalize_hex, Rgb};
use crate::error::Result;
use crate::scheme::ColorScheme;

/// Emits `--spice-<key>` (hex) and `--spice-rgb-<key>` (decimal triple) for
/// every key in the scheme, in declaration order, inside a single `:root`
/// block. These mirror the variables Spicetify injects on desktop.
///
/// Declarations carry no `!important`; the assembler normalizes this output.
///
/// # Errors
///
/// Fails on the first value that is not a valid hex color, naming its key.
pub fn generate_root_properties(scheme: &ColorScheme) -> Result<String> {
    let mut lines = Vec::with_capacity(scheme.len() * 2 + 3);
    lines.push(format!(
        "/* Auto-generated from color.ini [{}] */",
        scheme.name()
    ));
    lines.push(":root {".to_string());

    for (key, value) in scheme.iter() {
        let rgb = Rgb::from_hex(value).map_err(|e| e.with_key(key))?;
        lines.push(format!("  --spice-{}: #{};", key, normalize_hex(value)));
        lines.push(format!("  --spice-rgb-{}: {};", key, rgb));
    }

    lines.push("}".to_string());
    tracing::debug!(scheme = scheme.name(), keys = scheme.len(), "generated root properties");
    Ok(lines.join("\n"))
}
