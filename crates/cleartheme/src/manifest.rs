//! Chrome MV3 extension manifest.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ManifestConfig;

/// Stylesheet file name inside the unpacked extension.
pub const THEME_CSS: &str = "theme.css";
/// Theme script file name inside the unpacked extension.
pub const THEME_JS: &str = "theme.js";
/// Extension-only login guard script. Runs before the theme script.
pub const GUARD_JS: &str = "guard.js";
pub const MANIFEST_JSON: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionManifest {
    pub manifest_version: u8,
    pub name: String,
    pub version: String,
    pub description: String,
    pub icons: BTreeMap<String, String>,
    pub content_scripts: Vec<ContentScript>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentScript {
    pub matches: Vec<String>,
    pub css: Vec<String>,
    pub js: Vec<String>,
    pub run_at: String,
}

impl ExtensionManifest {
    pub fn new(config: &ManifestConfig) -> Self {
        Self {
            manifest_version: 3,
            name: config.name.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
            icons: BTreeMap::new(),
            content_scripts: vec![ContentScript {
                matches: config.matches.clone(),
                css: vec![THEME_CSS.to_string()],
                js: vec![GUARD_JS.to_string(), THEME_JS.to_string()],
                run_at: config.run_at.clone(),
            }],
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
