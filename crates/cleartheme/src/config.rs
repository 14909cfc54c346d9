//! Build configuration.
//!
//! Defaults follow the repository layout the theme ships with, so a bare
//! `cleartheme` run from the repository root needs no configuration at all:
//!
//! | Field | Default |
//! |-------|---------|
//! | `repo_root` | `.` |
//! | `color_ini` | `color.ini` |
//! | `base_css` | `user.css` |
//! | `script` | `theme.js` |
//! | `guard_script` | `chrome-extension/guard.js` |
//! | `build_dir` | `chrome-extension/build` |
//! | `dist_dir` | `chrome-extension/dist` |
//!
//! Relative paths resolve against `repo_root`. A YAML file can override any
//! field, and command-line flags override the file:
//!
//! ```yaml
//! build_dir: out/unpacked
//! manifest:
//!   version: 1.1.0
//!   matches:
//!     - https://open.spotify.com/*
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Paths and metadata for one build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub repo_root: PathBuf,
    pub color_ini: PathBuf,
    pub base_css: PathBuf,
    pub script: PathBuf,
    pub guard_script: PathBuf,
    pub build_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub manifest: ManifestConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            color_ini: PathBuf::from("color.ini"),
            base_css: PathBuf::from("user.css"),
            script: PathBuf::from("theme.js"),
            guard_script: PathBuf::from("chrome-extension/guard.js"),
            build_dir: PathBuf::from("chrome-extension/build"),
            dist_dir: PathBuf::from("chrome-extension/dist"),
            manifest: ManifestConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Parses a configuration from YAML. Missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves a configured path against `repo_root`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }

    pub fn color_ini_path(&self) -> PathBuf {
        self.resolve(&self.color_ini)
    }

    pub fn base_css_path(&self) -> PathBuf {
        self.resolve(&self.base_css)
    }

    pub fn script_path(&self) -> PathBuf {
        self.resolve(&self.script)
    }

    pub fn guard_script_path(&self) -> PathBuf {
        self.resolve(&self.guard_script)
    }

    pub fn build_dir_path(&self) -> PathBuf {
        self.resolve(&self.build_dir)
    }

    pub fn dist_dir_path(&self) -> PathBuf {
        self.resolve(&self.dist_dir)
    }
}

/// Extension metadata written to `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    /// URL patterns the content scripts are injected into.
    pub matches: Vec<String>,
    pub run_at: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name: "Clear Spotify Theme".to_string(),
            version: "1.0.0".to_string(),
            description:
                "Opinionated Spotify theme reducing screen clutter and improving readability"
                    .to_string(),
            matches: vec!["https://open.spotify.com/*".to_string()],
            run_at: "document_start".to_string(),
        }
    }
}
