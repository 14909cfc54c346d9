//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{BuildConfig, ConfigError};

/// Build the Clear theme into an unpacked Chrome extension
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cleartheme", about, version)]
pub struct Cli {
    /// YAML file overriding the default paths and manifest metadata
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository root the theme sources are read from
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Output directory for the unpacked extension
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Output directory for distributable artifacts
    #[arg(long, value_name = "DIR")]
    pub dist_dir: Option<PathBuf>,

    /// Only write the assembled stylesheet to PATH ('-' for stdout)
    #[arg(long, value_name = "PATH")]
    pub css_only: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Loads the config file, if any, and applies flag overrides.
    pub fn build_config(&self) -> Result<BuildConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_file(path)?,
            None => BuildConfig::default(),
        };

        if let Some(root) = &self.repo_root {
            config.repo_root = root.clone();
        }
        if let Some(dir) = &self.build_dir {
            config.build_dir = dir.clone();
        }
        if let Some(dir) = &self.dist_dir {
            config.dist_dir = dir.clone();
        }
        Ok(config)
    }
}
