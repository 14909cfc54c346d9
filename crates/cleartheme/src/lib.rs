//! # Clear Theme Builder
//!
//! Packages the Clear Spotify theme as an unpacked Chrome extension. The
//! stylesheet work happens in [`cleartheme_css`]; this crate reads the
//! sources, writes the extension files and reports progress.
//!
//! ```text
//! chrome-extension/build/
//! ├── theme.css      assembled stylesheet
//! ├── theme.js       copied from the repository root
//! ├── guard.js       copied from chrome-extension/
//! └── manifest.json  MV3 manifest
//!
//! chrome-extension/dist/
//! └── clear-spotify-theme-v<version>.zip
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod logging;
pub mod manifest;

use std::io::Write;

use anyhow::{Context, Result};
use console::style;

pub use build::{archive_name, build, render_css, BuildReport};
pub use cli::Cli;
pub use config::{BuildConfig, ConfigError, ManifestConfig};
pub use manifest::ExtensionManifest;

/// Runs the command described by `cli`.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.build_config().context("loading configuration")?;

    if let Some(target) = &cli.css_only {
        let theme = render_css(&config)?;
        if target.as_os_str() == "-" {
            std::io::stdout()
                .write_all(theme.css.as_bytes())
                .context("writing output: failed to write stylesheet to stdout")?;
        } else {
            std::fs::write(target, &theme.css).with_context(|| {
                format!("writing output: failed to write {}", target.display())
            })?;
            success(&format!("{} ({} bytes)", target.display(), theme.css.len()));
        }
        return Ok(());
    }

    eprintln!("Building Clear Spotify Theme Chrome extension...\n");
    let report = build(&config)?;
    print_report(&report);
    Ok(())
}

fn success(message: &str) {
    eprintln!("  {} {}", style("✓").green(), message);
}

fn print_report(report: &BuildReport) {
    success(&format!(
        "colors ({} scheme(s) found, using [{}])",
        report.scheme_count, report.scheme_name
    ));
    success(&format!(
        "{} (combined, {} declarations, {} bytes)",
        manifest::THEME_CSS,
        report.important_count,
        report.css_bytes
    ));
    for file in report.files.iter().skip(1) {
        if let Some(name) = file.file_name() {
            success(&name.to_string_lossy());
        }
    }
    eprintln!(
        "\n  {} Unpacked: {}",
        style("→").cyan(),
        report.build_dir.display()
    );
    eprintln!(
        "  {} Packed:   {}",
        style("→").cyan(),
        report.archive.display()
    );
    eprintln!(
        "\nLoad unpacked from {} or upload {} to the Chrome Web Store",
        style(report.build_dir.display()).bold(),
        style(report.archive.display()).bold()
    );
}
