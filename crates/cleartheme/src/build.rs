//! The build driver.
//!
//! A build is one pass from the repository's theme sources to an unpacked
//! extension directory and a distributable archive:
//!
//! 1. the output directories are checked against the repository layout
//! 2. `color.ini` and `user.css` are run through the stylesheet pipeline and
//!    both scripts are read
//! 3. `build_dir` and `dist_dir` are wiped and recreated
//! 4. `theme.css`, `theme.js`, `guard.js` and `manifest.json` are written
//! 5. the build directory is packed into `dist_dir`
//!
//! Every input is read before anything is deleted, so a failing build leaves
//! the previous output in place. An output directory that is the repository
//! root, one of its ancestors, or that holds an input file is refused.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use cleartheme_css::{build_theme_css, ThemeCss, ThemeError, ThemeSources};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::BuildConfig;
use crate::manifest::{ExtensionManifest, GUARD_JS, MANIFEST_JSON, THEME_CSS, THEME_JS};

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub build_dir: PathBuf,
    pub dist_dir: PathBuf,
    /// Files written into `build_dir`, in write order.
    pub files: Vec<PathBuf>,
    /// The zip written into `dist_dir`.
    pub archive: PathBuf,
    pub scheme_name: String,
    pub scheme_count: usize,
    /// Number of `!important` modifiers in `theme.css`.
    pub important_count: usize,
    /// Size of `theme.css` in bytes.
    pub css_bytes: usize,
}

/// File name of the distributable archive for a manifest version.
pub fn archive_name(version: &str) -> String {
    format!("clear-spotify-theme-v{}.zip", version)
}

/// Runs the stylesheet pipeline on the configured inputs without writing
/// anything.
pub fn render_css(config: &BuildConfig) -> Result<ThemeCss> {
    let color_ini_path = config.color_ini_path();
    let base_css_path = config.base_css_path();

    let color_ini = staged(read_input(&color_ini_path))?;
    let base_css = staged(read_input(&base_css_path))?;

    let theme = staged(
        build_theme_css(&ThemeSources {
            color_ini: &color_ini,
            base_css: &base_css,
        })
        .map_err(|e| e.with_path(&color_ini_path)),
    )?;

    tracing::info!(
        scheme = %theme.scheme_name,
        schemes = theme.scheme_count,
        "generated theme stylesheet"
    );
    Ok(theme)
}

/// Runs a full build.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let build_dir = config.build_dir_path();
    let dist_dir = config.dist_dir_path();
    check_output_dirs(config)?;

    let theme = render_css(config)?;
    let mut scripts = Vec::new();
    for (source, name) in [
        (config.script_path(), THEME_JS),
        (config.guard_script_path(), GUARD_JS),
    ] {
        let bytes = fs::read(&source).with_context(|| {
            format!("copying scripts: failed to read {}", source.display())
        })?;
        scripts.push((source, name, bytes));
    }
    let manifest_json = ExtensionManifest::new(&config.manifest)
        .to_json()
        .context("writing manifest: failed to serialize manifest")?;

    for dir in [&build_dir, &dist_dir] {
        reset_dir(dir)?;
    }

    let mut files = Vec::new();

    let css_path = build_dir.join(THEME_CSS);
    write_file(&css_path, theme.css.as_bytes())?;
    files.push(css_path);

    for (source, name, bytes) in scripts {
        let target = build_dir.join(name);
        fs::write(&target, &bytes).with_context(|| {
            format!(
                "copying scripts: failed to copy {} to {}",
                source.display(),
                target.display()
            )
        })?;
        tracing::info!(from = %source.display(), to = %target.display(), "copied script");
        files.push(target);
    }

    let manifest_path = build_dir.join(MANIFEST_JSON);
    write_file(&manifest_path, manifest_json.as_bytes())?;
    files.push(manifest_path);

    let archive = dist_dir.join(archive_name(&config.manifest.version));
    write_archive(&build_dir, &files, &archive)?;

    Ok(BuildReport {
        build_dir,
        dist_dir,
        files,
        archive,
        important_count: theme.important_count(),
        css_bytes: theme.css.len(),
        scheme_name: theme.scheme_name,
        scheme_count: theme.scheme_count,
    })
}

fn read_input(path: &Path) -> cleartheme_css::Result<String> {
    let content = fs::read_to_string(path).map_err(|source| ThemeError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read input");
    Ok(content)
}

/// Wraps a pipeline error with the name of the stage that failed.
fn staged<T>(result: cleartheme_css::Result<T>) -> Result<T> {
    result.map_err(|e| {
        let stage = e.stage();
        anyhow::Error::new(e).context(stage)
    })
}

/// Refuses output directories whose reset would delete theme sources or
/// each other.
fn check_output_dirs(config: &BuildConfig) -> Result<()> {
    let repo_root = real_path(&config.repo_root)?;
    let inputs = [
        config.color_ini_path(),
        config.base_css_path(),
        config.script_path(),
        config.guard_script_path(),
    ]
    .iter()
    .map(|p| real_path(p))
    .collect::<Result<Vec<_>>>()?;
    let build_dir = real_path(&config.build_dir_path())?;
    let dist_dir = real_path(&config.dist_dir_path())?;

    for (field, dir) in [("build_dir", &build_dir), ("dist_dir", &dist_dir)] {
        if repo_root.starts_with(dir) {
            bail!(
                "cleaning output: refusing to clear {} {}: it contains the repository root {}",
                field,
                dir.display(),
                repo_root.display()
            );
        }
        if let Some(input) = inputs.iter().find(|input| input.starts_with(dir)) {
            bail!(
                "cleaning output: refusing to clear {} {}: it contains the input {}",
                field,
                dir.display(),
                input.display()
            );
        }
    }
    if build_dir.starts_with(&dist_dir) || dist_dir.starts_with(&build_dir) {
        bail!(
            "cleaning output: build_dir {} and dist_dir {} overlap",
            build_dir.display(),
            dist_dir.display()
        );
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` folded and the longest existing
/// prefix canonicalized.
fn real_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cleaning output: failed to read the current directory")?
            .join(path)
    };

    let mut lexical = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other.as_os_str()),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = fs::canonicalize(existing) {
            return Ok(missing
                .iter()
                .rev()
                .fold(real, |acc: PathBuf, name| acc.join(name)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(lexical.clone()),
        }
    }
}

fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("cleaning output: failed to remove {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("cleaning output: failed to create {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), "reset output directory");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("writing output: failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Packs `files` into a deflated zip, named relative to `build_dir`.
fn write_archive(build_dir: &Path, files: &[PathBuf], archive: &Path) -> Result<()> {
    let context = || format!("packing archive: failed to write {}", archive.display());

    let file = fs::File::create(archive).with_context(context)?;
    let mut zip = ZipWriter::new(file);
    for path in files {
        let name = path
            .strip_prefix(build_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name.as_str(), options).with_context(context)?;

        let bytes = fs::read(path)
            .with_context(|| format!("packing archive: failed to read {}", path.display()))?;
        zip.write_all(&bytes).with_context(context)?;
    }
    zip.finish().with_context(context)?;

    tracing::info!(path = %archive.display(), entries = files.len(), "packed archive");
    Ok(())
}
