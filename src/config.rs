//! Configuration for a catalog build.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags
//! 2. Environment variables (XCASSETGEN_INPUT, XCASSETGEN_OUTPUT)
//! 3. Config file (--config, or .xcassetgen/config.yaml)
//!
//! Config file discovery:
//! - Searches current directory and parents for .xcassetgen/config.yaml
//! - Paths in a discovered file are relative to the directory holding .xcassetgen/
//! - Paths in an explicit --config file are relative to that file's directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Deserialize;

use crate::core::BuildConfig;

/// Directory searched for in the current directory and its parents
pub const CONFIG_DIR_NAME: &str = ".xcassetgen";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub paths: PathsConfig,
    /// Glob patterns (relative to the input root) to skip
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Source image directory
    pub input: Option<String>,
    /// Directory that will contain Images.xcassets
    pub output: Option<String>,
}

/// Values supplied on the command line (or through clap's env fallback)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub exclude: Vec<String>,
    pub config_file: Option<PathBuf>,
}

/// Fully merged configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
    pub exclude: Vec<String>,
    /// Path to config file (if one was used)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Compile exclude patterns and produce the builder's inputs
    pub fn build_config(&self) -> Result<BuildConfig> {
        let patterns = self
            .exclude
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(BuildConfig::new(&self.input, &self.output).with_exclude(patterns))
    }
}

/// Find config file by searching a directory and its parents
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Directory that relative paths in a config file resolve against
fn config_base_dir(config_path: &Path, discovered: bool) -> PathBuf {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    if discovered {
        // .xcassetgen/config.yaml -> project root
        parent.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}

/// Merge overrides with the config file found from `cwd`
pub fn resolve(overrides: Overrides, cwd: &Path) -> Result<ResolvedConfig> {
    let (config_file, discovered) = match overrides.config_file {
        Some(path) => (Some(path), false),
        None => (find_config_file(cwd), true),
    };

    let (file, base_dir) = match config_file {
        Some(ref path) => (load_config_file(path)?, config_base_dir(path, discovered)),
        None => (ConfigFile::default(), cwd.to_path_buf()),
    };

    let input = overrides
        .input
        .or_else(|| file.paths.input.as_deref().map(|p| resolve_path(&base_dir, p)))
        .context("No input directory given (use --input, XCASSETGEN_INPUT or paths.input)")?;

    let output = overrides
        .output
        .or_else(|| file.paths.output.as_deref().map(|p| resolve_path(&base_dir, p)))
        .context("No output directory given (use --output, XCASSETGEN_OUTPUT or paths.output)")?;

    let mut exclude = file.exclude;
    exclude.extend(overrides.exclude);

    Ok(ResolvedConfig {
        input,
        output,
        verbose: overrides.verbose || file.verbose.unwrap_or(false),
        exclude,
        config_file,
    })
}
