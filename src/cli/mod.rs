//! Command-line interface for xcassetgen.
//!
//! Parses flags, merges them with the config file, runs the catalog
//! builder and prints the handled count.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{self, Overrides, ResolvedConfig};
use crate::core::CatalogBuilder;

/// xcassetgen - Build an Xcode asset catalog from SVG icons
#[derive(Parser, Debug)]
#[command(name = "xcassetgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the SVG files
    #[arg(short, long, env = "XCASSETGEN_INPUT")]
    pub input: Option<PathBuf>,

    /// Directory that will contain Images.xcassets
    #[arg(short, long, env = "XCASSETGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print progress and diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (defaults to .xcassetgen/config.yaml in this or a parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Glob pattern (relative to the input directory) to skip; repeatable
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl Cli {
    /// Merge flags with the config file
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;

        let overrides = Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            verbose: self.verbose,
            exclude: self.exclude.clone(),
            config_file: self.config.clone(),
        };

        config::resolve(overrides, &cwd)
    }
}

/// Build the catalog described by `config` and print the handled count
pub fn run(config: &ResolvedConfig) -> Result<()> {
    if let Some(ref path) = config.config_file {
        info!("Using config file {}", path.display());
    }

    let mut builder = CatalogBuilder::new(config.build_config()?);
    let report = builder.build().with_context(|| {
        format!(
            "Failed to build asset catalog from {}",
            config.input.display()
        )
    })?;

    println!(
        "Handled {} file(s) into {}",
        report.handled_count(),
        report.catalog_root.display()
    );

    Ok(())
}
