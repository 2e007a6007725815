//! xcassetgen - Build an Xcode asset catalog from a tree of SVG icons
//!
//! Walks an input directory, and for every `*.svg` file emits an
//! `<icon>.imageset/` folder holding the copied image and a
//! `Contents.json` descriptor under `<output>/Images.xcassets`.
//!
//! # Modules
//!
//! - `core`: The catalog builder (reset, enumerate, handle entries)
//! - `domain`: Data structures (ImageEntry, Contents)
//! - `config`: Flag, environment and config-file merging
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! xcassetgen --input icons --output App --verbose
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{BuildConfig, BuildReport, CatalogBuilder, CatalogError};
pub use domain::{Contents, ImageEntry};
