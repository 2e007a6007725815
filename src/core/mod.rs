//! Catalog building logic.
//!
//! This module contains:
//! - BuildConfig: explicit inputs for one run
//! - CatalogBuilder: output reset, enumeration and per-entry handling

pub mod builder;

pub use builder::{
    BuildConfig, BuildReport, CatalogBuilder, CatalogError, EntryOutcome, SkipReason,
    CATALOG_DIR_NAME,
};
