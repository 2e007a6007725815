//! Builds an `Images.xcassets` catalog from a tree of SVG files.
//!
//! One run is a single synchronous pass:
//! - Validate the input directory
//! - Delete and recreate `<output>/Images.xcassets`
//! - Walk the input tree in file-name order
//! - Emit `<icon>.imageset/{Contents.json, <icon>.svg}` for every SVG
//!
//! Any error aborts the run. Nothing written before the failing entry is
//! rolled back; the next run's reset clears it.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::{
    file_name_of, split_extension, Contents, ImageEntry, CONTENTS_FILE_NAME, SVG_EXTENSION,
};

/// Name of the catalog root created inside the output directory
pub const CATALOG_DIR_NAME: &str = "Images.xcassets";

/// Errors that abort a catalog build
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Input directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Illegal file name: {0} (expected [A-Za-z0-9_]+.svg)")]
    InvalidFileName(String),

    #[error("Input directory {input} lies inside the catalog {catalog_root}")]
    InputInsideCatalog {
        input: PathBuf,
        catalog_root: PathBuf,
    },

    #[error("Icon name '{icon_name}' produced by both {first} and {second}")]
    DuplicateIconName {
        icon_name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CatalogError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> CatalogError + '_ {
        move |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Inputs for one catalog build
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory searched for SVG files
    pub input: PathBuf,

    /// Directory that will contain `Images.xcassets`
    pub output: PathBuf,

    /// Entries whose relative path matches any of these are skipped
    pub exclude: Vec<Pattern>,
}

impl BuildConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            exclude: Vec::new(),
        }
    }

    /// Add exclude patterns
    pub fn with_exclude(mut self, patterns: impl IntoIterator<Item = Pattern>) -> Self {
        self.exclude.extend(patterns);
        self
    }

    /// `<output>/Images.xcassets`
    pub fn catalog_root(&self) -> PathBuf {
        self.output.join(CATALOG_DIR_NAME)
    }

    /// Check a path relative to the input root against the exclude list
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy();
        self.exclude.iter().any(|p| p.matches(&path_str))
    }
}

/// Why an enumerated entry produced no imageset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not `svg`
    NotSvg,

    /// Entry is a directory
    Directory,

    /// Matched an exclude pattern
    Excluded,
}

/// Result of handling one enumerated entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Handled(ImageEntry),
    Skipped(SkipReason),
}

impl EntryOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, EntryOutcome::Handled(_))
    }
}

/// Summary of a completed build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Catalog root that was written
    pub catalog_root: PathBuf,

    /// Entries that produced an imageset, in traversal order
    pub handled: Vec<ImageEntry>,

    /// Number of entries skipped
    pub skipped: usize,
}

impl BuildReport {
    pub fn handled_count(&self) -> usize {
        self.handled.len()
    }
}

/// Single-pass catalog builder
pub struct CatalogBuilder {
    config: BuildConfig,

    /// Lowercased icon_name -> source path for the current run.
    /// `Icon` and `icon` share one folder on case-insensitive filesystems.
    emitted: HashMap<String, PathBuf>,
}

impl CatalogBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            emitted: HashMap::new(),
        }
    }

    /// Get the build configuration
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Fail unless the input path is an existing directory outside the
    /// catalog root that the reset would delete
    pub fn validate_input(&self) -> Result<(), CatalogError> {
        let input = &self.config.input;
        if !input.is_dir() {
            return Err(CatalogError::DirectoryNotFound(input.clone()));
        }

        let input = fs::canonicalize(input).map_err(CatalogError::io(input))?;
        // A missing output directory cannot contain the input
        let Ok(output) = fs::canonicalize(&self.config.output) else {
            return Ok(());
        };

        let catalog_root = output.join(CATALOG_DIR_NAME);
        if input.starts_with(&catalog_root) {
            return Err(CatalogError::InputInsideCatalog {
                input,
                catalog_root,
            });
        }

        Ok(())
    }

    /// Delete whatever sits at the catalog root, then recreate it
    pub fn prepare_output(&self) -> Result<PathBuf, CatalogError> {
        let root = self.config.catalog_root();

        // symlink_metadata so dangling links are seen and links are removed,
        // not followed
        if let Ok(metadata) = fs::symlink_metadata(&root) {
            debug!("Removing existing catalog {}", root.display());
            if metadata.is_dir() {
                fs::remove_dir_all(&root).map_err(CatalogError::io(&root))?;
            } else {
                fs::remove_file(&root).map_err(CatalogError::io(&root))?;
            }
        }

        fs::create_dir_all(&root).map_err(CatalogError::io(&root))?;
        info!("Created catalog {}", root.display());

        Ok(root)
    }

    /// List every file and directory under the input root, relative to it,
    /// sorted by file name within each directory
    pub fn enumerate(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let input = &self.config.input;
        let mut entries = Vec::new();

        for entry in WalkDir::new(input).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(input)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            entries.push(relative);
        }

        Ok(entries)
    }

    /// Handle one entry relative to the input root
    pub fn handle_entry(&mut self, source_file: &Path) -> Result<EntryOutcome, CatalogError> {
        let Some(file_name) = file_name_of(source_file) else {
            return Ok(EntryOutcome::Skipped(SkipReason::NotSvg));
        };

        if split_extension(&file_name) != Some(SVG_EXTENSION) {
            debug!("Skipping {}", source_file.display());
            return Ok(EntryOutcome::Skipped(SkipReason::NotSvg));
        }

        let source = self.config.input.join(source_file);
        if source.is_dir() {
            debug!("Skipping directory {}", source_file.display());
            return Ok(EntryOutcome::Skipped(SkipReason::Directory));
        }

        if self.config.is_excluded(source_file) {
            debug!("Excluded {}", source_file.display());
            return Ok(EntryOutcome::Skipped(SkipReason::Excluded));
        }

        let entry = ImageEntry::try_new(source_file, &file_name)
            .ok_or_else(|| CatalogError::InvalidFileName(file_name.clone()))?;

        let key = entry.icon_name.to_ascii_lowercase();
        if let Some(first) = self.emitted.get(&key) {
            return Err(CatalogError::DuplicateIconName {
                icon_name: entry.icon_name.clone(),
                first: first.clone(),
                second: entry.source_path.clone(),
            });
        }

        let imageset = self.config.catalog_root().join(entry.imageset_dir_name());
        fs::create_dir_all(&imageset).map_err(CatalogError::io(&imageset))?;

        write_contents(&imageset, &entry)?;
        copy_new(&source, &imageset.join(&entry.file_name))?;

        info!("{} -> {}", source_file.display(), entry.imageset_dir_name());
        self.emitted.insert(key, entry.source_path.clone());

        Ok(EntryOutcome::Handled(entry))
    }

    /// Run the whole pipeline
    pub fn build(&mut self) -> Result<BuildReport, CatalogError> {
        self.validate_input()?;
        self.emitted.clear();

        let catalog_root = self.prepare_output()?;
        let mut report = BuildReport {
            catalog_root,
            ..Default::default()
        };

        for source_file in self.enumerate()? {
            match self.handle_entry(&source_file)? {
                EntryOutcome::Handled(entry) => report.handled.push(entry),
                EntryOutcome::Skipped(_) => report.skipped += 1,
            }
        }

        debug!(
            handled = report.handled_count(),
            skipped = report.skipped,
            "Catalog build finished"
        );

        Ok(report)
    }
}

/// Write `Contents.json`, replacing any existing descriptor
fn write_contents(imageset: &Path, entry: &ImageEntry) -> Result<(), CatalogError> {
    let path = imageset.join(CONTENTS_FILE_NAME);

    if path.exists() {
        fs::remove_file(&path).map_err(CatalogError::io(&path))?;
    }

    let json = Contents::for_image(&entry.file_name).to_json()?;
    fs::write(&path, json).map_err(CatalogError::io(&path))?;

    Ok(())
}

/// Copy a file and its permissions, failing if the destination already exists
fn copy_new(from: &Path, to: &Path) -> Result<u64, CatalogError> {
    let mut reader = File::open(from).map_err(CatalogError::io(from))?;
    let permissions = reader
        .metadata()
        .map_err(CatalogError::io(from))?
        .permissions();

    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .map_err(CatalogError::io(to))?;

    let copied = io::copy(&mut reader, &mut writer).map_err(CatalogError::io(to))?;
    fs::set_permissions(to, permissions).map_err(CatalogError::io(to))?;

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder_for(temp: &TempDir) -> CatalogBuilder {
        let input = temp.path().join("in");
        fs::create_dir_all(&input).unwrap();
        CatalogBuilder::new(BuildConfig::new(input, temp.path().join("out")))
    }

    #[test]
    fn test_catalog_root() {
        let config = BuildConfig::new("/icons", "/app");
        assert_eq!(config.catalog_root(), PathBuf::from("/app/Images.xcassets"));
    }

    #[test]
    fn test_exclude_matches_relative_path() {
        let config = BuildConfig::new("/icons", "/app")
            .with_exclude([Pattern::new("drafts/*").unwrap()]);

        assert!(config.is_excluded(Path::new("drafts/wip.svg")));
        assert!(!config.is_excluded(Path::new("final/wip.svg")));
    }

    #[test]
    fn test_handle_skips_non_svg() {
        let temp = TempDir::new().unwrap();
        let mut builder = builder_for(&temp);
        fs::write(builder.config().input.join("notes.txt"), "x").unwrap();

        let outcome = builder.handle_entry(Path::new("notes.txt")).unwrap();
        assert_eq!(outcome, EntryOutcome::Skipped(SkipReason::NotSvg));
    }

    #[test]
    fn test_handle_skips_svg_named_directory() {
        let temp = TempDir::new().unwrap();
        let mut builder = builder_for(&temp);
        fs::create_dir_all(builder.config().input.join("folder.svg")).unwrap();

        let outcome = builder.handle_entry(Path::new("folder.svg")).unwrap();
        assert_eq!(outcome, EntryOutcome::Skipped(SkipReason::Directory));
    }

    #[test]
    fn test_handle_writes_imageset() {
        let temp = TempDir::new().unwrap();
        let mut builder = builder_for(&temp);
        fs::write(builder.config().input.join("star.svg"), "<svg/>").unwrap();
        builder.prepare_output().unwrap();

        let outcome = builder.handle_entry(Path::new("star.svg")).unwrap();
        assert!(outcome.is_handled());

        let imageset = builder.config().catalog_root().join("star.imageset");
        assert_eq!(
            fs::read_to_string(imageset.join("star.svg")).unwrap(),
            "<svg/>"
        );
        assert!(imageset.join(CONTENTS_FILE_NAME).is_file());
    }

    #[test]
    fn test_copy_refuses_existing_destination() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("from.svg");
        let to = temp.path().join("to.svg");
        fs::write(&from, "new").unwrap();
        fs::write(&to, "old").unwrap();

        match copy_new(&from, &to) {
            Err(CatalogError::Io { path, source }) => {
                assert_eq!(path, to);
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&to).unwrap(), "old");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let from = temp.path().join("from.svg");
        let to = temp.path().join("to.svg");
        fs::write(&from, "<svg/>").unwrap();
        fs::set_permissions(&from, fs::Permissions::from_mode(0o640)).unwrap();

        copy_new(&from, &to).unwrap();

        let mode = fs::metadata(&to).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_prepare_output_replaces_plain_file() {
        let temp = TempDir::new().unwrap();
        let builder = builder_for(&temp);
        let root = builder.config().catalog_root();
        fs::create_dir_all(&builder.config().output).unwrap();
        fs::write(&root, "not a catalog").unwrap();

        assert_eq!(builder.prepare_output().unwrap(), root);
        assert!(root.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_output_replaces_dangling_symlink() {
        let temp = TempDir::new().unwrap();
        let builder = builder_for(&temp);
        let root = builder.config().catalog_root();
        fs::create_dir_all(&builder.config().output).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), &root).unwrap();

        builder.prepare_output().unwrap();

        assert!(root.is_dir());
        assert!(!fs::symlink_metadata(&root).unwrap().file_type().is_symlink());
        assert!(!temp.path().join("gone").exists());
    }

    #[test]
    fn test_write_contents_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONTENTS_FILE_NAME);
        fs::write(&path, "stale").unwrap();

        let entry = ImageEntry::try_new("a.svg", "a.svg").unwrap();
        write_contents(temp.path(), &entry).unwrap();

        let contents: Contents =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(contents, Contents::for_image("a.svg"));
    }
}
