//! SVG image entries discovered under the input root.

use std::path::{Path, PathBuf};

/// Extension (without the dot) that marks an entry as an image
pub const SVG_EXTENSION: &str = "svg";

/// A validated SVG file found during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Path relative to the input root
    pub source_path: PathBuf,

    /// Base name including the extension (e.g. `arrow_left.svg`)
    pub file_name: String,

    /// Base name without the extension (e.g. `arrow_left`)
    pub icon_name: String,
}

impl ImageEntry {
    /// Build an entry from a relative path, or `None` if its file name
    /// is not a legal icon file name.
    pub fn try_new(source_path: impl Into<PathBuf>, file_name: &str) -> Option<Self> {
        if !is_valid_file_name(file_name) {
            return None;
        }

        let icon_name = file_name
            .strip_suffix(".svg")
            .map(str::to_string)?;

        Some(Self {
            source_path: source_path.into(),
            file_name: file_name.to_string(),
            icon_name,
        })
    }

    /// Name of the imageset folder for this entry (`<icon_name>.imageset`)
    pub fn imageset_dir_name(&self) -> String {
        format!("{}.imageset", self.icon_name)
    }
}

/// Last path component of a relative path, lossily converted to UTF-8
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Split a file name on its last `.`, returning the extension if any.
///
/// Unlike `Path::extension`, a leading dot counts: `.svg` yields `svg`.
pub fn split_extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Check a file name against `^[A-Za-z0-9_]+\.svg$`
pub fn is_valid_file_name(file_name: &str) -> bool {
    match file_name.strip_suffix(".svg") {
        Some(stem) => {
            !stem.is_empty()
                && stem
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}
