//! The `Contents.json` descriptor Xcode expects inside every imageset.

use serde::{Deserialize, Serialize};

/// File name of the descriptor inside an imageset folder
pub const CONTENTS_FILE_NAME: &str = "Contents.json";

/// Descriptor for a single imageset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    /// Image variants (always exactly one here)
    pub images: Vec<ContentsImage>,

    /// Authoring metadata
    pub info: ContentsInfo,
}

/// One image variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsImage {
    pub filename: String,
    pub idiom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ContentsInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

impl Contents {
    /// Descriptor referencing a single universal image
    pub fn for_image(file_name: impl Into<String>) -> Self {
        Self {
            images: vec![ContentsImage {
                filename: file_name.into(),
                idiom: "universal".to_string(),
            }],
            info: ContentsInfo::default(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
