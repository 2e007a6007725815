//! Domain types for the catalog builder.
//!
//! - Image entries: SVG files discovered under the input root
//! - Contents: the `Contents.json` descriptor written into each imageset

pub mod contents;
pub mod image;

// Re-export commonly used types
pub use contents::{Contents, ContentsImage, ContentsInfo, CONTENTS_FILE_NAME};
pub use image::{file_name_of, is_valid_file_name, split_extension, ImageEntry, SVG_EXTENSION};
