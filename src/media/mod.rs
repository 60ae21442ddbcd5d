// SPDX-License-Identifier: MPL-2.0
//! Media format support: the fixed set of raster formats the annotator
//! works with, plus extension-based detection.

pub mod image;

pub use self::image::EditedImage;

use std::path::Path;

/// File extensions treated as annotatable images, matched
/// case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["bmp", "gif", "jpeg", "jpg", "png", "tiff"];

/// Checks whether a path has a supported image extension.
///
/// This inspects only the file name; it never touches the filesystem.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
