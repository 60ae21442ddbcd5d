// SPDX-License-Identifier: MPL-2.0
//! Image loading, saving and the in-memory content buffer.

use crate::error::{Error, Result};
use image::{DynamicImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads an image file and decodes it to RGBA8 pixels.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`]
/// if the bytes are not a decodable raster image.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let bytes = fs::read(path.as_ref()).map_err(|e| Error::Io(e.to_string()))?;
    decode_rgba(&bytes)
}

/// Decodes encoded image bytes (PNG, JPEG, ...) to RGBA8 pixels.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Encodes pixels into the format implied by the path's extension and
/// writes them, creating parent directories as needed.
///
/// JPEG cannot carry an alpha channel, so RGBA pixels are flattened to
/// RGB first; the round trip is lossy for that format.
///
/// # Errors
///
/// Returns [`Error::Io`] if the parent directory cannot be created and
/// [`Error::Encode`] if encoding or writing fails.
pub fn write_image(path: &Path, pixels: &RgbaImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let result = match extension.as_str() {
        "jpg" | "jpeg" => DynamicImage::ImageRgba8(pixels.clone()).to_rgb8().save(path),
        _ => pixels.save(path),
    };
    result.map_err(|e| Error::Encode(e.to_string()))
}

/// The content buffer of the annotator: decoded pixels plus the identity
/// they were loaded from and a dirty flag.
///
/// The buffer is exclusively owned by whichever session slot currently
/// holds it; all mutation flows through the brush during an active drag.
#[derive(Debug, Clone)]
pub struct EditedImage {
    path: PathBuf,
    pixels: RgbaImage,
    dirty: bool,
}

impl EditedImage {
    /// Loads the image at `path` into a fresh, clean buffer.
    pub fn load(path: &Path) -> Result<Self> {
        let pixels = load_rgba(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            pixels,
            dirty: false,
        })
    }

    /// Creates a buffer from raw pixels, used by tests and capture.
    #[must_use]
    pub fn from_pixels(path: PathBuf, pixels: RgbaImage) -> Self {
        Self {
            path,
            pixels,
            dirty: false,
        }
    }

    /// The identity this buffer was loaded from and commits back to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image width in content pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in content pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the buffer has unpersisted edits.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the buffer as edited.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Persists the buffer to its own identity, overwriting the previous
    /// file contents in place, and clears the dirty flag.
    ///
    /// There is no backup and no confirmation; callers that need either
    /// must provide them. Navigation relies on this exact overwrite
    /// semantic.
    pub fn commit(&mut self) -> Result<()> {
        write_image(&self.path, &self.pixels)?;
        self.dirty = false;
        Ok(())
    }

    /// Writes the buffer to an arbitrary path without retargeting the
    /// buffer's identity or clearing the dirty flag.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        write_image(path, &self.pixels)
    }
}
