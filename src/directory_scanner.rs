// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding and ordering image files.
//!
//! Scans a directory for supported raster formats and sorts the results
//! lexicographically by file name, so the annotator walks a folder in a
//! stable order.

use crate::error::Result;
use crate::media;
use std::path::{Path, PathBuf};

/// An ordered list of image files found in a directory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageList {
    files: Vec<PathBuf>,
}

impl ImageList {
    /// Creates a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Scans a directory for supported image files.
    ///
    /// Non-image entries and subdirectories are skipped. An empty result
    /// is not an error; the caller decides how to report it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn scan_directory(directory: &Path) -> Result<Self> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && media::is_supported_image(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(Self { files })
    }

    /// Builds a list from explicit paths, preserving the scanner's
    /// ordering guarantee. Used by benchmarks and tests.
    #[must_use]
    pub fn from_paths(mut files: Vec<PathBuf>) -> Self {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Self { files }
    }

    /// Returns the path at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(|p| p.as_path())
    }

    /// Returns the total number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Checks whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over the files in order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|p| p.as_path())
    }
}
