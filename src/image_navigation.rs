// SPDX-License-Identifier: MPL-2.0
//! Image navigation module for managing the image list and the current
//! index.
//!
//! `ImageNavigator` is pure index arithmetic: it never touches pixels or
//! the filesystem beyond scanning. Navigation does not wrap; at either
//! end the corresponding direction is simply unavailable, which the shell
//! reflects in its button state via [`ImageNavigator::can_next`] and
//! [`ImageNavigator::can_previous`]. Commit timing around navigation is
//! owned by the editor session.

use crate::directory_scanner::ImageList;
use crate::error::Result;
use std::path::Path;

/// Manages navigation through an ordered list of images.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageNavigator {
    list: ImageList,
    current: Option<usize>,
}

impl ImageNavigator {
    /// Creates a new empty navigator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: ImageList::new(),
            current: None,
        }
    }

    /// Scans `directory` and replaces the image list.
    ///
    /// The current index becomes 0 when anything was found, `None`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn scan_directory(&mut self, directory: &Path) -> Result<()> {
        self.list = ImageList::scan_directory(directory)?;
        self.current = if self.list.is_empty() { None } else { Some(0) };
        Ok(())
    }

    /// Replaces the image list directly. Used by benchmarks and tests.
    pub fn set_list(&mut self, list: ImageList) {
        self.current = if list.is_empty() { None } else { Some(0) };
        self.list = list;
    }

    /// Returns the path of the current image, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current.and_then(|idx| self.list.get(idx))
    }

    /// Returns the current index, if any.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the total number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Checks whether the navigator holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Whether a further image exists after the current one.
    #[must_use]
    pub fn can_next(&self) -> bool {
        matches!(self.current, Some(idx) if idx + 1 < self.list.len())
    }

    /// Whether a further image exists before the current one.
    #[must_use]
    pub fn can_previous(&self) -> bool {
        matches!(self.current, Some(idx) if idx > 0)
    }

    /// Moves to the next image and returns its path.
    ///
    /// Returns `None` at the last image or when the list is empty; the
    /// index is unchanged in that case.
    pub fn advance(&mut self) -> Option<&Path> {
        if self.can_next() {
            self.current = self.current.map(|idx| idx + 1);
            self.current_path()
        } else {
            None
        }
    }

    /// Moves to the previous image and returns its path.
    ///
    /// Returns `None` at the first image or when the list is empty.
    pub fn retreat(&mut self) -> Option<&Path> {
        if self.can_previous() {
            self.current = self.current.map(|idx| idx - 1);
            self.current_path()
        } else {
            None
        }
    }

    /// Jumps to the given index and returns the path there.
    ///
    /// Returns `None` without changing state when the index is out of
    /// range.
    pub fn jump_to(&mut self, index: usize) -> Option<&Path> {
        if index < self.list.len() {
            self.current = Some(index);
            self.current_path()
        } else {
            None
        }
    }

    /// One-based position label for display, e.g. `"3/7"`, or `"0/0"`
    /// when the list is empty.
    #[must_use]
    pub fn position_label(&self) -> String {
        match self.current {
            Some(idx) => format!("{}/{}", idx + 1, self.list.len()),
            None => "0/0".to_string(),
        }
    }
}
