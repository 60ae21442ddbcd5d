// SPDX-License-Identifier: MPL-2.0
//! `pixelmark` is the interactive core of two small desktop tools: a
//! multi-image freehand annotator with zoom and pan, and a screen-region
//! capture tool with rubber-band selection.
//!
//! The crate owns the coordinate-transform and drag-state engine shared by
//! both tools: mapping pointer events from view space to content space,
//! sequencing press/move/release/cancel into paint strokes or validated
//! selection rectangles, and the commit timing that ties navigation to
//! implicit persistence. Window construction, dialogs and OS capture stay
//! outside; a shell drives the sessions with pointer events and reacts to
//! the events they emit.

#![doc(html_root_url = "https://docs.rs/pixelmark/0.1.0")]

pub mod capture;
pub mod config;
pub mod directory_scanner;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod image_navigation;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
