// SPDX-License-Identifier: MPL-2.0
//! Annotator session: folder navigation, freehand painting and
//! auto-save-on-navigate.
//!
//! `EditorSession` follows a "state down, events up" pattern: the shell
//! calls methods for each input event and receives [`EditorEvent`]s to
//! present (zoom label, position label, error notifications). The
//! session owns the content buffer exclusively; every mutation flows
//! through the brush while a drag is active.

pub mod brush;

pub use brush::{BrushTool, BrushWidth};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::image_navigation::ImageNavigator;
use crate::media::EditedImage;
use crate::ui::state::drag::DragController;
use crate::ui::state::viewport::ViewTransform;
use crate::ui::state::zoom::ZoomState;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Events emitted towards the shell.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The buffer for `path` was persisted to its own identity.
    Committed { path: PathBuf },
    /// Persisting failed; navigation proceeds regardless.
    CommitFailed { path: PathBuf, error: Error },
    /// The current item changed; `index` is zero-based.
    NavigationChanged { index: usize, total: usize },
    /// An item could not be decoded; the surface shows no image.
    LoadFailed { path: PathBuf, error: Error },
    /// The scanned folder contained no supported images.
    EmptyDirectory { directory: PathBuf },
    /// The zoom level changed; `percent` is the display label value.
    ZoomChanged { percent: u32 },
}

/// The annotator session.
///
/// Zoom and view offset deliberately persist across navigation: the
/// observed tool keeps the viewing position while walking a series, and
/// that behavior is preserved rather than silently "fixed". A shell that
/// wants per-image reset can call [`EditorSession::reset_zoom`] when it
/// sees [`EditorEvent::NavigationChanged`].
#[derive(Debug)]
pub struct EditorSession {
    navigator: ImageNavigator,
    buffer: Option<EditedImage>,
    zoom: ZoomState,
    view_offset: Point,
    drag: DragController<BrushTool>,
}

impl EditorSession {
    /// Creates a session with default brush settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            navigator: ImageNavigator::new(),
            buffer: None,
            zoom: ZoomState::default(),
            view_offset: Point::ORIGIN,
            drag: DragController::new(BrushTool::default()),
        }
    }

    /// Creates a session with brush width and color taken from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let width = BrushWidth::new(config.brush_width.unwrap_or(crate::config::DEFAULT_BRUSH_WIDTH));
        let color = config.stroke_color.unwrap_or(crate::config::DEFAULT_STROKE_COLOR);
        Self {
            drag: DragController::new(BrushTool::new(width, color)),
            ..Self::new()
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Scans `directory` and loads its first image.
    ///
    /// A dirty buffer from a previously open folder is committed first.
    /// An empty folder leaves the image set empty and disables
    /// navigation; that is reported, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory itself cannot be read.
    pub fn open_folder(&mut self, directory: &Path) -> Result<Vec<EditorEvent>> {
        let mut events = self.commit_current();
        self.navigator.scan_directory(directory)?;

        if self.navigator.is_empty() {
            self.buffer = None;
            events.push(EditorEvent::EmptyDirectory {
                directory: directory.to_path_buf(),
            });
        } else {
            self.load_current(&mut events);
        }
        Ok(events)
    }

    /// Jumps to the image at `index`.
    ///
    /// Commits the current buffer first, then loads item `index` into a
    /// fresh buffer. Out-of-range indices are a no-op.
    pub fn load_at(&mut self, index: usize) -> Vec<EditorEvent> {
        if index >= self.navigator.len() {
            return Vec::new();
        }
        let mut events = self.commit_current();
        self.navigator.jump_to(index);
        self.load_current(&mut events);
        events
    }

    /// Moves to the next image, committing the current buffer first.
    /// No-op at the last image.
    pub fn next(&mut self) -> Vec<EditorEvent> {
        match self.navigator.current_index() {
            Some(index) if self.navigator.can_next() => self.load_at(index + 1),
            _ => Vec::new(),
        }
    }

    /// Moves to the previous image, committing the current buffer first.
    /// No-op at the first image.
    pub fn previous(&mut self) -> Vec<EditorEvent> {
        match self.navigator.current_index() {
            Some(index) if self.navigator.can_previous() => self.load_at(index - 1),
            _ => Vec::new(),
        }
    }

    /// Ends the session, committing the current buffer without prompting.
    pub fn close(&mut self) -> Vec<EditorEvent> {
        let events = self.commit_current();
        self.buffer = None;
        events
    }

    /// Whether a further image exists after the current one.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.navigator.can_next()
    }

    /// Whether a further image exists before the current one.
    #[must_use]
    pub fn can_previous(&self) -> bool {
        self.navigator.can_previous()
    }

    /// One-based position label, e.g. `"3/7"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        self.navigator.position_label()
    }

    /// The currently loaded buffer, if any.
    #[must_use]
    pub fn buffer(&self) -> Option<&EditedImage> {
        self.buffer.as_ref()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persists the current buffer to its own identity.
    ///
    /// Overwrite-in-place: no backup, no confirmation, no undo. This is
    /// the single commit point navigation and close call into.
    ///
    /// # Errors
    ///
    /// Returns the encode/write error. With no buffer loaded this is a
    /// no-op.
    pub fn commit(&mut self) -> Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) => buffer.commit(),
            None => Ok(()),
        }
    }

    /// Exports the current buffer to an arbitrary path without touching
    /// the session identity or dirty flag.
    ///
    /// # Errors
    ///
    /// Returns an error when no image is loaded or encoding fails.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        match self.buffer.as_ref() {
            Some(buffer) => buffer.save_as(path),
            None => Err(Error::Io("no image loaded".to_string())),
        }
    }

    /// Commits the current buffer when dirty, mapping the outcome to
    /// events. Failure is reported and never blocks navigation.
    fn commit_current(&mut self) -> Vec<EditorEvent> {
        let Some(buffer) = self.buffer.as_mut() else {
            return Vec::new();
        };
        if !buffer.is_dirty() {
            return Vec::new();
        }
        let path = buffer.path().to_path_buf();
        match buffer.commit() {
            Ok(()) => {
                info!(path = %path.display(), "annotated image saved");
                vec![EditorEvent::Committed { path }]
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "saving annotated image failed");
                vec![EditorEvent::CommitFailed { path, error }]
            }
        }
    }

    /// Loads the navigator's current item into a fresh buffer.
    fn load_current(&mut self, events: &mut Vec<EditorEvent>) {
        let Some(path) = self.navigator.current_path().map(Path::to_path_buf) else {
            return;
        };
        match EditedImage::load(&path) {
            Ok(buffer) => {
                debug!(path = %path.display(), "image loaded");
                self.buffer = Some(buffer);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "image failed to load");
                self.buffer = None;
                events.push(EditorEvent::LoadFailed { path, error });
            }
        }
        if let Some(index) = self.navigator.current_index() {
            events.push(EditorEvent::NavigationChanged {
                index,
                total: self.navigator.len(),
            });
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Starts a paint stroke at a view-space point. Ignored when no
    /// image is loaded.
    pub fn pointer_pressed(&mut self, view: Point) {
        let transform = self.transform();
        if let Some(buffer) = self.buffer.as_mut() {
            self.drag.press(view, &transform, buffer.pixels_mut());
        }
    }

    /// Continues the active stroke. Spurious moves outside a drag are
    /// ignored.
    pub fn pointer_moved(&mut self, view: Point) {
        let transform = self.transform();
        if let Some(buffer) = self.buffer.as_mut() {
            if self.drag.drag_to(view, &transform, buffer.pixels_mut()) {
                buffer.mark_dirty();
            }
        }
    }

    /// Ends the active stroke.
    pub fn pointer_released(&mut self, view: Point) {
        let transform = self.transform();
        if let Some(buffer) = self.buffer.as_mut() {
            self.drag.release(view, &transform, buffer.pixels_mut());
        }
    }

    /// Cancels the active stroke. Pixels already painted stay; the paint
    /// action mutates incrementally and is not rolled back.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Changes the brush width for subsequent strokes.
    pub fn set_brush_width(&mut self, width: BrushWidth) {
        self.drag.tool_mut().set_width(width);
    }

    /// Current brush width.
    #[must_use]
    pub fn brush_width(&self) -> BrushWidth {
        self.drag.tool().width()
    }

    // =========================================================================
    // View
    // =========================================================================

    /// The current view-to-content mapping.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.zoom.factor(), self.view_offset)
    }

    /// Sets the view-space position of the content origin (the negated
    /// scroll offset of a scrolling surface).
    pub fn set_view_offset(&mut self, offset: Point) {
        self.view_offset = offset;
    }

    /// Steps zoom in. No-op while no image is loaded.
    pub fn zoom_in(&mut self) -> Vec<EditorEvent> {
        if self.buffer.is_none() {
            return Vec::new();
        }
        self.zoom.zoom_in();
        vec![self.zoom_changed()]
    }

    /// Steps zoom out. No-op while no image is loaded.
    pub fn zoom_out(&mut self) -> Vec<EditorEvent> {
        if self.buffer.is_none() {
            return Vec::new();
        }
        self.zoom.zoom_out();
        vec![self.zoom_changed()]
    }

    /// Resets zoom to 100%. No-op while no image is loaded.
    pub fn reset_zoom(&mut self) -> Vec<EditorEvent> {
        if self.buffer.is_none() {
            return Vec::new();
        }
        self.zoom.reset();
        vec![self.zoom_changed()]
    }

    /// Display label for the current zoom, e.g. `"125%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        self.zoom.label()
    }

    fn zoom_changed(&self) -> EditorEvent {
        EditorEvent::ZoomChanged {
            percent: self.zoom.factor().percent(),
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;
    use tempfile::tempdir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn create_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(64, 48, RED)
            .save(&path)
            .expect("failed to write test image");
        path
    }

    fn open_three(dir: &Path) -> EditorSession {
        create_image(dir, "a.png");
        create_image(dir, "b.png");
        create_image(dir, "c.png");
        let mut session = EditorSession::new();
        session.open_folder(dir).expect("open_folder failed");
        session
    }

    #[test]
    fn open_folder_loads_first_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let session = open_three(temp_dir.path());

        assert_eq!(session.position_label(), "1/3");
        assert!(session.buffer().is_some());
        assert!(session.can_next());
        assert!(!session.can_previous());
    }

    #[test]
    fn open_empty_folder_reports_and_disables_navigation() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = EditorSession::new();
        let events = session.open_folder(temp_dir.path()).expect("open_folder failed");

        assert!(matches!(events[0], EditorEvent::EmptyDirectory { .. }));
        assert!(session.buffer().is_none());
        assert!(!session.can_next());
        assert!(!session.can_previous());
        assert_eq!(session.position_label(), "0/0");
    }

    #[test]
    fn next_commits_dirty_buffer_before_loading() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(20.0, 20.0));
        session.pointer_released(Point::new(20.0, 20.0));

        let events = session.next();
        assert!(
            matches!(&events[0], EditorEvent::Committed { path } if path.ends_with("a.png")),
            "expected commit first, got {events:?}"
        );
        assert!(matches!(
            events[1],
            EditorEvent::NavigationChanged { index: 1, total: 3 }
        ));

        // The persisted file carries the stroke.
        let saved = image::open(temp_dir.path().join("a.png"))
            .expect("reload failed")
            .to_rgba8();
        assert_eq!(*saved.get_pixel(15, 15), WHITE);
        assert_eq!(*saved.get_pixel(60, 5), RED);

        // The newly loaded image is unmodified.
        let buffer = session.buffer().expect("buffer missing");
        assert!(!buffer.is_dirty());
        assert_eq!(*buffer.pixels().get_pixel(15, 15), RED);
    }

    #[test]
    fn clean_buffer_is_not_rewritten_on_navigate() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        let events = session.next();
        assert!(matches!(
            events[0],
            EditorEvent::NavigationChanged { index: 1, total: 3 }
        ));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn next_at_last_index_is_noop() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.next();
        session.next();
        assert!(!session.can_next());

        let events = session.next();
        assert!(events.is_empty());
        assert_eq!(session.position_label(), "3/3");
    }

    #[test]
    fn previous_at_first_index_is_noop() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        let events = session.previous();
        assert!(events.is_empty());
        assert_eq!(session.position_label(), "1/3");
    }

    #[test]
    fn close_commits_without_prompting() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.pointer_pressed(Point::new(5.0, 5.0));
        session.pointer_moved(Point::new(8.0, 8.0));
        session.pointer_released(Point::new(8.0, 8.0));

        let events = session.close();
        assert!(matches!(events[0], EditorEvent::Committed { .. }));
        assert!(session.buffer().is_none());

        let saved = image::open(temp_dir.path().join("a.png"))
            .expect("reload failed")
            .to_rgba8();
        assert_eq!(*saved.get_pixel(6, 6), WHITE);
    }

    #[test]
    fn painting_respects_the_zoom_transform() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());
        session.zoom_in(); // 125%

        // View (25, 25) maps to content (20, 20).
        session.pointer_pressed(Point::new(25.0, 25.0));
        session.pointer_moved(Point::new(25.0, 25.0));
        session.pointer_released(Point::new(25.0, 25.0));

        let buffer = session.buffer().expect("buffer missing");
        assert_eq!(*buffer.pixels().get_pixel(20, 20), WHITE);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn zoom_is_gated_on_loaded_content() {
        let mut session = EditorSession::new();
        assert!(session.zoom_in().is_empty());
        assert!(session.zoom_out().is_empty());
        assert!(session.reset_zoom().is_empty());
        assert_eq!(session.zoom_label(), "100%");
    }

    #[test]
    fn zoom_persists_across_navigation() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.zoom_in();
        session.zoom_in();
        let label_before = session.zoom_label();

        session.next();
        assert_eq!(session.zoom_label(), label_before);
    }

    #[test]
    fn zoom_events_carry_the_percent_label() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        let events = session.zoom_in();
        assert!(matches!(events[0], EditorEvent::ZoomChanged { percent: 125 }));
    }

    #[test]
    fn moves_without_press_do_not_paint() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.pointer_moved(Point::new(30.0, 30.0));

        let buffer = session.buffer().expect("buffer missing");
        assert!(!buffer.is_dirty());
        assert_eq!(*buffer.pixels().get_pixel(30, 30), RED);
    }

    #[test]
    fn cancel_keeps_already_painted_pixels() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(14.0, 14.0));
        session.cancel_drag();

        {
            let buffer = session.buffer().expect("buffer missing");
            assert!(buffer.is_dirty());
            assert_eq!(*buffer.pixels().get_pixel(12, 12), WHITE);
        }

        // The cancelled session is gone: further moves are ignored.
        session.pointer_moved(Point::new(40.0, 40.0));
        let buffer = session.buffer().expect("buffer missing");
        assert_eq!(*buffer.pixels().get_pixel(40, 40), RED);
    }

    #[test]
    fn save_as_exports_without_retargeting() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());
        let export = temp_dir.path().join("export.png");

        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(12.0, 12.0));
        session.pointer_released(Point::new(12.0, 12.0));
        session.save_as(&export).expect("save_as failed");

        assert!(export.exists());
        // The original is untouched until navigation commits.
        let original = image::open(temp_dir.path().join("a.png"))
            .expect("reload failed")
            .to_rgba8();
        assert_eq!(*original.get_pixel(11, 11), RED);
    }

    #[test]
    fn save_as_without_image_errors() {
        let session = EditorSession::new();
        assert!(session.save_as(Path::new("/tmp/nothing.png")).is_err());
    }

    #[test]
    fn from_config_applies_and_clamps_brush_settings() {
        let config = Config {
            brush_width: Some(99),
            ..Config::default()
        };
        let session = EditorSession::from_config(&config);
        assert_eq!(session.brush_width().value(), 50);
    }

    #[test]
    fn commit_failure_does_not_block_navigation() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = open_three(temp_dir.path());

        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(20.0, 20.0));
        session.pointer_released(Point::new(20.0, 20.0));

        // Make the commit target unwritable by replacing it with a directory.
        let target = temp_dir.path().join("a.png");
        std::fs::remove_file(&target).expect("remove failed");
        std::fs::create_dir(&target).expect("mkdir failed");

        let events = session.next();
        assert!(matches!(events[0], EditorEvent::CommitFailed { .. }));
        assert!(matches!(
            events[1],
            EditorEvent::NavigationChanged { index: 1, total: 3 }
        ));
        assert_eq!(session.position_label(), "2/3");
    }
}
