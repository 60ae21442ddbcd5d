// SPDX-License-Identifier: MPL-2.0
//! Screen-region capture session: rubber-band selection over a frozen
//! screen image, numbered file output.
//!
//! The OS capture itself stays behind the [`ScreenSource`] port; the
//! session owns everything else — counter parsing, the selection
//! overlay's drag state, minimum-size validation, file naming and the
//! auto-increment after a successful capture.

pub mod selection;

pub use selection::{RubberBand, SelectionRejection};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::{PixelRect, Point};
use crate::media;
use crate::ui::state::drag::DragController;
use crate::ui::state::viewport::ViewTransform;
use image::RgbaImage;
use std::path::PathBuf;
use tracing::{info, warn};

/// Port for full-screen and region capture.
///
/// Adapters talk to the OS; see `infrastructure::screen` for the real
/// one. Tests substitute a fake.
pub trait ScreenSource {
    /// Captures the entire virtual display.
    ///
    /// # Errors
    ///
    /// Returns a capture error when the OS call fails.
    fn capture_screen(&mut self) -> Result<RgbaImage>;

    /// Captures a pixel rectangle in screen coordinates.
    ///
    /// # Errors
    ///
    /// Returns a capture error when the OS call fails or the region
    /// falls outside the screen.
    fn capture_region(&mut self, region: PixelRect) -> Result<RgbaImage>;
}

/// Events emitted towards the shell.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A selection passed validation; capture and save follow
    /// immediately.
    SelectionFinalized { region: PixelRect },
    /// The selection was below the minimum size; the overlay is
    /// dismissed and nothing is written.
    SelectionRejected { reason: SelectionRejection },
    /// A numbered file was written; the counter field now shows
    /// `next_counter`.
    Saved { path: PathBuf, next_counter: u32 },
    /// Capturing or writing failed; the overlay is dismissed.
    CaptureFailed { error: Error },
    /// The counter field does not hold a number; the previous value is
    /// kept and no selection starts.
    CounterRejected { input: String },
}

/// The capture session.
///
/// The overlay renders at scale 1.0 with no offset, so view space and
/// screen space coincide; the identity transform below is that fact
/// spelled out.
#[derive(Debug)]
pub struct CaptureSession<S: ScreenSource> {
    source: S,
    save_dir: PathBuf,
    prefix: String,
    /// Number used for the next capture file.
    counter: u32,
    /// Text-field mirror of the counter, parsed at selection start.
    counter_input: String,
    drag: DragController<RubberBand>,
    /// Frozen full-screen image shown behind the overlay while
    /// selecting; `Some` exactly while a selection is in progress.
    background: Option<RgbaImage>,
}

impl<S: ScreenSource> CaptureSession<S> {
    /// Creates a session writing `<prefix>-<n>.png` files into
    /// `save_dir`.
    #[must_use]
    pub fn new(source: S, save_dir: PathBuf, prefix: String) -> Self {
        let counter = crate::config::DEFAULT_CAPTURE_COUNTER;
        Self {
            source,
            save_dir,
            prefix,
            counter,
            counter_input: counter.to_string(),
            drag: DragController::new(RubberBand::new()),
            background: None,
        }
    }

    /// Creates a session with prefix and save directory taken from
    /// `config`, falling back to the platform pictures directory.
    #[must_use]
    pub fn from_config(source: S, config: &Config) -> Self {
        let prefix = config
            .capture_prefix
            .clone()
            .unwrap_or_else(|| crate::config::DEFAULT_CAPTURE_PREFIX.to_string());
        let save_dir = config
            .capture_dir
            .clone()
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(source, save_dir, prefix)
    }

    /// Current contents of the counter field.
    #[must_use]
    pub fn counter_input(&self) -> &str {
        &self.counter_input
    }

    /// Replaces the counter field contents. Parsing happens when a
    /// selection starts.
    pub fn set_counter_input(&mut self, input: impl Into<String>) {
        self.counter_input = input.into();
    }

    /// Whether a selection overlay is currently up.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.background.is_some()
    }

    /// The frozen screen image behind the overlay, while selecting.
    #[must_use]
    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    /// The in-progress rubber-band rectangle, for overlay drawing.
    #[must_use]
    pub fn selection_preview(&self) -> Option<&crate::geometry::SelectionRect> {
        self.drag.tool().candidate()
    }

    /// Parses the counter field and opens the selection overlay.
    ///
    /// A second call while the overlay is already up is a no-op. A
    /// non-numeric counter rejects without opening; values below 1 clamp
    /// to 1.
    pub fn begin_selection(&mut self) -> Vec<CaptureEvent> {
        if self.is_selecting() {
            return Vec::new();
        }

        match parse_counter(&self.counter_input) {
            Ok(value) => self.counter = value,
            Err(error) => {
                let input = self.counter_input.clone();
                warn!(%input, %error, "counter field is not a number");
                return vec![CaptureEvent::CounterRejected { input }];
            }
        }

        match self.source.capture_screen() {
            Ok(screen) => {
                self.background = Some(screen);
                Vec::new()
            }
            Err(error) => vec![CaptureEvent::CaptureFailed { error }],
        }
    }

    /// Starts the rubber band at a screen point. Ignored while no
    /// overlay is up.
    pub fn pointer_pressed(&mut self, position: Point) {
        if self.is_selecting() {
            self.drag.press(position, &ViewTransform::identity(), &mut ());
        }
    }

    /// Updates the rubber band. Spurious moves outside a drag are
    /// ignored.
    pub fn pointer_moved(&mut self, position: Point) {
        if self.is_selecting() {
            self.drag.drag_to(position, &ViewTransform::identity(), &mut ());
        }
    }

    /// Finishes the selection: validates, captures the region, writes
    /// the numbered file and advances the counter. Either way the
    /// overlay is dismissed.
    pub fn pointer_released(&mut self, position: Point) -> Vec<CaptureEvent> {
        let Some(outcome) = self.drag.release(position, &ViewTransform::identity(), &mut ())
        else {
            return Vec::new();
        };
        self.background = None;

        match outcome {
            Ok(rect) => {
                let region = rect.to_pixel_rect();
                let mut events = vec![CaptureEvent::SelectionFinalized { region }];
                events.push(self.capture_and_save(region));
                events
            }
            Err(reason) => vec![CaptureEvent::SelectionRejected { reason }],
        }
    }

    /// Dismisses the overlay without capturing (the escape signal).
    pub fn cancel_selection(&mut self) {
        self.drag.cancel();
        self.background = None;
    }

    fn capture_and_save(&mut self, region: PixelRect) -> CaptureEvent {
        let pixels = match self.source.capture_region(region) {
            Ok(pixels) => pixels,
            Err(error) => return CaptureEvent::CaptureFailed { error },
        };

        let file_name = format!("{}-{}.png", self.prefix, self.counter);
        let path = self.save_dir.join(file_name);
        if let Err(error) = media::image::write_image(&path, &pixels) {
            return CaptureEvent::CaptureFailed { error };
        }

        info!(path = %path.display(), "captured region saved");
        self.counter += 1;
        self.counter_input = self.counter.to_string();
        CaptureEvent::Saved {
            path,
            next_counter: self.counter,
        }
    }
}

/// Parses the counter field. Values below 1 clamp to 1.
fn parse_counter(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<i64>()
        .map(|value| value.clamp(1, i64::from(u32::MAX)) as u32)
        .map_err(|_| Error::InvalidCounter(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaptureError;
    use image::Rgba;
    use tempfile::tempdir;

    /// Fake screen: a fixed-size gradient so region content is
    /// position-dependent.
    struct FakeScreen {
        width: u32,
        height: u32,
        screen_captures: usize,
        fail_region: bool,
    }

    impl FakeScreen {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                screen_captures: 0,
                fail_region: false,
            }
        }

        fn pixels(&self) -> RgbaImage {
            RgbaImage::from_fn(self.width, self.height, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
            })
        }
    }

    impl ScreenSource for FakeScreen {
        fn capture_screen(&mut self) -> Result<RgbaImage> {
            self.screen_captures += 1;
            Ok(self.pixels())
        }

        fn capture_region(&mut self, region: PixelRect) -> Result<RgbaImage> {
            if self.fail_region {
                return Err(CaptureError::CaptureFailed("simulated".to_string()).into());
            }
            if !region.fits_within(self.width, self.height) {
                return Err(CaptureError::RegionOutOfBounds {
                    requested: (region.x, region.y, region.width, region.height),
                    screen_size: (self.width, self.height),
                }
                .into());
            }
            let full = self.pixels();
            Ok(image::imageops::crop_imm(&full, region.x, region.y, region.width, region.height)
                .to_image())
        }
    }

    fn session_in(dir: &std::path::Path) -> CaptureSession<FakeScreen> {
        CaptureSession::new(
            FakeScreen::new(200, 150),
            dir.to_path_buf(),
            "Example".to_string(),
        )
    }

    fn drag(session: &mut CaptureSession<FakeScreen>, from: Point, to: Point) -> Vec<CaptureEvent> {
        session.pointer_pressed(from);
        session.pointer_moved(to);
        session.pointer_released(to)
    }

    #[test]
    fn successful_capture_writes_numbered_file_and_increments() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.set_counter_input("5");
        let events = session.begin_selection();
        assert!(events.is_empty());
        assert!(session.is_selecting());

        let events = drag(&mut session, Point::new(20.0, 20.0), Point::new(60.0, 50.0));
        assert!(matches!(
            events[0],
            CaptureEvent::SelectionFinalized {
                region: PixelRect {
                    x: 20,
                    y: 20,
                    width: 40,
                    height: 30
                }
            }
        ));
        let expected = temp_dir.path().join("Example-5.png");
        assert!(
            matches!(&events[1], CaptureEvent::Saved { path, next_counter: 6 } if *path == expected)
        );
        assert!(expected.exists());
        assert_eq!(session.counter_input(), "6");
        assert!(!session.is_selecting());

        // The written region has the gradient of its screen position.
        let saved = image::open(&expected).expect("reload failed").to_rgba8();
        assert_eq!(saved.dimensions(), (40, 30));
        assert_eq!(*saved.get_pixel(0, 0), Rgba([20, 20, 0, 255]));
    }

    #[test]
    fn tiny_selection_is_rejected_and_nothing_is_written() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.begin_selection();
        let events = drag(&mut session, Point::new(100.0, 100.0), Point::new(103.0, 103.0));

        assert!(matches!(events[0], CaptureEvent::SelectionRejected { .. }));
        assert!(!session.is_selecting());
        assert_eq!(session.counter_input(), "1");
        assert_eq!(
            std::fs::read_dir(temp_dir.path()).unwrap().count(),
            0,
            "no file may be written for a rejected selection"
        );
    }

    #[test]
    fn non_numeric_counter_is_rejected_and_keeps_previous_value() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.set_counter_input("abc");
        let events = session.begin_selection();

        assert!(matches!(
            &events[0],
            CaptureEvent::CounterRejected { input } if input == "abc"
        ));
        assert!(!session.is_selecting());

        // The field can be corrected and is parsed again on the next start.
        session.set_counter_input("3");
        session.begin_selection();
        let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        assert!(
            matches!(&events[1], CaptureEvent::Saved { path, .. } if path.ends_with("Example-3.png"))
        );
    }

    #[test]
    fn counter_below_one_clamps_to_one() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.set_counter_input("-4");
        session.begin_selection();
        let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(40.0, 40.0));

        assert!(
            matches!(&events[1], CaptureEvent::Saved { path, .. } if path.ends_with("Example-1.png"))
        );
    }

    #[test]
    fn begin_selection_while_selecting_is_noop() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.begin_selection();
        let first_captures = session.source.screen_captures;
        let events = session.begin_selection();

        assert!(events.is_empty());
        assert_eq!(session.source.screen_captures, first_captures);
    }

    #[test]
    fn cancel_dismisses_overlay_without_writing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.begin_selection();
        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(80.0, 80.0));
        session.cancel_selection();

        assert!(!session.is_selecting());
        assert!(session.selection_preview().is_none());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn pointer_events_outside_overlay_are_ignored() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        session.pointer_pressed(Point::new(10.0, 10.0));
        session.pointer_moved(Point::new(80.0, 80.0));
        let events = session.pointer_released(Point::new(80.0, 80.0));

        assert!(events.is_empty());
    }

    #[test]
    fn save_dir_is_created_on_demand() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("shots").join("en");
        let mut session = CaptureSession::new(
            FakeScreen::new(200, 150),
            nested.clone(),
            "Example".to_string(),
        );

        session.begin_selection();
        let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(30.0, 30.0));

        assert!(matches!(events[1], CaptureEvent::Saved { .. }));
        assert!(nested.join("Example-1.png").exists());
    }

    #[test]
    fn region_capture_failure_is_reported_and_counter_keeps() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());
        session.source.fail_region = true;

        session.begin_selection();
        let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

        assert!(matches!(events[0], CaptureEvent::SelectionFinalized { .. }));
        assert!(matches!(events[1], CaptureEvent::CaptureFailed { .. }));
        assert_eq!(session.counter_input(), "1");
        assert!(!session.is_selecting());
    }

    #[test]
    fn from_config_uses_configured_prefix_and_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = Config {
            capture_prefix: Some("Shot".to_string()),
            capture_dir: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };
        let mut session = CaptureSession::from_config(FakeScreen::new(200, 150), &config);

        session.begin_selection();
        let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(40.0, 40.0));

        assert!(
            matches!(&events[1], CaptureEvent::Saved { path, .. } if path.ends_with("Shot-1.png"))
        );
        assert!(temp_dir.path().join("Shot-1.png").exists());
    }

    #[test]
    fn consecutive_captures_number_sequentially() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session_in(temp_dir.path());

        for expected in 1..=3u32 {
            session.begin_selection();
            let events = drag(&mut session, Point::new(0.0, 0.0), Point::new(40.0, 40.0));
            let name = format!("Example-{expected}.png");
            assert!(
                matches!(&events[1], CaptureEvent::Saved { path, .. } if path.ends_with(&name))
            );
        }
        assert_eq!(session.counter_input(), "4");
    }
}
