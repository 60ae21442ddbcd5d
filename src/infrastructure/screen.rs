// SPDX-License-Identifier: MPL-2.0
//! Screen capture adapter backed by the `xcap` crate.
//!
//! This is the layer that talks to the OS. Regions are cropped out of a
//! fresh full-screen capture of the primary monitor.

use crate::capture::ScreenSource;
use crate::error::{CaptureError, Result};
use crate::geometry::PixelRect;
use image::RgbaImage;
use xcap::Monitor;

/// Captures from the primary monitor via `xcap`.
#[derive(Debug, Default)]
pub struct XcapScreenSource;

impl XcapScreenSource {
    /// Creates a new adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor> {
        let monitors =
            Monitor::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        monitors
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| {
                // Fallback: if no monitor reports as primary, use the first one
                let all = Monitor::all().ok()?;
                all.into_iter().next()
            })
            .ok_or_else(|| CaptureError::NoMonitor.into())
    }
}

impl ScreenSource for XcapScreenSource {
    fn capture_screen(&mut self) -> Result<RgbaImage> {
        let monitor = Self::primary_monitor()?;
        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        Ok(image)
    }

    fn capture_region(&mut self, region: PixelRect) -> Result<RgbaImage> {
        if region.is_empty() {
            return Err(CaptureError::EmptyRegion.into());
        }

        let full = self.capture_screen()?;
        if !region.fits_within(full.width(), full.height()) {
            return Err(CaptureError::RegionOutOfBounds {
                requested: (region.x, region.y, region.width, region.height),
                screen_size: (full.width(), full.height()),
            }
            .into());
        }

        Ok(
            image::imageops::crop_imm(&full, region.x, region.y, region.width, region.height)
                .to_image(),
        )
    }
}
