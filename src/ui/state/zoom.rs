// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module handles zoom-related state and logic:
//! - The bounded zoom factor
//! - Multiplicative zoom in/out stepping
//! - The derived percentage label

pub use crate::config::{
    DEFAULT_ZOOM_FACTOR, MAX_ZOOM_FACTOR, MIN_ZOOM_FACTOR, ZOOM_STEP_FACTOR,
};

/// Zoom factor, guaranteed to be within valid range (0.1–5.0).
///
/// This type ensures that zoom values are always valid and strictly
/// positive, eliminating the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(factor.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR))
    }

    /// Returns the raw factor value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the zoom as a rounded percentage (e.g. 1.25 → 125).
    #[must_use]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM_FACTOR
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM_FACTOR
    }

    /// Steps the zoom in by one multiplicative step.
    #[must_use]
    pub fn zoomed_in(self) -> Self {
        Self::new(self.0 * ZOOM_STEP_FACTOR)
    }

    /// Steps the zoom out by one multiplicative step.
    #[must_use]
    pub fn zoomed_out(self) -> Self {
        Self::new(self.0 / ZOOM_STEP_FACTOR)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_FACTOR)
    }
}

/// Manages the zoom state for a display surface.
///
/// The "no-op when no content is loaded" rule lives in the session that
/// owns this state; the state itself is always steppable.
#[derive(Debug, Clone, Default)]
pub struct ZoomState {
    factor: ZoomFactor,
}

impl ZoomState {
    /// Current zoom factor.
    #[must_use]
    pub fn factor(&self) -> ZoomFactor {
        self.factor
    }

    /// Steps zoom in, saturating at the maximum.
    pub fn zoom_in(&mut self) {
        self.factor = self.factor.zoomed_in();
    }

    /// Steps zoom out, saturating at the minimum.
    pub fn zoom_out(&mut self) {
        self.factor = self.factor.zoomed_out();
    }

    /// Resets zoom to 100%.
    pub fn reset(&mut self) {
        self.factor = ZoomFactor::new(DEFAULT_ZOOM_FACTOR);
    }

    /// Display label for the current zoom, e.g. `"125%"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", self.factor.percent())
    }
}
