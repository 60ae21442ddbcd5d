// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! `ViewTransform` maps between view space (pixels as rendered, including
//! the scroll offset) and content space (pixel coordinates of the
//! underlying raster). Both directions are pure functions of the current
//! scale and offset and are exact inverses of each other up to
//! floating-point rounding.

use crate::geometry::{Point, SelectionRect};
use crate::ui::state::zoom::ZoomFactor;

/// The mapping between view space and content space.
///
/// `offset` is the view-space position of the content origin. A surface
/// that scrolls passes the negated scroll offset here; changing the
/// offset never requires re-deriving the scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewTransform {
    /// Content scale. Strictly positive by construction.
    pub scale: ZoomFactor,
    /// View-space position of the content origin.
    pub offset: Point,
}

impl ViewTransform {
    /// Creates a transform from a scale and an offset.
    #[must_use]
    pub fn new(scale: ZoomFactor, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// The identity transform: scale 1.0, no offset. View and content
    /// space coincide, as on the capture overlay.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            scale: ZoomFactor::new(1.0),
            offset: Point::ORIGIN,
        }
    }

    /// Maps a view-space point to content space.
    #[must_use]
    pub fn to_content(&self, view: Point) -> Point {
        Point::new(
            (view.x - self.offset.x) / self.scale.value(),
            (view.y - self.offset.y) / self.scale.value(),
        )
    }

    /// Maps a content-space point to view space.
    #[must_use]
    pub fn to_view(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale.value() + self.offset.x,
            content.y * self.scale.value() + self.offset.y,
        )
    }

    /// The content region covered by a viewport of the given size.
    ///
    /// Re-rendering after a scale change derives the visible region from
    /// this instead of assuming a fixed canvas size.
    #[must_use]
    pub fn visible_content_rect(&self, viewport_width: f32, viewport_height: f32) -> SelectionRect {
        SelectionRect::from_corners(
            self.to_content(Point::ORIGIN),
            self.to_content(Point::new(viewport_width, viewport_height)),
        )
    }
}
