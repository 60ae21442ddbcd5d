// SPDX-License-Identifier: MPL-2.0
//! Freehand brush: rasterizes a continuous stroke onto the content
//! buffer as the pointer moves.

use crate::config::{DEFAULT_BRUSH_WIDTH, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use crate::geometry::Point;
use crate::ui::state::drag::{DragPoint, DragTool};
use image::{Rgba, RgbaImage};

/// Brush width in content pixels, guaranteed to be within 1–50.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushWidth(u32);

impl BrushWidth {
    /// Creates a new brush width, clamping the value to the valid range.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self(width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH))
    }

    /// Returns the raw width value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for BrushWidth {
    fn default() -> Self {
        Self(DEFAULT_BRUSH_WIDTH)
    }
}

/// Paint drag action.
///
/// Each pointer move draws a solid segment from the previous content
/// point to the current one, then a filled disc at the current point.
/// The disc closes the gaps that sparse move events would otherwise
/// leave in a fast stroke. The buffer reflects every intermediate
/// segment immediately; release has nothing left to do, and cancel does
/// not roll painted pixels back.
#[derive(Debug, Clone)]
pub struct BrushTool {
    width: BrushWidth,
    color: Rgba<u8>,
    last: Option<Point>,
}

impl BrushTool {
    /// Creates a brush with the given width and RGBA stroke color.
    #[must_use]
    pub fn new(width: BrushWidth, color: [u8; 4]) -> Self {
        Self {
            width,
            color: Rgba(color),
            last: None,
        }
    }

    /// Current brush width.
    #[must_use]
    pub fn width(&self) -> BrushWidth {
        self.width
    }

    /// Changes the brush width for subsequent strokes.
    pub fn set_width(&mut self, width: BrushWidth) {
        self.width = width;
    }
}

impl Default for BrushTool {
    fn default() -> Self {
        Self::new(BrushWidth::default(), crate::config::DEFAULT_STROKE_COLOR)
    }
}

impl DragTool for BrushTool {
    type Context = RgbaImage;
    type Output = ();

    fn begin(&mut self, point: DragPoint, _ctx: &mut RgbaImage) {
        self.last = Some(point.content);
    }

    fn update(&mut self, point: DragPoint, ctx: &mut RgbaImage) {
        let width = self.width.value();
        if let Some(last) = self.last {
            stamp_segment(ctx, last, point.content, width, self.color);
        }
        stamp_disc(ctx, point.content, width, self.color);
        self.last = Some(point.content);
    }

    fn finalize(&mut self, _point: DragPoint, _ctx: &mut RgbaImage) {
        self.last = None;
    }

    fn cancel(&mut self) {
        self.last = None;
    }
}

/// Fills a disc of the given diameter centered at `center`.
fn stamp_disc(img: &mut RgbaImage, center: Point, diameter: u32, color: Rgba<u8>) {
    let (width, height) = (img.width() as i32, img.height() as i32);
    let radius = diameter as f32 / 2.0;
    let radius_sq = radius * radius;

    // The containing pixel is always painted, so a width-1 brush leaves
    // a mark even when the sample lands near a pixel corner.
    let cx = center.x.floor() as i32;
    let cy = center.y.floor() as i32;
    if cx >= 0 && cx < width && cy >= 0 && cy < height {
        img.put_pixel(cx as u32, cy as u32, color);
    }

    let min_x = (center.x - radius).floor() as i32;
    let max_x = (center.x + radius).ceil() as i32;
    let min_y = (center.y - radius).floor() as i32;
    let max_y = (center.y + radius).ceil() as i32;

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dx = px as f32 + 0.5 - center.x;
            let dy = py as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq && px >= 0 && px < width && py >= 0 && py < height {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Draws a solid segment of the given width by stamping discs along it.
fn stamp_segment(img: &mut RgbaImage, from: Point, to: Point, width: u32, color: Rgba<u8>) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    // Two samples per pixel of travel keeps the segment gap-free.
    let steps = (length * 2.0).ceil().max(1.0) as u32;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let sample = Point::new(from.x + dx * t, from.y + dy * t);
        stamp_disc(img, sample, width, color);
    }
}
