// SPDX-License-Identifier: MPL-2.0
//! Rubber-band selection: accumulates a candidate rectangle during a
//! drag and validates it on release.

use crate::config::MIN_SELECTION_SIZE;
use crate::geometry::SelectionRect;
use crate::ui::state::drag::{DragPoint, DragTool};

/// Why a finalized selection produced no rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionRejection {
    /// The dragged rectangle is below the minimum size on at least one
    /// axis, measured in view-space device pixels.
    TooSmall { width: f32, height: f32 },
}

/// Select drag action.
///
/// The candidate rectangle is recomputed from the start corner and the
/// current corner on every move, so it is always normalized and never
/// drawn with swapped corners. The minimum-size check on release happens
/// in view space, which keeps the threshold independent of the content
/// scale.
#[derive(Debug, Clone, Default)]
pub struct RubberBand {
    start: Option<DragPoint>,
    candidate: Option<SelectionRect>,
}

impl RubberBand {
    /// Creates a new rubber-band tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current candidate rectangle in content space, for overlay
    /// drawing while the drag is in progress.
    #[must_use]
    pub fn candidate(&self) -> Option<&SelectionRect> {
        self.candidate.as_ref()
    }

    fn view_extent(&self, current: DragPoint) -> (f32, f32) {
        match self.start {
            Some(start) => {
                let rect = SelectionRect::from_corners(start.view, current.view);
                (rect.width(), rect.height())
            }
            None => (0.0, 0.0),
        }
    }
}

impl DragTool for RubberBand {
    type Context = ();
    type Output = Result<SelectionRect, SelectionRejection>;

    fn begin(&mut self, point: DragPoint, _ctx: &mut ()) {
        self.start = Some(point);
        // The candidate collapses to a point until the first move.
        self.candidate = Some(SelectionRect::from_corners(point.content, point.content));
    }

    fn update(&mut self, point: DragPoint, _ctx: &mut ()) {
        if let Some(start) = self.start {
            self.candidate = Some(SelectionRect::from_corners(start.content, point.content));
        }
    }

    fn finalize(&mut self, point: DragPoint, _ctx: &mut ()) -> Self::Output {
        let (view_width, view_height) = self.view_extent(point);
        let result = match self.start {
            Some(start) if view_width >= MIN_SELECTION_SIZE && view_height >= MIN_SELECTION_SIZE => {
                Ok(SelectionRect::from_corners(start.content, point.content))
            }
            _ => Err(SelectionRejection::TooSmall {
                width: view_width,
                height: view_height,
            }),
        };
        self.start = None;
        self.candidate = None;
        result
    }

    fn cancel(&mut self) {
        self.start = None;
        self.candidate = None;
    }
}
