// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! `DragController` sequences one continuous press/move/release(/cancel)
//! interaction and maps every pointer sample from view space to content
//! space before forwarding it to the active drag tool. The tool — brush
//! or rubber-band — is chosen once per surface instance and plugged in
//! through the [`DragTool`] trait rather than branched on in the event
//! handlers.

use crate::geometry::Point;
use crate::ui::state::viewport::ViewTransform;

/// One pointer sample, carried in both coordinate spaces.
///
/// Tools paint in content space; the rubber band additionally validates
/// its minimum size in view space, so both are forwarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPoint {
    /// The sample as delivered by the input surface.
    pub view: Point,
    /// The same sample mapped into content space.
    pub content: Point,
}

/// A pluggable drag action with the begin/update/finalize/cancel
/// capability.
///
/// `Context` is whatever the tool reads or mutates while the drag is
/// active (the content buffer for the brush, nothing for the rubber
/// band). `Output` is what a completed drag yields on release.
pub trait DragTool {
    type Context;
    type Output;

    /// Called once when the pointer is pressed.
    fn begin(&mut self, point: DragPoint, ctx: &mut Self::Context);

    /// Called for every pointer move while the drag is active.
    fn update(&mut self, point: DragPoint, ctx: &mut Self::Context);

    /// Called when the pointer is released; produces the drag's result.
    fn finalize(&mut self, point: DragPoint, ctx: &mut Self::Context) -> Self::Output;

    /// Called when the drag is cancelled; must drop all transient state.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragPhase {
    #[default]
    Idle,
    Active,
}

/// Press/move/release/cancel state machine around a single [`DragTool`].
///
/// Move and release events arriving while idle are ignored — spurious
/// moves can precede the first press. A press while a drag is already
/// active cancels the running session and starts a fresh one; two
/// sessions never coexist.
#[derive(Debug, Clone, Default)]
pub struct DragController<T: DragTool> {
    tool: T,
    phase: DragPhase,
}

impl<T: DragTool> DragController<T> {
    /// Creates a controller around the given tool.
    #[must_use]
    pub fn new(tool: T) -> Self {
        Self {
            tool,
            phase: DragPhase::Idle,
        }
    }

    /// Whether a drag session is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Shared access to the tool, e.g. to read a selection preview.
    #[must_use]
    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Mutable access to the tool, e.g. to adjust the brush width.
    pub fn tool_mut(&mut self) -> &mut T {
        &mut self.tool
    }

    /// Starts a drag session at the given view-space point.
    pub fn press(&mut self, view: Point, transform: &ViewTransform, ctx: &mut T::Context) {
        if self.phase == DragPhase::Active {
            self.tool.cancel();
        }
        self.tool.begin(Self::map(view, transform), ctx);
        self.phase = DragPhase::Active;
    }

    /// Forwards a pointer move to the tool.
    ///
    /// Returns `true` when the sample was delivered to an active session,
    /// `false` when it was ignored.
    pub fn drag_to(&mut self, view: Point, transform: &ViewTransform, ctx: &mut T::Context) -> bool {
        if self.phase != DragPhase::Active {
            return false;
        }
        self.tool.update(Self::map(view, transform), ctx);
        true
    }

    /// Ends the session and returns the tool's result, or `None` when no
    /// session was active.
    pub fn release(
        &mut self,
        view: Point,
        transform: &ViewTransform,
        ctx: &mut T::Context,
    ) -> Option<T::Output> {
        if self.phase != DragPhase::Active {
            return None;
        }
        self.phase = DragPhase::Idle;
        Some(self.tool.finalize(Self::map(view, transform), ctx))
    }

    /// Discards the session without finalizing.
    pub fn cancel(&mut self) {
        if self.phase == DragPhase::Active {
            self.tool.cancel();
            self.phase = DragPhase::Idle;
        }
    }

    fn map(view: Point, transform: &ViewTransform) -> DragPoint {
        DragPoint {
            view,
            content: transform.to_content(view),
        }
    }
}
