// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! This module contains the interaction state shared by both tools,
//! separated from the session structs that own it.

pub mod drag;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::{DragController, DragPoint, DragTool};
pub use viewport::ViewTransform;
pub use zoom::{ZoomFactor, ZoomState};
