// SPDX-License-Identifier: MPL-2.0
//! Interaction state shared by both tools.
//!
//! The crate deliberately contains no widgets; a shell renders the
//! sessions however it likes. What lives here is the state the shell
//! feeds pointer events through:
//!
//! - [`state::zoom`] - bounded zoom factor with multiplicative stepping
//! - [`state::viewport`] - the view-space / content-space mapping
//! - [`state::drag`] - the press/move/release/cancel state machine

pub mod state;
