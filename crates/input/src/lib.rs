//! Input: held actions mapped to the per-frame record the controller consumes.
//!
//! # Invariants
//! - The controller consumes [`FrameInput`], never raw key events.
//! - Opposite directions cancel; a zero net intent yields no movement.

pub mod action;
pub mod intent;

pub use action::{Action, InputError, InputState};
pub use intent::{FrameInput, MoveIntent};

pub fn crate_info() -> &'static str {
    "shipment-input v0.1.0"
}
