//! Shared types for the grid world and the character controller.
//!
//! # Invariants
//! - The controller sees the world only through [`SolidQuery`].
//! - Cell coordinates are plain lookup keys, never stored objects.

pub mod types;

pub use types::{Axis, CellCoord, FnSolid, SolidQuery};
