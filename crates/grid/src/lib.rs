//! World Grid: builds a voxel map from a layout or procedural rule and answers
//! column solidity queries.
//!
//! # Invariants
//! - A cell enters the solid set once per obstacle column, whatever its height.
//! - The grid is immutable once built; queries never fail.
//! - Unpopulated cells are open space.

mod cell;
mod grid;
mod layout;
mod map_file;
pub mod procedural;

pub use cell::CellKind;
pub use grid::{GridBounds, GridError, WorldGrid};
pub use layout::{LayoutError, MapLayout};
pub use map_file::{MapFile, MapFileError};

pub fn crate_info() -> &'static str {
    "shipment-grid v0.1.0"
}
