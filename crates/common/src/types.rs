use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D cell coordinate on the ground plane (the Y axis is not tracked).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert a world position to the cell containing it.
    ///
    /// Each axis is divided by `cell_size` and rounded to the nearest integer,
    /// halves rounding away from zero. Returns `None` when either input is not
    /// finite or the result does not fit in an `i32`.
    pub fn from_world(x: f32, z: f32, cell_size: f32) -> Option<Self> {
        Some(Self {
            x: round_to_cell(x, cell_size)?,
            z: round_to_cell(z, cell_size)?,
        })
    }

    /// World-space center of this cell.
    pub fn center(self, cell_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * cell_size, self.z as f32 * cell_size)
    }

    /// Offset this coordinate by another one.
    pub fn offset(self, by: CellCoord) -> Self {
        Self {
            x: self.x.saturating_add(by.x),
            z: self.z.saturating_add(by.z),
        }
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

fn round_to_cell(v: f32, cell_size: f32) -> Option<i32> {
    let scaled = (v / cell_size).round();
    if !scaled.is_finite() || scaled < i32::MIN as f32 || scaled >= i32::MAX as f32 {
        return None;
    }
    Some(scaled as i32)
}

/// A horizontal axis on which movement is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Z => f.write_str("z"),
        }
    }
}

/// Solidity lookup consumed by the character controller.
///
/// Implementations must be pure and must treat unknown space as open.
pub trait SolidQuery {
    /// Whether the column containing world position `(x, z)` blocks movement.
    fn is_solid(&self, x: f32, z: f32) -> bool;
}

impl<T: SolidQuery + ?Sized> SolidQuery for &T {
    fn is_solid(&self, x: f32, z: f32) -> bool {
        (**self).is_solid(x, z)
    }
}

/// Adapts a closure into a [`SolidQuery`].
pub struct FnSolid<F>(pub F);

impl<F: Fn(f32, f32) -> bool> SolidQuery for FnSolid<F> {
    fn is_solid(&self, x: f32, z: f32) -> bool {
        (self.0)(x, z)
    }
}
