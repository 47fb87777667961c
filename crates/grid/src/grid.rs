use std::collections::HashSet;

use shipment_common::{CellCoord, SolidQuery};

use crate::cell::CellKind;
use crate::layout::{LayoutError, MapLayout};

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBounds {
    pub min: CellCoord,
    pub max: CellCoord,
}

impl GridBounds {
    /// Bounds spanning both corners, in any order.
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        Self {
            min: CellCoord::new(a.x.min(b.x), a.z.min(b.z)),
            max: CellCoord::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    /// Square of cells centered on the origin, `half_extent` cells each way.
    pub fn square(half_extent: i32) -> Self {
        let h = half_extent.saturating_abs();
        Self::new(CellCoord::new(-h, -h), CellCoord::new(h, h))
    }

    pub fn width(&self) -> usize {
        (self.max.x as i64 - self.min.x as i64 + 1) as usize
    }

    pub fn depth(&self) -> usize {
        (self.max.z as i64 - self.min.z as i64 + 1) as usize
    }

    pub fn contains(&self, c: CellCoord) -> bool {
        (self.min.x..=self.max.x).contains(&c.x) && (self.min.z..=self.max.z).contains(&c.z)
    }

    /// Whether `c` lies on the outer ring of the rectangle.
    pub fn is_edge(&self, c: CellCoord) -> bool {
        self.contains(c)
            && (c.x == self.min.x || c.x == self.max.x || c.z == self.min.z || c.z == self.max.z)
    }

    /// Cells in row-major order: Z outer, X inner.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| CellCoord::new(x, z)))
    }
}

/// Sparse set of solid columns.
///
/// Only occupied cells are stored, so maps can be arbitrarily large and
/// anything never registered reads as open space.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGrid {
    cell_size: f32,
    solid: HashSet<CellCoord>,
}

impl WorldGrid {
    /// Create an empty grid.
    pub fn new(cell_size: f32) -> Result<Self, GridError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            solid: HashSet::new(),
        })
    }

    /// Build from a layout whose cell `(0, 0)` lands on `origin`.
    ///
    /// Jagged rows are accepted: a short row contributes only the cells it has.
    pub fn from_layout(
        layout: &MapLayout,
        cell_size: f32,
        origin: CellCoord,
    ) -> Result<Self, GridError> {
        let _span = tracing::info_span!("grid_build", source = "layout").entered();
        let mut grid = Self::new(cell_size)?;
        for (column, row, kind) in layout.cells() {
            let coord = origin.offset(CellCoord::new(column as i32, row as i32));
            grid.insert_column(coord, kind);
        }
        tracing::debug!(
            rows = layout.depth(),
            width = layout.width(),
            solid = grid.solid_count(),
            "grid built from layout"
        );
        Ok(grid)
    }

    /// Like [`WorldGrid::from_layout`] but rejects empty or non-rectangular layouts.
    pub fn from_layout_strict(
        layout: &MapLayout,
        cell_size: f32,
        origin: CellCoord,
    ) -> Result<Self, GridError> {
        layout.ensure_rectangular()?;
        Self::from_layout(layout, cell_size, origin)
    }

    /// Build by evaluating `rule` on every cell in `bounds`.
    pub fn from_fn(
        cell_size: f32,
        bounds: GridBounds,
        mut rule: impl FnMut(CellCoord) -> CellKind,
    ) -> Result<Self, GridError> {
        let _span = tracing::info_span!("grid_build", source = "procedural").entered();
        let mut grid = Self::new(cell_size)?;
        for coord in bounds.iter() {
            grid.insert_column(coord, rule(coord));
        }
        tracing::debug!(
            width = bounds.width(),
            depth = bounds.depth(),
            solid = grid.solid_count(),
            "grid built from rule"
        );
        Ok(grid)
    }

    /// Register one layout cell. Obstacles mark the column solid once,
    /// regardless of layer count; empty cells are ignored.
    /// Returns true if the column was newly marked.
    pub fn insert_column(&mut self, coord: CellCoord, kind: CellKind) -> bool {
        if !kind.is_obstacle() {
            return false;
        }
        self.solid.insert(coord)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing a world position, if the position is representable.
    pub fn cell_of(&self, x: f32, z: f32) -> Option<CellCoord> {
        CellCoord::from_world(x, z, self.cell_size)
    }

    pub fn is_cell_solid(&self, coord: CellCoord) -> bool {
        self.solid.contains(&coord)
    }

    /// Whether the column under world position `(x, z)` is solid.
    pub fn is_solid(&self, x: f32, z: f32) -> bool {
        self.cell_of(x, z)
            .is_some_and(|coord| self.solid.contains(&coord))
    }

    /// Number of solid columns.
    pub fn solid_count(&self) -> usize {
        self.solid.len()
    }

    /// Solid cells in sorted order.
    pub fn solid_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = self.solid.iter().copied().collect();
        cells.sort();
        cells
    }

    /// Smallest rectangle covering every solid cell.
    pub fn bounds(&self) -> Option<GridBounds> {
        let mut iter = self.solid.iter();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        for c in iter {
            min = CellCoord::new(min.x.min(c.x), min.z.min(c.z));
            max = CellCoord::new(max.x.max(c.x), max.z.max(c.z));
        }
        Some(GridBounds { min, max })
    }
}

impl SolidQuery for WorldGrid {
    fn is_solid(&self, x: f32, z: f32) -> bool {
        WorldGrid::is_solid(self, x, z)
    }
}
