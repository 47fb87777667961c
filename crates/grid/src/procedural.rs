//! Procedural placement rules for [`WorldGrid::from_fn`].
//!
//! Rules are plain `Fn(CellCoord) -> CellKind` values so they compose; the
//! random rule hashes each cell with a seed, which keeps the result independent
//! of iteration order.

use shipment_common::CellCoord;

use crate::cell::CellKind;
use crate::grid::{GridBounds, GridError, WorldGrid};

/// Wall on the outer ring of `bounds`, empty elsewhere.
pub fn perimeter(bounds: GridBounds) -> impl Fn(CellCoord) -> CellKind {
    move |c| {
        if bounds.is_edge(c) {
            CellKind::Wall
        } else {
            CellKind::Empty
        }
    }
}

/// Crates on every `spacing`-th interior cell, alternating single and stacked.
pub fn lattice(bounds: GridBounds, spacing: u32) -> impl Fn(CellCoord) -> CellKind {
    let spacing = spacing.max(1) as i64;
    move |c| {
        if !bounds.contains(c) || bounds.is_edge(c) {
            return CellKind::Empty;
        }
        let dx = c.x as i64 - bounds.min.x as i64;
        let dz = c.z as i64 - bounds.min.z as i64;
        if dx % spacing != 0 || dz % spacing != 0 {
            return CellKind::Empty;
        }
        if (dx / spacing + dz / spacing) % 2 == 0 {
            CellKind::Crate
        } else {
            CellKind::StackedCrate
        }
    }
}

/// Seeded random crates: each cell is an obstacle with probability `density`.
pub fn scatter(seed: u64, density: f32) -> impl Fn(CellCoord) -> CellKind {
    let density = if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        0.0
    };
    move |c| {
        let h = cell_hash(seed, c);
        // Top 24 bits give a uniform value in [0, 1).
        let roll = (h >> 40) as f32 / (1u64 << 24) as f32;
        if roll >= density {
            CellKind::Empty
        } else if h & 1 == 0 {
            CellKind::Crate
        } else {
            CellKind::StackedCrate
        }
    }
}

/// Walled yard with scattered crates, keeping a 3x3 spawn pad clear at the origin.
pub fn yard(
    cell_size: f32,
    half_extent: i32,
    seed: u64,
    density: f32,
) -> Result<WorldGrid, GridError> {
    let bounds = GridBounds::square(half_extent);
    let wall = perimeter(bounds);
    let crates = scatter(seed, density);
    let spawn = GridBounds::square(1);
    WorldGrid::from_fn(cell_size, bounds, |c| match wall(c) {
        CellKind::Empty if spawn.contains(c) => CellKind::Empty,
        CellKind::Empty => crates(c),
        kind => kind,
    })
}

fn cell_hash(seed: u64, c: CellCoord) -> u64 {
    let packed = ((c.x as u32 as u64) << 32) | c.z as u32 as u64;
    splitmix64(seed ^ splitmix64(packed))
}

/// Splitmix64 step: a fast, well-mixed deterministic hash.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
