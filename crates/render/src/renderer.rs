use std::fmt::Write;

use shipment_common::CellCoord;
use shipment_grid::WorldGrid;
use shipment_kernel::CharacterView;

/// What to draw: the character snapshot and how many cells around it.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub character: CharacterView,
    /// Cells drawn on each side of the character's cell.
    pub radius: i32,
}

impl RenderView {
    pub fn new(character: CharacterView) -> Self {
        Self {
            character,
            radius: 8,
        }
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius.max(0);
        self
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the grid and a character snapshot, then produces
/// output. It never mutates either; the session owns the truth.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, grid: &WorldGrid, view: &RenderView) -> Self::Output;
}

/// Top-down text renderer.
///
/// North (-Z, the default forward direction) is up. `#` is a solid column,
/// `.` open ground and `@` the character.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, grid: &WorldGrid, view: &RenderView) -> String {
        let p = view.character.position;
        let center = grid.cell_of(p.x, p.z);
        let anchor = center.unwrap_or(CellCoord::ORIGIN);
        let r = view.radius;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "pos=({:.2}, {:.2}, {:.2}) grounded={} cell={}",
            p.x,
            p.y,
            p.z,
            view.character.grounded,
            center.map_or_else(|| "none".to_owned(), |c| c.to_string()),
        );
        for z in anchor.z.saturating_sub(r)..=anchor.z.saturating_add(r) {
            let line: String = (anchor.x.saturating_sub(r)..=anchor.x.saturating_add(r))
                .map(|x| {
                    let c = CellCoord::new(x, z);
                    if Some(c) == center {
                        '@'
                    } else if grid.is_cell_solid(c) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            out.push_str(&line);
            out.push('\n');
        }
        tracing::trace!(radius = r, bytes = out.len(), "rendered text frame");
        out
    }
}
