use serde::Serialize;
use shipment_grid::WorldGrid;
use shipment_kernel::{Session, SessionEvent};

/// Session inspector for developer tooling.
///
/// Provides read-only queries against a session for debugging and CLI output.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary(session: &Session) -> SessionSummary {
        let c = session.character();
        let blocked_moves = session
            .events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Blocked { .. }))
            .count();
        SessionSummary {
            tick: session.tick(),
            position: c.position.to_array(),
            vertical_velocity: c.vertical_velocity,
            grounded: c.grounded,
            solid_cells: session.grid().solid_count(),
            pending_events: session.events().len(),
            blocked_moves,
            state_hash: session.state_hash(),
        }
    }

    /// Summarize a grid on its own.
    pub fn grid(grid: &WorldGrid) -> GridSummary {
        let bounds = grid.bounds();
        GridSummary {
            cell_size: grid.cell_size(),
            solid_cells: grid.solid_count(),
            min: bounds.map(|b| [b.min.x, b.min.z]),
            max: bounds.map(|b| [b.max.x, b.max.z]),
        }
    }

    /// Serialize a summary as pretty JSON.
    pub fn to_json<T: Serialize>(summary: &T) -> serde_json::Result<String> {
        serde_json::to_string_pretty(summary)
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub tick: u64,
    pub position: [f32; 3],
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub solid_cells: usize,
    pub pending_events: usize,
    pub blocked_moves: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: tick={} pos=({:.2}, {:.2}, {:.2}) vy={:.2} grounded={} solid={} events={} blocked={} hash={:#x}",
            self.tick,
            self.position[0],
            self.position[1],
            self.position[2],
            self.vertical_velocity,
            self.grounded,
            self.solid_cells,
            self.pending_events,
            self.blocked_moves,
            self.state_hash,
        )
    }
}

/// Extent and density of a built grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub cell_size: f32,
    pub solid_cells: usize,
    pub min: Option<[i32; 2]>,
    pub max: Option<[i32; 2]>,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid: cell_size={} solid={}", self.cell_size, self.solid_cells)?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            write!(f, " bounds=({}, {})..=({}, {})", min[0], min[1], max[0], max[1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use shipment_grid::MapFile;
    use shipment_input::{FrameInput, MoveIntent};
    use shipment_kernel::ControllerConfig;

    fn session() -> Session {
        let grid = MapFile::shipment().build(true).unwrap();
        Session::new(grid, ControllerConfig::default(), Vec2::ZERO).unwrap()
    }

    #[test]
    fn summary_fresh_session() {
        let s = session();
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.position, [0.0, 10.0, 0.0]);
        assert!(summary.grounded);
        assert_eq!(summary.solid_cells, 66);
        assert_eq!(summary.pending_events, 0);
    }

    #[test]
    fn summary_counts_blocked_moves() {
        let mut s = session();
        // Stacked crate two cells east of spawn.
        for _ in 0..30 {
            s.advance(&FrameInput::new(1.0 / 60.0, MoveIntent::right()));
        }
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.tick, 30);
        assert!(summary.blocked_moves > 0);
        assert!(summary.position[0] < 7.5);
    }

    #[test]
    fn summary_display() {
        let summary = SessionInspector::summary(&session());
        let s = format!("{summary}");
        assert!(s.contains("tick=0"));
        assert!(s.contains("grounded=true"));
    }

    #[test]
    fn summary_as_json() {
        let summary = SessionInspector::summary(&session());
        let json = SessionInspector::to_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tick"], 0);
        assert_eq!(value["grounded"], true);
    }

    #[test]
    fn grid_summary_bounds() {
        let grid = MapFile::shipment().build(true).unwrap();
        let summary = SessionInspector::grid(&grid);
        assert_eq!(summary.min, Some([-6, -6]));
        assert_eq!(summary.max, Some([6, 6]));
        assert!(summary.to_string().contains("solid=66"));

        let empty = SessionInspector::grid(&WorldGrid::new(1.0).unwrap());
        assert_eq!(empty.min, None);
    }
}
