use serde::{Deserialize, Serialize};

use crate::cell::CellKind;

/// Errors raised while reading a layout description.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown cell code {0}")]
    UnknownCode(u8),
    #[error("unknown cell glyph {0:?}")]
    UnknownChar(char),
    #[error("row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("layout has no rows")]
    Empty,
}

/// The built-in Shipment map: perimeter wall with a symmetric crate lattice.
/// The center cell (6, 6) is open and used as the spawn point.
const SHIPMENT_ROWS: [&str; 13] = [
    "#############",
    "#...........#",
    "#.12.....21.#",
    "#.2.......2.#",
    "#....1.1....#",
    "#...........#",
    "#...2...2...#",
    "#...........#",
    "#....1.1....#",
    "#.2.......2.#",
    "#.12.....21.#",
    "#...........#",
    "#############",
];

/// A 2D table of cell kinds: rows run along +Z, columns along +X.
///
/// Rows may be jagged; a short row simply has fewer cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapLayout {
    rows: Vec<Vec<CellKind>>,
}

impl MapLayout {
    pub fn new(rows: Vec<Vec<CellKind>>) -> Self {
        Self { rows }
    }

    /// Parse a text layout, one row per line.
    ///
    /// Digits `0..=3` are cell codes; `.` and space are empty, `#` is wall.
    /// Leading and trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let start = lines.iter().take_while(|l| l.is_empty()).count();

        let rows = lines[start..]
            .iter()
            .map(|line| line.chars().map(CellKind::try_from).collect())
            .collect::<Result<Vec<Vec<CellKind>>, _>>()?;
        Ok(Self { rows })
    }

    /// Parse rows given as lines of text.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, LayoutError> {
        let rows = lines
            .iter()
            .map(|line| line.as_ref().chars().map(CellKind::try_from).collect())
            .collect::<Result<Vec<Vec<CellKind>>, _>>()?;
        Ok(Self { rows })
    }

    /// Build from numeric cell codes.
    pub fn from_codes(rows: &[&[u8]]) -> Result<Self, LayoutError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&c| CellKind::try_from(c)).collect())
            .collect::<Result<Vec<Vec<CellKind>>, _>>()?;
        Ok(Self { rows })
    }

    /// The built-in Shipment-style map.
    pub fn shipment() -> Self {
        let rows = SHIPMENT_ROWS
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| CellKind::try_from(c).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.rows
    }

    /// Kind at `(column, row)`; cells past the end of a short row are empty.
    pub fn get(&self, column: usize, row: usize) -> CellKind {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or_default()
    }

    /// Number of rows (extent along Z).
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (extent along X).
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_rectangular(&self) -> bool {
        self.ensure_rectangular().is_ok()
    }

    /// Reject empty layouts and rows whose length differs from the first row.
    pub fn ensure_rectangular(&self) -> Result<(), LayoutError> {
        let expected = self.rows.first().ok_or(LayoutError::Empty)?.len();
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(LayoutError::Jagged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    /// Number of obstacle columns in the layout.
    pub fn obstacle_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|k| k.is_obstacle())
            .count()
    }

    /// Iterate `(column, row, kind)` for every cell present in the table.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, kind)| (column, row, *kind))
        })
    }
}

impl std::fmt::Display for MapLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|k| k.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_rows() {
        let layout = MapLayout::parse("#..\n.1.\n..2\n").unwrap();
        assert_eq!(layout.depth(), 3);
        assert_eq!(layout.width(), 3);
        assert_eq!(layout.get(0, 0), CellKind::Wall);
        assert_eq!(layout.get(1, 1), CellKind::Crate);
        assert_eq!(layout.get(2, 2), CellKind::StackedCrate);
        assert_eq!(layout.obstacle_count(), 3);
    }

    #[test]
    fn parse_ignores_surrounding_blank_lines_and_crlf() {
        let layout = MapLayout::parse("\n\r\n01\r\n10\r\n\n").unwrap();
        assert_eq!(layout.depth(), 2);
        assert!(layout.is_rectangular());
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        assert!(matches!(
            MapLayout::parse("0a0"),
            Err(LayoutError::UnknownChar('a'))
        ));
    }

    #[test]
    fn from_codes_matches_parse() {
        let a = MapLayout::from_codes(&[&[3, 0], &[1, 2]]).unwrap();
        let b = MapLayout::parse("#.\n12").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn jagged_rows_are_detected() {
        let layout = MapLayout::parse("111\n1\n111").unwrap();
        assert_eq!(layout.width(), 3);
        assert!(!layout.is_rectangular());
        match layout.ensure_rectangular() {
            Err(LayoutError::Jagged {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("expected jagged error, got {other:?}"),
        }
        // Past the end of a short row is open space.
        assert_eq!(layout.get(2, 1), CellKind::Empty);
    }

    #[test]
    fn empty_layout_is_not_rectangular() {
        assert!(matches!(
            MapLayout::default().ensure_rectangular(),
            Err(LayoutError::Empty)
        ));
    }

    #[test]
    fn shipment_map_shape() {
        let layout = MapLayout::shipment();
        assert!(layout.is_rectangular());
        assert_eq!(layout.width(), 13);
        assert_eq!(layout.depth(), 13);
        assert_eq!(layout.get(6, 6), CellKind::Empty);
        // 48 wall cells plus 18 crates.
        assert_eq!(layout.obstacle_count(), 66);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let layout = MapLayout::shipment();
        let reparsed = MapLayout::parse(&layout.to_string()).unwrap();
        assert_eq!(layout, reparsed);
    }
}
