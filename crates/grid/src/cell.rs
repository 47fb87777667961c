use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

/// What occupies one layout cell.
///
/// Layer counts only matter to a renderer; for collision every obstacle is a
/// full-height column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    #[default]
    Empty,
    /// A single crate.
    Crate,
    /// Two crates stacked on top of each other.
    StackedCrate,
    /// Perimeter wall, three layers tall.
    Wall,
}

impl CellKind {
    pub const ALL: [CellKind; 4] = [
        CellKind::Empty,
        CellKind::Crate,
        CellKind::StackedCrate,
        CellKind::Wall,
    ];

    /// Numeric layout code.
    pub fn code(self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Crate => 1,
            CellKind::StackedCrate => 2,
            CellKind::Wall => 3,
        }
    }

    /// Number of voxel layers stacked in this column.
    pub fn layers(self) -> u32 {
        match self {
            CellKind::Empty => 0,
            CellKind::Crate => 1,
            CellKind::StackedCrate => 2,
            CellKind::Wall => 3,
        }
    }

    pub fn is_obstacle(self) -> bool {
        self != CellKind::Empty
    }

    /// Glyph used when printing layouts.
    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Crate => '1',
            CellKind::StackedCrate => '2',
            CellKind::Wall => '#',
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = LayoutError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CellKind::Empty),
            1 => Ok(CellKind::Crate),
            2 => Ok(CellKind::StackedCrate),
            3 => Ok(CellKind::Wall),
            other => Err(LayoutError::UnknownCode(other)),
        }
    }
}

impl TryFrom<char> for CellKind {
    type Error = LayoutError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' | '.' | ' ' => Ok(CellKind::Empty),
            '1' => Ok(CellKind::Crate),
            '2' => Ok(CellKind::StackedCrate),
            '3' | '#' => Ok(CellKind::Wall),
            other => Err(LayoutError::UnknownChar(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in CellKind::ALL {
            assert_eq!(CellKind::try_from(kind.code()).unwrap(), kind);
        }
    }

    #[test]
    fn only_empty_is_open() {
        assert!(!CellKind::Empty.is_obstacle());
        assert!(CellKind::Crate.is_obstacle());
        assert!(CellKind::StackedCrate.is_obstacle());
        assert!(CellKind::Wall.is_obstacle());
    }

    #[test]
    fn layers_grow_with_stack() {
        assert_eq!(CellKind::Empty.layers(), 0);
        assert!(CellKind::Crate.layers() < CellKind::StackedCrate.layers());
        assert!(CellKind::StackedCrate.layers() < CellKind::Wall.layers());
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            CellKind::try_from(9u8),
            Err(LayoutError::UnknownCode(9))
        ));
        assert!(matches!(
            CellKind::try_from('x'),
            Err(LayoutError::UnknownChar('x'))
        ));
    }

    #[test]
    fn glyph_parses_back() {
        for kind in CellKind::ALL {
            assert_eq!(CellKind::try_from(kind.glyph()).unwrap(), kind);
        }
    }
}
