use std::path::Path;

use serde::{Deserialize, Serialize};
use shipment_common::CellCoord;

use crate::grid::{GridError, WorldGrid};
use crate::layout::{LayoutError, MapLayout};

#[derive(Debug, thiserror::Error)]
pub enum MapFileError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML map: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON map: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported map file extension {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedExtension(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn default_cell_size() -> f32 {
    5.0
}

/// On-disk map description.
///
/// ```yaml
/// name: yard
/// cell_size: 5.0
/// origin: [-2, -2]
/// rows:
///   - "#####"
///   - "#.1.#"
///   - "#####"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub name: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// Grid cell that layout cell `(0, 0)` is placed on.
    #[serde(default)]
    pub origin: [i32; 2],
    pub rows: Vec<String>,
}

impl MapFile {
    /// The built-in Shipment map, centered so its spawn cell sits at the origin.
    pub fn shipment() -> Self {
        let layout = MapLayout::shipment();
        let half_w = (layout.width() / 2) as i32;
        let half_d = (layout.depth() / 2) as i32;
        Self {
            name: "shipment".into(),
            cell_size: default_cell_size(),
            origin: [-half_w, -half_d],
            rows: layout.to_string().lines().map(str::to_owned).collect(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, MapFileError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, MapFileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a map, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapFileError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let map = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(MapFileError::UnsupportedExtension(ext)),
        };
        tracing::info!(path = %path.display(), name = %map.name, "loaded map file");
        Ok(map)
    }

    pub fn origin(&self) -> CellCoord {
        CellCoord::new(self.origin[0], self.origin[1])
    }

    pub fn layout(&self) -> Result<MapLayout, MapFileError> {
        Ok(MapLayout::from_lines(&self.rows)?)
    }

    /// Build the grid; `strict` rejects jagged layouts.
    pub fn build(&self, strict: bool) -> Result<WorldGrid, MapFileError> {
        let layout = self.layout()?;
        let grid = if strict {
            WorldGrid::from_layout_strict(&layout, self.cell_size, self.origin())?
        } else {
            WorldGrid::from_layout(&layout, self.cell_size, self.origin())?
        };
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YARD_YAML: &str = "name: yard\ncell_size: 2.0\norigin: [-1, -1]\nrows:\n  - \"###\"\n  - \"#.#\"\n  - \"###\"\n";

    #[test]
    fn shipment_spawn_cell_is_open() {
        let map = MapFile::shipment();
        assert_eq!(map.origin, [-6, -6]);
        let grid = map.build(true).unwrap();
        assert!(!grid.is_solid(0.0, 0.0));
        assert!(grid.is_cell_solid(CellCoord::new(-6, -6)));
        assert!(grid.is_cell_solid(CellCoord::new(6, 6)));
        assert_eq!(grid.solid_count(), 66);
    }

    #[test]
    fn yaml_map_parses() {
        let map = MapFile::from_yaml_str(YARD_YAML).unwrap();
        assert_eq!(map.name, "yard");
        assert_eq!(map.cell_size, 2.0);
        let grid = map.build(true).unwrap();
        assert_eq!(grid.solid_count(), 8);
        assert!(!grid.is_solid(0.0, 0.0));
        assert!(grid.is_solid(2.0, 0.0));
    }

    #[test]
    fn json_map_defaults_cell_size_and_origin() {
        let map = MapFile::from_json_str(r#"{"name":"tiny","rows":["1"]}"#).unwrap();
        assert_eq!(map.cell_size, 5.0);
        assert_eq!(map.origin(), CellCoord::ORIGIN);
        assert!(map.build(false).unwrap().is_solid(0.0, 0.0));
    }

    #[test]
    fn strict_build_rejects_jagged_rows() {
        let map = MapFile {
            name: "jagged".into(),
            cell_size: 1.0,
            origin: [0, 0],
            rows: vec!["11".into(), "1".into()],
        };
        assert_eq!(map.build(false).unwrap().solid_count(), 3);
        assert!(matches!(
            map.build(true),
            Err(MapFileError::Grid(GridError::Layout(LayoutError::Jagged { .. })))
        ));
    }

    #[test]
    fn bad_cell_size_surfaces_as_grid_error() {
        let map = MapFile::from_json_str(r#"{"name":"x","cell_size":0.0,"rows":["1"]}"#).unwrap();
        assert!(matches!(
            map.build(false),
            Err(MapFileError::Grid(GridError::InvalidCellSize(_)))
        ));
    }

    #[test]
    fn load_from_disk_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("yard.yaml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(YARD_YAML.as_bytes())
            .unwrap();
        assert_eq!(MapFile::load(&yaml_path).unwrap().name, "yard");

        let json_path = dir.path().join("shipment.json");
        let json = serde_json::to_string(&MapFile::shipment()).unwrap();
        std::fs::write(&json_path, json).unwrap();
        assert_eq!(MapFile::load(&json_path).unwrap(), MapFile::shipment());

        let txt_path = dir.path().join("map.txt");
        std::fs::write(&txt_path, "1").unwrap();
        assert!(matches!(
            MapFile::load(&txt_path),
            Err(MapFileError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MapFile::load(dir.path().join("nope.yaml")),
            Err(MapFileError::Io(_))
        ));
    }
}
