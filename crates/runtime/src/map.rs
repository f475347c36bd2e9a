//! Static terrain served through [`creature_core::GridOracle`].

use std::collections::HashSet;

use creature_core::{GridOracle, MapDimensions, Position};

use crate::error::{Result, RuntimeError};

/// Default tile edge in world units.
pub const DEFAULT_TILE_SIZE: f32 = 32.0;

/// Rectangular floor with wall tiles.
///
/// Holds immutable terrain only. Who stands where is tracked by the
/// encounter, never by the map.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    dimensions: MapDimensions,
    tile_size: f32,
    walls: HashSet<Position>,
}

impl GridMap {
    /// All floor.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            tile_size: DEFAULT_TILE_SIZE,
            walls: HashSet::new(),
        }
    }

    /// Parses a map drawn with `#` for walls and any other character for
    /// floor. Every row must have the same width.
    ///
    /// ```text
    /// ##########
    /// #........#
    /// #..##....#
    /// ##########
    /// ```
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|row| !row.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(RuntimeError::InvalidMap("map has no rows".into()));
        };

        let width = first.chars().count();
        let mut walls = HashSet::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(RuntimeError::InvalidMap(format!(
                    "row {} has width {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                if glyph == '#' {
                    walls.insert(Position::new(x as i32, y as i32));
                }
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tile_size: DEFAULT_TILE_SIZE,
            walls,
        })
    }

    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }
}

impl GridOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.dimensions.contains(position) && !self.walls.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_walls_and_size() {
        let map = GridMap::from_ascii("####\n#..#\n####\n").expect("valid map");
        assert_eq!(map.dimensions(), MapDimensions::new(4, 3));
        assert!(map.is_walkable(Position::new(1, 1)));
        assert!(!map.is_walkable(Position::new(0, 1)));
        assert!(!map.is_walkable(Position::new(4, 1)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let error = GridMap::from_ascii("###\n#.\n###").unwrap_err();
        assert!(matches!(error, RuntimeError::InvalidMap(_)));
    }

    #[test]
    fn empty_map_is_rejected() {
        assert!(GridMap::from_ascii("\n\n").is_err());
    }
}
