use crate::state::Position;

/// Read-only grid view consumed by the engine.
///
/// Creatures never mutate terrain; the only questions asked of the grid are
/// bounds, tile size, and walkability.
pub trait GridOracle {
    fn dimensions(&self) -> MapDimensions;

    /// Edge length of one tile in world units.
    fn tile_size(&self) -> f32;

    /// Terrain walkability. Out-of-bounds tiles are never walkable.
    fn is_walkable(&self, position: Position) -> bool;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Clamps a tile into the grid.
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0, self.width.saturating_sub(1) as i32),
            position.y.clamp(0, self.height.saturating_sub(1) as i32),
        )
    }
}
