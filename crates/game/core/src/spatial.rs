//! Spatial queries over the grid and an occupancy snapshot.
//!
//! The orchestrator builds one [`Occupancy`] per acting creature: every other
//! living creature's tile plus the player's tile. Only the acting creature
//! moves during its own update or turn, so the snapshot stays exact for the
//! whole call.

use std::collections::HashSet;

use crate::env::GridOracle;
use crate::state::Position;

/// The eight neighbour offsets, orthogonal first.
pub const DIRECTIONS8: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Tiles held by other living creatures and the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    creatures: HashSet<Position>,
    player: Option<Position>,
}

impl Occupancy {
    pub fn new(player: Option<Position>) -> Self {
        Self {
            creatures: HashSet::new(),
            player,
        }
    }

    pub fn from_positions(
        creatures: impl IntoIterator<Item = Position>,
        player: Option<Position>,
    ) -> Self {
        Self {
            creatures: creatures.into_iter().collect(),
            player,
        }
    }

    pub fn insert(&mut self, position: Position) {
        self.creatures.insert(position);
    }

    pub fn remove(&mut self, position: Position) {
        self.creatures.remove(&position);
    }

    pub fn player(&self) -> Option<Position> {
        self.player
    }

    /// Whether another creature (and optionally the player) stands on `position`.
    pub fn is_occupied(&self, position: Position, include_player: bool) -> bool {
        self.creatures.contains(&position) || (include_player && self.player == Some(position))
    }

    /// Number of occupied tiles around `position`, player included.
    pub fn occupied_neighbors(&self, position: Position) -> usize {
        neighbors8(position)
            .filter(|&n| self.is_occupied(n, true))
            .count()
    }
}

pub fn neighbors8(position: Position) -> impl Iterator<Item = Position> {
    DIRECTIONS8
        .into_iter()
        .map(move |(dx, dy)| position.offset(dx, dy))
}

/// In bounds, walkable, and not held by anyone the caller cares about.
pub fn is_free(
    grid: &dyn GridOracle,
    occupancy: &Occupancy,
    position: Position,
    include_player: bool,
) -> bool {
    grid.contains(position)
        && grid.is_walkable(position)
        && !occupancy.is_occupied(position, include_player)
}

/// Diagonal moves need both orthogonal tiles they brush past to be
/// walkable. Orthogonal moves always pass.
pub fn corner_clear(grid: &dyn GridOracle, from: Position, to: Position) -> bool {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    dx == 0
        || dy == 0
        || (grid.is_walkable(from.offset(dx, 0)) && grid.is_walkable(from.offset(0, dy)))
}

/// Tiles at exactly Chebyshev `radius` from `center`, clockwise from the
/// top-left corner. Radius zero yields the centre.
pub fn ring(center: Position, radius: u32) -> Vec<Position> {
    let r = radius as i32;
    if r == 0 {
        return vec![center];
    }
    let mut tiles = Vec::with_capacity(8 * radius as usize);
    for dx in -r..r {
        tiles.push(center.offset(dx, -r));
    }
    for dy in -r..r {
        tiles.push(center.offset(r, dy));
    }
    for dx in (-r + 1..=r).rev() {
        tiles.push(center.offset(dx, r));
    }
    for dy in (-r + 1..=r).rev() {
        tiles.push(center.offset(-r, dy));
    }
    tiles
}

/// Tiles whose Chebyshev distance from `center` lies in `min..=max`.
pub fn band(center: Position, min: u32, max: u32) -> Vec<Position> {
    (min..=max).flat_map(|r| ring(center, r)).collect()
}
