//! A* over the eight-connected grid.
//!
//! Terrain only: creatures and the player never block a path here. The
//! engine handles occupancy itself (detours, forfeited steps).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use creature_core::spatial::{self, DIRECTIONS8};
use creature_core::{GridOracle, PathOracle, Position};

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    position: Position,
    f_score: u32,
    h_score: u32,
}

// BinaryHeap is a max-heap, so the ordering is reversed. Ties go to the node
// closer to the goal, then to the smaller position, so equal-cost searches
// always return the same path.
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.h_score.cmp(&self.h_score))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reference [`PathOracle`].
///
/// Every step costs one, diagonal or not, so path length equals Chebyshev
/// distance on open floor. Diagonal steps may not cut a wall corner.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathfinder {
    max_expanded: Option<usize>,
}

impl AStarPathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives up (returns `None`) after expanding `limit` nodes.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.max_expanded = Some(limit);
        self
    }

    fn step_allowed(grid: &dyn GridOracle, from: Position, dx: i32, dy: i32) -> bool {
        let to = from.offset(dx, dy);
        grid.is_walkable(to) && spatial::corner_clear(grid, from, to)
    }
}

impl PathOracle for AStarPathfinder {
    fn find_path(
        &self,
        grid: &dyn GridOracle,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        if start == goal {
            return Some(Vec::new());
        }
        if !grid.is_walkable(goal) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut g_score: HashMap<Position, u32> = HashMap::new();
        let mut expanded = 0usize;

        g_score.insert(start, 0);
        open_set.push(ScoredNode {
            position: start,
            f_score: start.chebyshev(goal),
            h_score: start.chebyshev(goal),
        });

        while let Some(current) = open_set.pop() {
            if current.position == goal {
                return Some(reconstruct_path(&came_from, goal));
            }

            let current_g = g_score.get(&current.position).copied().unwrap_or(u32::MAX);
            // Stale heap entry, a cheaper route was already expanded.
            if current.f_score > current_g.saturating_add(current.h_score) {
                continue;
            }

            expanded += 1;
            if self.max_expanded.is_some_and(|limit| expanded > limit) {
                tracing::debug!(%start, %goal, expanded, "path search abandoned");
                return None;
            }

            for (dx, dy) in DIRECTIONS8 {
                if !Self::step_allowed(grid, current.position, dx, dy) {
                    continue;
                }
                let neighbor = current.position.offset(dx, dy);
                let tentative_g = current_g + 1;
                let neighbor_g = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.position);
                    g_score.insert(neighbor, tentative_g);
                    let h_score = neighbor.chebyshev(goal);
                    open_set.push(ScoredNode {
                        position: neighbor,
                        f_score: tentative_g + h_score,
                        h_score,
                    });
                }
            }
        }

        None
    }
}

/// Walks `came_from` back from `goal`. The start tile is not included.
fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.pop();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::GridMap;

    #[test]
    fn same_tile_is_an_empty_path() {
        let map = GridMap::open(5, 5);
        let path = AStarPathfinder::new().find_path(&map, Position::new(2, 2), Position::new(2, 2));
        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn wall_goal_is_unreachable() {
        let map = GridMap::open(5, 5).with_walls([Position::new(4, 4)]);
        let path = AStarPathfinder::new().find_path(&map, Position::new(0, 0), Position::new(4, 4));
        assert_eq!(path, None);
    }

    #[test]
    fn node_limit_gives_up() {
        let map = GridMap::open(64, 64);
        let path = AStarPathfinder::new()
            .with_node_limit(3)
            .find_path(&map, Position::new(0, 0), Position::new(60, 0));
        assert_eq!(path, None);
    }

    #[test]
    fn diagonal_path_matches_chebyshev_distance() {
        let map = GridMap::open(10, 10);
        let path = AStarPathfinder::new()
            .find_path(&map, Position::new(1, 1), Position::new(7, 4))
            .expect("path");
        assert_eq!(path.len(), 6);
        assert_eq!(path.last(), Some(&Position::new(7, 4)));
    }
}
