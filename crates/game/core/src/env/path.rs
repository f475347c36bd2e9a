use super::GridOracle;
use crate::state::Position;

/// Pathfinding service consumed as a black box.
///
/// The engine asks for a route, caches it on the creature, and re-checks
/// occupancy itself every step; the oracle only knows terrain.
pub trait PathOracle {
    /// Ordered tiles from `start` (exclusive) to `goal` (inclusive), or `None`
    /// when the goal is unreachable. `Some(vec![])` means `start == goal`.
    fn find_path(
        &self,
        grid: &dyn GridOracle,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>>;

    /// Grid distance. Diagonal steps count as one.
    fn distance(&self, a: Position, b: Position) -> u32 {
        a.chebyshev(b)
    }
}
