//! Occupancy-aware movement shared by exploration and combat.
//!
//! Two flavours over the same rules:
//!
//! - **Real time** (`advance_along_path`): glide toward the head of the path
//!   at `speed × modifier`, snapping to the tile centre once within
//!   [`AiConfig::SNAP_TOLERANCE`] world units and popping the head.
//! - **Turn based** (`step_along_path`, `step_to`): whole-tile hops, each
//!   paid for with one movement point by the caller.
//!
//! Both refuse tiles that are unwalkable or held by another living creature,
//! and never enter the player's tile. Diagonal hops may not cut a corner
//! between two blocked orthogonal tiles. A glide is checked against every
//! tile it enters, not just the path head.
//!
//! A blocked path head triggers a detour: a free neighbour adjacent to the
//! blocked tile, tried in random order. The detour replaces the path; if
//! none exists the path is dropped and the next decision re-plans.

use rand::seq::SliceRandom;

use crate::config::AiConfig;
use crate::creature::Creature;
use crate::env::{GridOracle, PathOracle};
use crate::event::CombatEvent;
use crate::spatial::{self, Occupancy};
use crate::state::{Position, WorldPos};

/// What a movement call achieved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Entered a new tile.
    Moved(Position),
    /// Still travelling toward the next tile (real time only).
    InTransit,
    /// Nothing left to follow.
    Idle,
    /// Head blocked and no detour found; the path was cleared.
    Blocked,
}

impl Creature {
    /// Whether this creature may stand on `tile` right now.
    pub fn can_enter(&self, grid: &dyn GridOracle, occupancy: &Occupancy, tile: Position) -> bool {
        spatial::is_free(grid, occupancy, tile, true)
    }

    /// Whether a single hop from the current tile onto `tile` is legal.
    pub fn can_step(&self, grid: &dyn GridOracle, occupancy: &Occupancy, tile: Position) -> bool {
        let here = self.tile();
        here.chebyshev(tile) == 1
            && self.can_enter(grid, occupancy, tile)
            && spatial::corner_clear(grid, here, tile)
    }

    /// Hops onto an adjacent free tile. The caller pays the movement point.
    pub fn step_to(
        &mut self,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        tile: Position,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let from = self.tile();
        if !self.can_step(grid, occupancy, tile) {
            return false;
        }
        self.position = tile.center(self.tile_size);
        events.push(CombatEvent::Moved { from, to: tile });
        true
    }

    /// Requests a route to `goal` and caches it. Returns false (with an
    /// empty path) when the goal is unreachable.
    pub fn plan_path(&mut self, grid: &dyn GridOracle, paths: &dyn PathOracle, goal: Position) -> bool {
        self.path.clear();
        match paths.find_path(grid, self.tile(), goal) {
            Some(route) if !route.is_empty() => {
                self.path.extend(route);
                true
            }
            _ => false,
        }
    }

    /// Turn-based: hops onto the head of the cached path, detouring around
    /// a blocked head.
    pub fn step_along_path(
        &mut self,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        events: &mut Vec<CombatEvent>,
    ) -> StepOutcome {
        let Some(&head) = self.path.front() else {
            return StepOutcome::Idle;
        };
        if self.step_to(grid, occupancy, head, events) {
            self.path.pop_front();
            return StepOutcome::Moved(head);
        }

        match self.find_detour(grid, occupancy, head) {
            Some(detour) if self.step_to(grid, occupancy, detour, events) => {
                self.path.clear();
                StepOutcome::Moved(detour)
            }
            _ => {
                self.path.clear();
                StepOutcome::Blocked
            }
        }
    }

    /// Real time: advances toward the head of the cached path.
    pub fn advance_along_path(
        &mut self,
        dt: f32,
        speed: f32,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        events: &mut Vec<CombatEvent>,
    ) -> StepOutcome {
        let Some(&head) = self.path.front() else {
            return StepOutcome::Idle;
        };
        let travel = (speed * dt).max(0.0);
        if travel <= 0.0 {
            return StepOutcome::InTransit;
        }

        let from = self.tile();
        let mut next = head;
        if head != from && !self.can_enter(grid, occupancy, head) {
            match self.find_detour(grid, occupancy, head) {
                Some(detour) => {
                    self.path.clear();
                    self.path.push_back(detour);
                    next = detour;
                }
                None => {
                    self.path.clear();
                    return StepOutcome::Blocked;
                }
            }
        }

        let target = next.center(self.tile_size);
        let remaining = self.position.distance(target);

        if remaining - travel <= AiConfig::SNAP_TOLERANCE {
            self.position = target;
            self.path.pop_front();
            if next != from {
                events.push(CombatEvent::Moved { from, to: next });
            }
            return StepOutcome::Moved(next);
        }

        // A glide that started off-centre can clip a tile other than `next`.
        let t = travel / remaining;
        let stepped = WorldPos::new(
            self.position.x + (target.x - self.position.x) * t,
            self.position.y + (target.y - self.position.y) * t,
        );
        let entering = stepped.tile(self.tile_size);
        if entering != from && !self.can_enter(grid, occupancy, entering) {
            let center = from.center(self.tile_size);
            if self.position.distance(center) <= AiConfig::SNAP_TOLERANCE {
                tracing::debug!(creature = %self.id, %entering, "glide blocked");
                self.path.clear();
                return StepOutcome::Blocked;
            }
            // Re-centre so the next glide only crosses into `next`.
            self.position = center;
            return StepOutcome::InTransit;
        }

        self.position = stepped;
        if entering != from {
            events.push(CombatEvent::Moved { from, to: entering });
        }
        StepOutcome::InTransit
    }

    /// Free neighbour of the current tile that still touches `blocked`,
    /// perpendicular and diagonal sidesteps tried in random order.
    fn find_detour(
        &mut self,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        blocked: Position,
    ) -> Option<Position> {
        let here = self.tile();
        let mut candidates: Vec<Position> = spatial::neighbors8(here)
            .filter(|&n| n != blocked && n.chebyshev(blocked) <= 1)
            .collect();
        candidates.shuffle(&mut self.rng);
        let detour = candidates
            .into_iter()
            .find(|&n| self.can_step(grid, occupancy, n));
        tracing::debug!(creature = %self.id, %blocked, ?detour, "path head blocked");
        detour
    }

    /// Free neighbour that increases distance from `threat` the most.
    pub fn best_step_away(
        &self,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        threat: Position,
    ) -> Option<Position> {
        let here = self.tile();
        let score = |p: Position| (p.chebyshev(threat), p.distance_squared(threat));
        let current = score(here);
        spatial::neighbors8(here)
            .filter(|&n| self.can_step(grid, occupancy, n))
            .map(|n| (score(n), n))
            .filter(|(s, _)| *s > current)
            .max_by_key(|(s, _)| *s)
            .map(|(_, n)| n)
    }

    /// Free neighbour that closes distance to `goal` the most.
    pub fn best_step_toward(
        &self,
        grid: &dyn GridOracle,
        occupancy: &Occupancy,
        goal: Position,
    ) -> Option<Position> {
        let here = self.tile();
        let score = |p: Position| (p.chebyshev(goal), p.distance_squared(goal));
        let current = score(here);
        spatial::neighbors8(here)
            .filter(|&n| self.can_step(grid, occupancy, n))
            .map(|n| (score(n), n))
            .filter(|(s, _)| *s < current)
            .min_by_key(|(s, _)| *s)
            .map(|(_, n)| n)
    }
}
