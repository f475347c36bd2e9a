//! Movement phase: where to stand before acting.

use rand::Rng;
use rand::seq::SliceRandom;

use super::TurnContext;
use crate::config::AiConfig;
use crate::creature::{Creature, Personality};
use crate::event::CombatEvent;
use crate::movement::StepOutcome;
use crate::spatial;
use crate::state::Position;

impl Creature {
    /// Distance a ranged creature tries to hold: one tile inside its range,
    /// at least [`AiConfig::MIN_KITING_DISTANCE`], never beyond its range.
    pub fn preferred_range(&self) -> u32 {
        let range = self.stats.attack_range;
        range
            .saturating_sub(1)
            .max(AiConfig::MIN_KITING_DISTANCE)
            .min(range)
    }

    pub(super) fn movement_phase(&mut self, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        if self.movement_points.is_empty() {
            return;
        }

        let wounded = self.stats.health_fraction() < AiConfig::LOW_HEALTH_FRACTION;
        if wounded && !self.personality.holds_ground() {
            if let Some(fallback) = self.find_retreat_position(ctx) {
                tracing::debug!(creature = %self.id, %fallback, "wounded, falling back");
                self.move_to(fallback, ctx, events);
                return;
            }
        }

        if self.is_ranged() {
            self.kite(ctx, events);
        } else if self.wants_flank(ctx) {
            self.flank(ctx, events);
        } else {
            self.approach(ctx, events);
        }
    }

    /// Ranged spacing: back off when too close, close in when too far,
    /// otherwise maybe strafe.
    fn kite(&mut self, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let target = ctx.target.position();
        let preferred = self.preferred_range();

        while !self.movement_points.is_empty() {
            let distance = self.tile().chebyshev(target);
            let next = if distance < preferred {
                self.best_step_away(ctx.grid, ctx.occupancy, target)
            } else if distance > preferred {
                self.best_step_toward(ctx.grid, ctx.occupancy, target)
            } else {
                break;
            };
            let Some(next) = next else {
                break;
            };
            if !self.step_to(ctx.grid, ctx.occupancy, next, events) {
                break;
            }
            self.movement_points.spend();
        }

        if self.personality == Personality::Tactical
            && !self.movement_points.is_empty()
            && self.tile().chebyshev(target) == preferred
            && self.rng.r#gen::<f32>() < ctx.config.strafe_chance
        {
            self.strafe(target, ctx, events);
        }
    }

    /// One sidestep that keeps the distance to `target` unchanged,
    /// perpendicular to the line of fire when possible.
    fn strafe(&mut self, target: Position, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let here = self.tile();
        let distance = here.chebyshev(target);
        let (dx, dy) = ((target.x - here.x).signum(), (target.y - here.y).signum());
        let perpendicular = [here.offset(-dy, dx), here.offset(dy, -dx)];

        let options: Vec<Position> = spatial::neighbors8(here)
            .filter(|&n| n.chebyshev(target) == distance)
            .filter(|&n| self.can_step(ctx.grid, ctx.occupancy, n))
            .collect();
        let sideways: Vec<Position> = options
            .iter()
            .copied()
            .filter(|n| perpendicular.contains(n))
            .collect();
        let pool = if sideways.is_empty() { &options } else { &sideways };
        let Some(&pick) = pool.choose(&mut self.rng) else {
            return;
        };

        if self.step_to(ctx.grid, ctx.occupancy, pick, events) {
            tracing::debug!(creature = %self.id, %pick, "strafe");
            self.movement_points.spend();
        }
    }

    fn wants_flank(&self, ctx: &TurnContext<'_>) -> bool {
        let distance = self.tile().chebyshev(ctx.target.position());
        self.personality == Personality::Tactical
            && self.traits.prefers_flanking()
            && distance > 1
            && distance <= ctx.config.flanking_engage_distance
    }

    /// Picks the best free tile next to the target and walks there.
    ///
    /// ```text
    /// score = -distance_weight × path_length
    ///         -crowding_weight × occupied_neighbours
    ///         +diagonal_bonus   (if diagonal to the target)
    /// ```
    fn flank(&mut self, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let target = ctx.target.position();
        let here = self.tile();
        let config = ctx.config;

        let best = spatial::ring(target, 1)
            .into_iter()
            .filter(|&tile| self.can_enter(ctx.grid, ctx.occupancy, tile))
            .filter_map(|tile| {
                let length = ctx.paths.find_path(ctx.grid, here, tile)?.len() as f32;
                let mut score = -config.flank_distance_weight * length
                    - config.flank_crowding_weight * ctx.occupancy.occupied_neighbors(tile) as f32;
                if tile.is_diagonal_to(target) {
                    score += config.flank_diagonal_bonus;
                }
                Some((score, tile))
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, tile)| tile);

        match best {
            Some(tile) => {
                tracing::debug!(creature = %self.id, %tile, "flanking");
                self.move_to(tile, ctx, events);
            }
            None => self.approach(ctx, events),
        }
    }

    /// Melee approach: greedy steps toward the target, falling back to a
    /// fresh path when the greedy step is blocked.
    fn approach(&mut self, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let target = ctx.target.position();
        let stop_at = self.stats.attack_range.max(1);

        while !self.movement_points.is_empty() && self.tile().chebyshev(target) > stop_at {
            if let Some(next) = self.best_step_toward(ctx.grid, ctx.occupancy, target) {
                if self.step_to(ctx.grid, ctx.occupancy, next, events) {
                    self.path.clear();
                    self.movement_points.spend();
                    continue;
                }
            }

            if self.path.is_empty() {
                if !self.plan_path(ctx.grid, ctx.paths, target) {
                    break;
                }
                if self.path.back() == Some(&target) {
                    self.path.pop_back();
                }
            }
            match self.step_along_path(ctx.grid, ctx.occupancy, events) {
                StepOutcome::Moved(_) => {
                    self.movement_points.spend();
                }
                _ => break,
            }
        }
    }

    /// Walks a planned route toward `destination` with the remaining points.
    fn move_to(&mut self, destination: Position, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        if !self.plan_path(ctx.grid, ctx.paths, destination) {
            return;
        }
        while !self.movement_points.is_empty() && !self.path.is_empty() {
            match self.step_along_path(ctx.grid, ctx.occupancy, events) {
                StepOutcome::Moved(_) => {
                    self.movement_points.spend();
                }
                _ => break,
            }
        }
    }
}
