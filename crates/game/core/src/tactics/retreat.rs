//! Falling back: retreat rolls, fleeing, bystanders, stealth re-entry, and
//! the retreat-position search.

use rand::Rng;
use rand::seq::SliceRandom;

use super::TurnContext;
use crate::config::AiConfig;
use crate::creature::{Creature, TacticalFlags};
use crate::event::CombatEvent;
use crate::spatial;
use crate::state::Position;

impl Creature {
    /// Spends every movement point stepping greedily away from `threat`.
    /// Returns the number of tiles moved.
    pub(super) fn flee_from(
        &mut self,
        threat: Position,
        ctx: &TurnContext<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> u32 {
        let mut moved = 0;
        while !self.movement_points.is_empty() {
            let Some(next) = self.best_step_away(ctx.grid, ctx.occupancy, threat) else {
                break;
            };
            if !self.step_to(ctx.grid, ctx.occupancy, next, events) {
                break;
            }
            self.movement_points.spend();
            moved += 1;
        }
        moved
    }

    /// Passive or unprovoked cowardly creature caught near a fight.
    pub(super) fn bystander_turn(&mut self, ctx: &TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let here = self.tile();
        if here.chebyshev(ctx.combat_center) <= ctx.config.passive_flee_radius {
            tracing::debug!(creature = %self.id, "bystander leaves the fight");
            self.flee_from(ctx.combat_center, ctx, events);
            return;
        }

        while !self.movement_points.is_empty() {
            let mut options: Vec<Position> = spatial::neighbors8(self.tile())
                .filter(|&n| self.can_step(ctx.grid, ctx.occupancy, n))
                .collect();
            options.shuffle(&mut self.rng);
            let Some(next) = options.first().copied() else {
                break;
            };
            if !self.step_to(ctx.grid, ctx.occupancy, next, events) {
                break;
            }
            self.movement_points.spend();
        }
    }

    /// Retreat roll. On success the whole turn is spent moving away from
    /// the player.
    pub(super) fn try_retreat(
        &mut self,
        ctx: &TurnContext<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if !self.should_consider_retreat() {
            return false;
        }
        let probability = self.personality.retreat_probability();
        let roll = self.rng.r#gen::<f32>();
        tracing::debug!(
            creature = %self.id,
            health = self.stats.health_fraction(),
            probability,
            roll,
            "retreat roll"
        );
        if roll >= probability {
            return false;
        }

        let from = self.tile();
        self.flee_from(ctx.target.position(), ctx, events);
        events.push(CombatEvent::Retreated {
            from,
            to: self.tile(),
        });
        true
    }

    /// Stealth creatures far from the player slip back into hiding and
    /// fall back instead of engaging.
    pub(super) fn try_stealth_reentry(
        &mut self,
        ctx: &TurnContext<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if self.is_stealthed || self.stealth_ability().is_none() {
            return false;
        }
        let threat = ctx.target.position();
        if self.tile().chebyshev(threat) <= ctx.config.stealth_reentry_distance {
            return false;
        }
        let wounded = self.stats.health_fraction() < AiConfig::LOW_HEALTH_FRACTION;
        if !wounded && self.rng.r#gen::<f32>() >= ctx.config.stealth_reentry_chance {
            return false;
        }
        if !self.enter_stealth() {
            return false;
        }

        tracing::debug!(creature = %self.id, wounded, "stealth re-entered");
        events.push(CombatEvent::StealthEntered { at: self.tile() });
        self.flee_from(threat, ctx, events);
        true
    }

    /// Best tile to fall back to within this turn's movement budget.
    ///
    /// Only tiles farther from the player than the current one qualify.
    /// Score favours distance from the player, penalises crowding, and for
    /// cover seekers rewards tiles next to blocking terrain.
    pub(super) fn find_retreat_position(&self, ctx: &TurnContext<'_>) -> Option<Position> {
        let here = self.tile();
        let threat = ctx.target.position();
        let current = here.chebyshev(threat);
        let reach = self.movement_points.current.max(1);
        let seeks_cover = self.traits.flags.contains(TacticalFlags::SEEKS_COVER);

        spatial::band(here, 1, reach)
            .into_iter()
            .filter(|&tile| tile.chebyshev(threat) > current)
            .filter(|&tile| self.can_enter(ctx.grid, ctx.occupancy, tile))
            .map(|tile| {
                let mut score = tile.chebyshev(threat) as f32 * 2.0
                    - ctx.occupancy.occupied_neighbors(tile) as f32
                    - tile.chebyshev(here) as f32 * 0.5;
                if seeks_cover {
                    let walls = spatial::neighbors8(tile)
                        .filter(|&n| !ctx.grid.is_walkable(n))
                        .count();
                    score += walls.min(3) as f32;
                }
                (score, tile)
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, tile)| tile)
    }
}
