//! Action phase: abilities and plain attacks, one action point each.

use super::TurnContext;
use crate::combat::{self, AttackOutcome, DamageType};
use crate::config::AiConfig;
use crate::creature::Creature;
use crate::event::CombatEvent;
use crate::state::StatusEffectKind;

impl Creature {
    /// Spawners split when hurt, when they have not split yet, or when the
    /// ability roll says so. Costs one action point; the turn goes on.
    pub(super) fn try_spawn(&mut self, ctx: &mut TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let Some(ability) = self.spawn_ability() else {
            return;
        };
        if self.action_points.is_empty()
            || self.spawn_count >= self.max_spawns
            || !self.abilities.is_ready()
        {
            return;
        }

        let wounded = self.stats.health_fraction() < AiConfig::LOW_HEALTH_FRACTION;
        if !(wounded || self.spawn_count == 0 || self.roll_ability_chance()) {
            return;
        }

        let (result, ability_events) = self.use_ability(ability, &mut *ctx.target);
        events.extend(ability_events);
        self.action_points.spend();
        tracing::debug!(creature = %self.id, success = result.success, "spawn attempt");
    }

    pub(super) fn action_phase(&mut self, ctx: &mut TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        while !self.action_points.is_empty() && self.is_alive() && ctx.target.is_alive() {
            let distance = self.tile().chebyshev(ctx.target.position());

            let ability = self
                .combat_ability()
                .filter(|a| self.abilities.is_ready() && distance <= a.profile().range);
            if let Some(ability) = ability {
                if self.roll_ability_chance() {
                    let (_, ability_events) = self.use_ability(ability, &mut *ctx.target);
                    events.extend(ability_events);
                    self.action_points.spend();
                    continue;
                }
            }

            if distance > self.stats.attack_range.max(1) {
                break;
            }
            self.attack(ctx, events);
            self.action_points.spend();
        }
    }

    /// Plain attack against the turn's target.
    fn attack(&mut self, ctx: &mut TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        let target_tile = ctx.target.position();
        let distance = self.tile().chebyshev(target_tile);

        if self.reveal() {
            events.push(CombatEvent::Revealed { at: self.tile() });
        }

        let chance = combat::hit_chance(
            self.stats.accuracy,
            distance,
            self.stats.attack_range,
            ctx.target.mobility_modifier(),
        );
        if !combat::roll_hit(chance, &mut self.rng) {
            tracing::debug!(creature = %self.id, chance, "attack missed");
            events.push(CombatEvent::AttackMissed {
                target: target_tile,
                chance,
            });
            return;
        }

        let weakened = self.status_effects.has(StatusEffectKind::Weakened);
        let damage = combat::roll_damage(self.stats.damage, 1.0, weakened, &mut self.rng);
        let report = ctx.target.take_damage(damage, DamageType::Physical);
        let outcome = report.outcome();
        tracing::debug!(
            creature = %self.id,
            chance,
            amount = report.amount,
            critical = outcome == AttackOutcome::Critical,
            "attack hit"
        );
        events.push(CombatEvent::AttackHit {
            target: target_tile,
            amount: report.amount,
            outcome,
            instant_death: report.instant_death,
        });
    }
}
