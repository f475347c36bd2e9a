//! Combat-active turns.
//!
//! `take_turn` runs the whole decision procedure for one creature in one
//! combat round. Phases, in order:
//!
//! 1. **Upkeep**: cooldown tick, regeneration. A rooted creature loses its
//!    movement points here.
//! 2. **Bystanders**: passive or cowardly creatures that were not provoked
//!    move away from the fight (or wander) and do nothing else.
//! 3. **Provoked cowards** flee from the player with every movement point.
//! 4. **Tactics**:
//!    - retreat roll (never for Berserk),
//!    - special cases (stealth re-entry, spawning),
//!    - movement (kiting, strafing, flanking, approach, low-health fallback),
//!    - actions (ability or plain attack, one action point each).
//!
//! Both pools only go down during a turn and are emptied when it ends.

mod action;
mod positioning;
mod retreat;

use crate::config::AiConfig;
use crate::creature::{BehaviorKind, Creature};
use crate::env::{GridOracle, PathOracle};
use crate::event::CombatEvent;
use crate::spatial::Occupancy;
use crate::state::Position;
use crate::status;
use crate::target::CombatTarget;

/// Everything a combat turn reads or touches outside the creature.
pub struct TurnContext<'a> {
    pub grid: &'a dyn GridOracle,
    pub paths: &'a dyn PathOracle,
    pub config: &'a AiConfig,
    pub target: &'a mut dyn CombatTarget,
    /// Other living creatures and the player.
    pub occupancy: &'a Occupancy,
    /// Centre of the fight. Bystanders keep away from it.
    pub combat_center: Position,
}

/// Result of one `take_turn` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    /// False when the creature could not act at all (dead, stunned, or no
    /// points left).
    pub complete: bool,
    pub events: Vec<CombatEvent>,
}

impl Creature {
    /// Runs one combat turn.
    pub fn take_turn(&mut self, ctx: &mut TurnContext<'_>) -> TurnReport {
        if !self.is_alive()
            || (self.action_points.is_empty() && self.movement_points.is_empty())
        {
            return TurnReport::default();
        }

        let mut events = Vec::new();
        self.upkeep(ctx.config, &mut events);
        if !status::can_move(&self.status_effects) && !self.movement_points.is_empty() {
            tracing::debug!(creature = %self.id, "rooted, movement forfeited");
            self.movement_points.drain();
        }

        let provoked = self.is_provoked;
        match self.behavior {
            BehaviorKind::Passive | BehaviorKind::Cowardly if !provoked => {
                self.bystander_turn(ctx, &mut events);
            }
            BehaviorKind::Cowardly => {
                let threat = ctx.target.position();
                tracing::debug!(creature = %self.id, "provoked coward flees");
                self.flee_from(threat, ctx, &mut events);
            }
            _ => self.tactical_turn(ctx, &mut events),
        }

        self.end_turn();
        TurnReport {
            complete: true,
            events,
        }
    }

    fn upkeep(&mut self, config: &AiConfig, events: &mut Vec<CombatEvent>) {
        self.tick_cooldown();
        if self.has_regeneration() && self.stats.current_health < self.stats.max_health {
            let amount =
                ((self.stats.max_health as f32 * config.regeneration_fraction).round() as u32).max(1);
            let healed = self.stats.heal(amount);
            if healed > 0 {
                events.push(CombatEvent::Healed {
                    at: self.tile(),
                    amount: healed,
                });
            }
        }
    }

    fn tactical_turn(&mut self, ctx: &mut TurnContext<'_>, events: &mut Vec<CombatEvent>) {
        if self.try_retreat(ctx, events) {
            return;
        }
        if self.try_stealth_reentry(ctx, events) {
            return;
        }
        self.try_spawn(ctx, events);

        if !ctx.target.is_alive() {
            return;
        }
        self.movement_phase(ctx, events);
        self.action_phase(ctx, events);
    }

    fn end_turn(&mut self) {
        self.action_points.drain();
        self.movement_points.drain();
    }
}
