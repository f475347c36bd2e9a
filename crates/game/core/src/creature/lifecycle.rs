//! Health, provocation, cooldown, and death.

use rand::Rng;

use super::{BehaviorKind, Creature, CreatureState, Personality};
use crate::ability::{self, AbilityEffect, AbilityKind, AbilityResult};
use crate::combat::{DamageTaken, DamageType, roll_damage};
use crate::config::AiConfig;
use crate::event::CombatEvent;
use crate::loot::{ItemStack, LootGenerator};
use crate::state::{StatusEffectKind, WorldPos};
use crate::status::{self, TickMode};
use crate::target::CombatTarget;

/// Area effect released by a death-triggered ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathEffect {
    Explosion {
        center: WorldPos,
        /// Chebyshev radius in tiles.
        radius: u32,
        damage: u32,
        damage_type: DamageType,
    },
}

/// Everything that happens once when a creature dies.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathReport {
    pub loot: Vec<ItemStack>,
    pub effect: Option<DeathEffect>,
}

impl Creature {
    /// Moves to `to` unless dead. Returns whether the state changed.
    pub(crate) fn set_state(&mut self, to: CreatureState, events: &mut Vec<CombatEvent>) -> bool {
        let from = self.state;
        if from == to || from == CreatureState::Dead {
            return false;
        }
        tracing::debug!(creature = %self.id, %from, %to, "state transition");
        self.state = to;
        events.push(CombatEvent::StateChanged { from, to });
        true
    }

    /// Reduces health. Dead creatures ignore further damage.
    ///
    /// Any damage reveals a stealthed creature. Reaching zero health marks
    /// the creature Dead, clears its path, and empties both pools.
    pub fn take_damage(&mut self, amount: u32, damage_type: DamageType) -> DamageTaken {
        if !self.is_alive() {
            return DamageTaken::default();
        }

        let dealt = amount.min(self.stats.current_health);
        self.stats.current_health -= dealt;

        let revealed = dealt > 0 && self.reveal();

        let killed = self.stats.current_health == 0;
        if killed {
            tracing::debug!(creature = %self.id, %damage_type, "creature died");
            self.state = CreatureState::Dead;
            self.path.clear();
            self.action_points.drain();
            self.movement_points.drain();
        }

        DamageTaken {
            amount: dealt,
            remaining_health: self.stats.current_health,
            killed,
            revealed,
        }
    }

    /// Marks the creature as attacked by the player.
    ///
    /// Cowardly creatures start fleeing; idle or patrolling creatures start
    /// chasing. A stunned creature stays stunned and reacts once the stun
    /// clears. The provocation lasts [`AiConfig::PROVOKE_DURATION`] seconds.
    pub fn provoke(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if !self.is_alive() {
            return events;
        }

        self.is_provoked = true;
        self.provoked_timer = AiConfig::PROVOKE_DURATION;
        self.path.clear();

        if self.state == CreatureState::Stunned
            || self.status_effects.has(StatusEffectKind::Stunned)
        {
            return events;
        }
        if self.behavior == BehaviorKind::Cowardly {
            self.set_state(CreatureState::Fleeing, &mut events);
        } else if matches!(self.state, CreatureState::Idle | CreatureState::Patrolling) {
            self.set_state(CreatureState::Chasing, &mut events);
        }
        events
    }

    /// One turn of cooldown, floored at zero.
    pub fn tick_cooldown(&mut self) {
        self.abilities.cooldown = self.abilities.cooldown.saturating_sub(1);
    }

    /// First slotted ability the action phase may pick.
    pub fn combat_ability(&self) -> Option<AbilityKind> {
        self.abilities.iter().find(|a| a.is_combat_action())
    }

    /// First slotted spawn ability.
    pub fn spawn_ability(&self) -> Option<AbilityKind> {
        self.abilities.iter().find(|a| a.is_spawn())
    }

    /// First slotted stealth ability.
    pub fn stealth_ability(&self) -> Option<AbilityKind> {
        self.abilities.iter().find(|a| a.is_stealth())
    }

    pub fn has_regeneration(&self) -> bool {
        self.abilities.has(AbilityKind::Regenerate)
    }

    /// Cooldown ready, a usable ability slotted, and the ability roll won.
    pub fn should_use_ability(&mut self) -> bool {
        if !self.is_alive() || !self.abilities.is_ready() || self.combat_ability().is_none() {
            return false;
        }
        self.roll_ability_chance()
    }

    pub(crate) fn roll_ability_chance(&mut self) -> bool {
        self.rng.r#gen::<f32>() < self.abilities.chance
    }

    /// Health at or below the retreat threshold. Berserkers never retreat.
    pub fn should_consider_retreat(&self) -> bool {
        if self.personality == Personality::Berserk || !self.is_alive() {
            return false;
        }
        self.stats.health_fraction() <= self.traits.retreat_threshold
    }

    /// Activates `ability` against `target`. The cooldown starts only when
    /// the activation succeeds.
    pub fn use_ability(
        &mut self,
        ability: AbilityKind,
        target: &mut dyn CombatTarget,
    ) -> (AbilityResult, Vec<CombatEvent>) {
        let mut events = Vec::new();
        let result = ability::resolve(ability, self, target, &mut events);
        if result.success {
            self.abilities.cooldown = self.abilities.cooldown_max;
        }
        events.push(CombatEvent::AbilityUsed {
            result: result.clone(),
        });
        (result, events)
    }

    /// Leaves stealth. Returns true when the creature was hidden.
    pub fn reveal(&mut self) -> bool {
        if !self.is_stealthed {
            return false;
        }
        self.is_stealthed = false;
        self.was_stealthed = true;
        true
    }

    /// Slips into stealth. Only creatures with a stealth ability can.
    pub fn enter_stealth(&mut self) -> bool {
        if self.is_stealthed || !self.is_alive() || self.stealth_ability().is_none() {
            return false;
        }
        self.is_stealthed = true;
        true
    }

    /// Refills both pools and advances turn-based status effects.
    ///
    /// A creature stunned when its turn starts loses the turn: both pools
    /// stay empty.
    pub fn start_turn(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if !self.is_alive() {
            return events;
        }

        let stunned = self.status_effects.has(StatusEffectKind::Stunned);
        if stunned {
            self.action_points.drain();
            self.movement_points.drain();
            self.path.clear();
            self.set_state(CreatureState::Stunned, &mut events);
        } else {
            self.action_points.refill();
            self.movement_points.refill();
        }

        let tick = status::tick(&mut self.status_effects, TickMode::TurnBased);
        self.apply_status_tick(tick, &mut events);

        if !stunned && self.state == CreatureState::Stunned {
            let next = if self.is_provoked && self.behavior == BehaviorKind::Cowardly {
                CreatureState::Fleeing
            } else if self.in_combat_zone {
                CreatureState::Chasing
            } else {
                CreatureState::Idle
            };
            self.set_state(next, &mut events);
        }
        events
    }

    /// Applies damage over time and reports expirations.
    pub(crate) fn apply_status_tick(&mut self, tick: status::StatusTick, events: &mut Vec<CombatEvent>) {
        for kind in tick.expired {
            events.push(CombatEvent::StatusExpired { kind });
        }

        self.dot_accumulator += tick.damage;
        let whole = self.dot_accumulator.floor();
        if whole < 1.0 {
            return;
        }
        self.dot_accumulator -= whole;

        let at = self.tile();
        let taken = self.take_damage(whole as u32, DamageType::True);
        if taken.amount > 0 {
            events.push(CombatEvent::Damaged {
                at,
                amount: taken.amount,
                damage_type: DamageType::True,
            });
        }
        if taken.killed {
            events.push(CombatEvent::Died { at });
        }
    }

    /// Rolls this creature's drop table.
    pub fn generate_loot(&mut self, loot: &LootGenerator<'_>) -> Vec<ItemStack> {
        loot.generate(self.kind, &mut self.rng)
    }

    /// Loot and death-triggered effects. Fires once; later calls and calls
    /// on living creatures return `None`.
    pub fn on_death(&mut self, loot: &LootGenerator<'_>) -> Option<DeathReport> {
        if self.is_alive() || self.death_handled {
            return None;
        }
        self.death_handled = true;

        let drops = self.generate_loot(loot);
        let slots = self.abilities;
        let effect = slots.iter().find_map(|ability| {
            let profile = ability.profile();
            match profile.effect {
                AbilityEffect::DeathBurst { radius } => Some(DeathEffect::Explosion {
                    center: self.position,
                    radius,
                    damage: roll_damage(
                        self.stats.damage,
                        profile.damage_multiplier,
                        false,
                        &mut self.rng,
                    ),
                    damage_type: profile.damage_type,
                }),
                _ => None,
            }
        });

        tracing::debug!(
            creature = %self.id,
            loot = drops.len(),
            explodes = effect.is_some(),
            "death handled"
        );
        Some(DeathReport {
            loot: drops,
            effect,
        })
    }
}
