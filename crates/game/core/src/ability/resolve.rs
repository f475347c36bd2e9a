use super::{AbilityEffect, AbilityKind, AbilityPayload, AbilityProfile, AbilityResult};
use crate::combat;
use crate::creature::Creature;
use crate::event::CombatEvent;
use crate::state::{Position, StatusEffectKind};
use crate::target::CombatTarget;

/// Resolves one activation of `ability` by `user` against `target`.
///
/// Distances are measured on the user's grid (`Creature::tile`).
///
/// Dispatches on the profile's effect tag. Hits, misses and status effects
/// are pushed onto `events`; the returned result is what the caller records
/// (and what decides whether the cooldown starts).
///
/// Passive and death-triggered abilities are never activated this way and
/// always fail.
pub fn resolve(
    ability: AbilityKind,
    user: &mut Creature,
    target: &mut dyn CombatTarget,
    events: &mut Vec<CombatEvent>,
) -> AbilityResult {
    let profile = ability.profile();
    match profile.effect {
        AbilityEffect::Strike => strike(ability, profile, user, target, events),
        AbilityEffect::Knockback { distance } => {
            knockback(ability, profile, distance, user, target, events)
        }
        AbilityEffect::Spawn => spawn(ability, user),
        AbilityEffect::Passive | AbilityEffect::DeathBurst { .. } => AbilityResult::failure(
            ability,
            format!("{} cannot be activated", profile.name),
        ),
    }
}

fn strike(
    ability: AbilityKind,
    profile: &AbilityProfile,
    user: &mut Creature,
    target: &mut dyn CombatTarget,
    events: &mut Vec<CombatEvent>,
) -> AbilityResult {
    let user_tile = user.tile();
    let target_tile = target.position();
    let distance = user_tile.chebyshev(target_tile);
    if distance > profile.range {
        return AbilityResult::failure(ability, format!("{} can't reach you!", user.name));
    }

    // Stealth abilities always give the user away, hit or miss.
    let stealth_multiplier = match profile.stealth_multiplier {
        Some(multiplier) => {
            let was_hidden = user.reveal();
            if was_hidden {
                events.push(CombatEvent::Revealed { at: user_tile });
                multiplier
            } else {
                1.0
            }
        }
        None => 1.0,
    };

    // Abilities carry their own accuracy bias instead of the ranged curve.
    let chance = combat::hit_chance(
        user.stats.accuracy + profile.accuracy_bonus,
        distance,
        1,
        target.mobility_modifier(),
    );
    if !combat::roll_hit(chance, &mut user.rng) {
        events.push(CombatEvent::AttackMissed {
            target: target_tile,
            chance,
        });
        return AbilityResult::failure(ability, format!("{}'s {} misses!", user.name, profile.name));
    }

    let weakened = user.status_effects.has(StatusEffectKind::Weakened);
    let rolled = combat::roll_damage(
        user.stats.damage,
        profile.damage_multiplier * stealth_multiplier,
        weakened,
        &mut user.rng,
    );

    let mut dealt = 0;
    if rolled > 0 {
        let report = target.take_damage(rolled, profile.damage_type);
        dealt = report.amount;
        events.push(CombatEvent::AttackHit {
            target: target_tile,
            amount: report.amount,
            outcome: report.outcome(),
            instant_death: report.instant_death,
        });
    }

    if let Some(rider) = profile.status.filter(|_| target.is_alive()) {
        target.apply_status(rider.kind, rider.duration, rider.turn_based, profile.name);
        events.push(CombatEvent::StatusApplied {
            target: target_tile,
            kind: rider.kind,
            duration: rider.duration,
        });
    }

    let message = if dealt > 0 {
        format!("{} uses {} for {} damage!", user.name, profile.name, dealt)
    } else if rolled == 0 {
        format!("{} uses {}!", user.name, profile.name)
    } else {
        format!("{} uses {} but deals no damage.", user.name, profile.name)
    };

    tracing::debug!(creature = %user.id, %ability, dealt, "ability resolved");

    AbilityResult {
        ability,
        success: true,
        damage: dealt,
        message,
        payload: AbilityPayload::None,
    }
}

fn knockback(
    ability: AbilityKind,
    profile: &AbilityProfile,
    distance: u32,
    user: &mut Creature,
    target: &mut dyn CombatTarget,
    events: &mut Vec<CombatEvent>,
) -> AbilityResult {
    let from = user.tile();
    let mut result = strike(ability, profile, user, target, events);
    if result.success && target.is_alive() {
        result.payload = AbilityPayload::Knockback {
            direction: direction(from, target.position()),
            distance,
        };
    }
    result
}

fn spawn(ability: AbilityKind, user: &mut Creature) -> AbilityResult {
    let Some(kind) = user.spawn_kind else {
        return AbilityResult::failure(ability, format!("{} has nothing to spawn", user.name));
    };
    if user.spawn_count >= user.max_spawns {
        return AbilityResult::failure(ability, format!("{} cannot split any further", user.name));
    }

    user.spawn_count += 1;
    tracing::debug!(creature = %user.id, spawned = %kind, count = user.spawn_count, "spawn requested");

    AbilityResult {
        ability,
        success: true,
        damage: 0,
        message: format!("{} splits!", user.name),
        payload: AbilityPayload::Spawn {
            position: user.tile(),
            kind,
        },
    }
}

/// Unit step from `from` toward `to`. Coincident tiles push east.
fn direction(from: Position, to: Position) -> (i32, i32) {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    if dx == 0 && dy == 0 { (1, 0) } else { (dx, dy) }
}
