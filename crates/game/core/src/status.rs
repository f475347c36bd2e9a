//! Status-effect service.
//!
//! Stateless rules over a [`StatusEffects`] collection: applying and removing
//! effects, the movement-speed multiplier, damage over time, and advancing
//! either clock. Creatures own their collection and pass it in by mutable
//! reference; nothing here keeps state between calls.
//!
//! Two clocks run side by side. Exploration advances real-time effects by
//! `dt` seconds each tick; `start_turn` advances turn-based effects by one
//! whole turn. An effect only ever moves on its own clock.

use crate::state::{StatusEffect, StatusEffectKind, StatusEffects};

/// Which clock a [`tick`] call advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickMode {
    /// Exploration tick of `dt` seconds.
    RealTime(f32),
    /// Start of a combat turn.
    TurnBased,
}

/// What a [`tick`] produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Damage dealt by damage-over-time effects this tick. Fractional for
    /// real-time ticks; the caller accumulates.
    pub damage: f32,
    pub expired: Vec<StatusEffectKind>,
}

pub fn has_effect(effects: &StatusEffects, kind: StatusEffectKind) -> bool {
    effects.has(kind)
}

/// Applies `kind` for `duration` (seconds or turns depending on
/// `turn_based`). Re-applying refreshes to the longer duration.
///
/// Returns false when the collection is full.
pub fn apply_effect(
    effects: &mut StatusEffects,
    kind: StatusEffectKind,
    duration: f32,
    turn_based: bool,
    source: &str,
) -> bool {
    if duration <= 0.0 {
        return false;
    }
    let applied = effects.insert(StatusEffect {
        kind,
        remaining: duration,
        turn_based,
        source: source.to_owned(),
    });
    if !applied {
        tracing::warn!(%kind, source, "status effect dropped, collection full");
    }
    applied
}

pub fn remove_effect(effects: &mut StatusEffects, kind: StatusEffectKind) {
    effects.remove(kind);
}

/// Combined movement-speed multiplier of every active effect.
pub fn speed_modifier(effects: &StatusEffects) -> f32 {
    effects
        .iter()
        .filter(|e| e.remaining > 0.0)
        .map(|e| match e.kind {
            StatusEffectKind::Slowed => 0.5,
            StatusEffectKind::Hasted => 1.5,
            StatusEffectKind::Rooted | StatusEffectKind::Stunned => 0.0,
            StatusEffectKind::Frightened => 1.2,
            _ => 1.0,
        })
        .product()
}

/// Damage per unit of time (second or turn) dealt by one effect kind.
pub const fn dot_rate(kind: StatusEffectKind) -> f32 {
    match kind {
        StatusEffectKind::Poisoned => 2.0,
        StatusEffectKind::Burning => 3.0,
        StatusEffectKind::Bleeding => 1.0,
        _ => 0.0,
    }
}

/// Total damage per unit of time of every active effect.
pub fn damage_over_time(effects: &StatusEffects) -> f32 {
    effects
        .iter()
        .filter(|e| e.remaining > 0.0)
        .map(|e| dot_rate(e.kind))
        .sum()
}

/// Whether the holder can take actions at all.
pub fn can_act(effects: &StatusEffects) -> bool {
    !effects.has(StatusEffectKind::Stunned)
}

/// Whether the holder can leave its tile.
pub fn can_move(effects: &StatusEffects) -> bool {
    can_act(effects) && !effects.has(StatusEffectKind::Rooted)
}

/// Advances every effect on the clock selected by `mode`, collecting
/// damage over time and dropping expired effects.
pub fn tick(effects: &mut StatusEffects, mode: TickMode) -> StatusTick {
    let mut damage = 0.0;
    for effect in effects.iter_mut() {
        let step = match mode {
            TickMode::RealTime(dt) if !effect.turn_based => dt.max(0.0),
            TickMode::TurnBased if effect.turn_based => 1.0,
            _ => continue,
        };
        // A dying effect only deals damage for the time it had left.
        damage += dot_rate(effect.kind) * step.min(effect.remaining);
        effect.remaining -= step;
    }

    let expired = effects.remove_expired();
    StatusTick { damage, expired }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_keeps_longer_duration() {
        let mut effects = StatusEffects::empty();
        apply_effect(&mut effects, StatusEffectKind::Slowed, 3.0, true, "web");
        apply_effect(&mut effects, StatusEffectKind::Slowed, 1.0, true, "web");
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.get(StatusEffectKind::Slowed).map(|e| e.remaining), Some(3.0));
    }

    #[test]
    fn speed_modifiers_multiply() {
        let mut effects = StatusEffects::empty();
        assert_eq!(speed_modifier(&effects), 1.0);
        apply_effect(&mut effects, StatusEffectKind::Slowed, 2.0, false, "test");
        apply_effect(&mut effects, StatusEffectKind::Hasted, 2.0, false, "test");
        assert!((speed_modifier(&effects) - 0.75).abs() < 1e-6);
        apply_effect(&mut effects, StatusEffectKind::Rooted, 2.0, false, "test");
        assert_eq!(speed_modifier(&effects), 0.0);
        assert!(!can_move(&effects));
        assert!(can_act(&effects));
    }

    #[test]
    fn turn_tick_ignores_real_time_effects() {
        let mut effects = StatusEffects::empty();
        apply_effect(&mut effects, StatusEffectKind::Poisoned, 2.0, true, "bite");
        apply_effect(&mut effects, StatusEffectKind::Burning, 5.0, false, "fire");

        let first = tick(&mut effects, TickMode::TurnBased);
        assert_eq!(first.damage, 2.0);
        assert!(first.expired.is_empty());

        let second = tick(&mut effects, TickMode::TurnBased);
        assert_eq!(second.damage, 2.0);
        assert_eq!(second.expired, vec![StatusEffectKind::Poisoned]);
        assert!(has_effect(&effects, StatusEffectKind::Burning));
    }

    #[test]
    fn real_time_tick_prorates_last_fraction() {
        let mut effects = StatusEffects::empty();
        apply_effect(&mut effects, StatusEffectKind::Bleeding, 0.5, false, "claw");
        let result = tick(&mut effects, TickMode::RealTime(2.0));
        assert!((result.damage - 0.5).abs() < 1e-6);
        assert_eq!(result.expired, vec![StatusEffectKind::Bleeding]);
        assert!(effects.is_empty());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut effects = StatusEffects::empty();
        assert!(!apply_effect(&mut effects, StatusEffectKind::Stunned, 0.0, true, "x"));
        assert!(!has_effect(&effects, StatusEffectKind::Stunned));
    }
}
