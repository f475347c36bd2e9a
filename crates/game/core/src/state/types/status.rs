//! Status effect collection owned by a creature (or the player).
//!
//! Status effects are temporary conditions that modify movement speed, deal
//! damage over time, or restrict actions. The collection only stores them;
//! every rule that reads or advances effects lives in [`crate::status`], which
//! takes the collection by mutable reference per call.
//!
//! # Duration
//!
//! Each effect carries its own clock. Real-time effects count down seconds
//! during exploration ticks, turn-based effects count down whole turns at the
//! start of a combat turn. An effect is removed once `remaining <= 0`.

use arrayvec::ArrayVec;

use crate::config::AiConfig;

/// Active status effects on a creature or the player.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { AiConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Seconds (real-time) or turns (turn-based) left.
    pub remaining: f32,
    /// Which clock advances this effect.
    pub turn_based: bool,
    /// Free-form tag naming what applied the effect (ability, hazard, ...).
    pub source: String,
}

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectKind {
    // ========================================================================
    // Crowd Control
    // ========================================================================
    /// Cannot act or move.
    Stunned,

    /// Cannot move.
    Rooted,

    /// Movement speed halved.
    Slowed,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Increased movement speed.
    Hasted,

    // ========================================================================
    // Damage over time
    // ========================================================================
    Poisoned,
    Burning,
    Bleeding,

    // ========================================================================
    // Special States
    // ========================================================================
    /// Outgoing damage reduced.
    Weakened,

    /// Moves faster while fleeing, never holds ground.
    Frightened,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.remaining > 0.0)
    }

    /// Looks up the active entry for `kind`.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.remaining > 0.0)
    }

    /// Inserts an effect. An existing effect of the same kind is refreshed to
    /// the longer of the two durations instead of stacking.
    ///
    /// Returns false when the collection is full and the effect was dropped.
    pub fn insert(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            if effect.remaining > existing.remaining {
                existing.remaining = effect.remaining;
                existing.turn_based = effect.turn_based;
                existing.source = effect.source;
            }
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Mutable access for the status service's clock functions.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Drops every effect whose clock has run out, returning their kinds.
    pub(crate) fn remove_expired(&mut self) -> Vec<StatusEffectKind> {
        let expired = self
            .effects
            .iter()
            .filter(|e| e.remaining <= 0.0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.remaining > 0.0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
