//! Static ability table.
//!
//! Each [`AbilityKind`] maps to one [`AbilityProfile`] row. The resolver only
//! looks at the row's [`AbilityEffect`] tag to pick the function that applies
//! it, so a new ability that reuses an existing effect is a table entry.

use crate::combat::DamageType;
use crate::state::StatusEffectKind;

/// Abilities a creature can carry in its primary or secondary slot.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    PowerStrike,
    PoisonBite,
    Web,
    Charge,
    MindBlast,
    Ambush,
    Split,
    Regenerate,
    Explode,
}

/// How an ability's result is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityEffect {
    /// Damage (possibly zero) plus the optional status rider.
    Strike,
    /// Strike that also shoves the target away from the user.
    Knockback { distance: u32 },
    /// Asks the orchestrator to place a new creature next to the user.
    Spawn,
    /// Never activated; read by the turn engine (regeneration).
    Passive,
    /// Fires once from `on_death`.
    DeathBurst { radius: u32 },
}

/// Status effect an ability applies on a successful hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusRider {
    pub kind: StatusEffectKind,
    pub duration: f32,
    pub turn_based: bool,
}

/// One row of the ability table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityProfile {
    pub name: &'static str,
    /// Maximum Chebyshev distance to the target. Zero means self-centred.
    pub range: u32,
    /// Added to the user's accuracy before distance modifiers.
    pub accuracy_bonus: f32,
    /// Multiplies the user's base damage. Zero for pure control abilities.
    pub damage_multiplier: f32,
    pub damage_type: DamageType,
    pub status: Option<StatusRider>,
    pub effect: AbilityEffect,
    /// `Some` marks a stealth ability: the multiplier applies while the user
    /// is stealthed, and using it always reveals the user.
    pub stealth_multiplier: Option<f32>,
}

const PROFILES: [AbilityProfile; 9] = [
    AbilityProfile {
        name: "Power Strike",
        range: 1,
        accuracy_bonus: 0.0,
        damage_multiplier: 1.5,
        damage_type: DamageType::Physical,
        status: None,
        effect: AbilityEffect::Strike,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Poison Bite",
        range: 1,
        accuracy_bonus: 0.05,
        damage_multiplier: 1.0,
        damage_type: DamageType::Poison,
        status: Some(StatusRider {
            kind: StatusEffectKind::Poisoned,
            duration: 3.0,
            turn_based: true,
        }),
        effect: AbilityEffect::Strike,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Web",
        range: 4,
        accuracy_bonus: 0.1,
        damage_multiplier: 0.0,
        damage_type: DamageType::Physical,
        status: Some(StatusRider {
            kind: StatusEffectKind::Slowed,
            duration: 2.0,
            turn_based: true,
        }),
        effect: AbilityEffect::Strike,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Charge",
        range: 1,
        accuracy_bonus: 0.0,
        damage_multiplier: 1.2,
        damage_type: DamageType::Physical,
        status: None,
        effect: AbilityEffect::Knockback { distance: 2 },
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Mind Blast",
        range: 5,
        accuracy_bonus: 0.1,
        damage_multiplier: 1.2,
        damage_type: DamageType::Psychic,
        status: Some(StatusRider {
            kind: StatusEffectKind::Stunned,
            duration: 1.0,
            turn_based: true,
        }),
        effect: AbilityEffect::Strike,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Ambush",
        range: 1,
        accuracy_bonus: 0.15,
        damage_multiplier: 1.5,
        damage_type: DamageType::Physical,
        status: Some(StatusRider {
            kind: StatusEffectKind::Bleeding,
            duration: 2.0,
            turn_based: true,
        }),
        effect: AbilityEffect::Strike,
        stealth_multiplier: Some(2.0),
    },
    AbilityProfile {
        name: "Split",
        range: 0,
        accuracy_bonus: 0.0,
        damage_multiplier: 0.0,
        damage_type: DamageType::Physical,
        status: None,
        effect: AbilityEffect::Spawn,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Regenerate",
        range: 0,
        accuracy_bonus: 0.0,
        damage_multiplier: 0.0,
        damage_type: DamageType::Physical,
        status: None,
        effect: AbilityEffect::Passive,
        stealth_multiplier: None,
    },
    AbilityProfile {
        name: "Explode",
        range: 0,
        accuracy_bonus: 0.0,
        damage_multiplier: 3.0,
        damage_type: DamageType::Fire,
        status: Some(StatusRider {
            kind: StatusEffectKind::Burning,
            duration: 2.0,
            turn_based: true,
        }),
        effect: AbilityEffect::DeathBurst { radius: 1 },
        stealth_multiplier: None,
    },
];

impl AbilityKind {
    pub fn profile(self) -> &'static AbilityProfile {
        &PROFILES[self as usize]
    }

    /// True for abilities the action phase may pick (not spawn, passive, or
    /// death-triggered).
    pub fn is_combat_action(self) -> bool {
        matches!(
            self.profile().effect,
            AbilityEffect::Strike | AbilityEffect::Knockback { .. }
        )
    }

    pub fn is_spawn(self) -> bool {
        matches!(self.profile().effect, AbilityEffect::Spawn)
    }

    pub fn is_stealth(self) -> bool {
        self.profile().stealth_multiplier.is_some()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn table_rows_line_up_with_kinds() {
        let names: Vec<_> = AbilityKind::iter().map(|k| k.profile().name).collect();
        assert_eq!(names.len(), PROFILES.len());
        assert_eq!(AbilityKind::Ambush.profile().name, "Ambush");
        assert_eq!(AbilityKind::Explode.profile().name, "Explode");
    }

    #[test]
    fn only_strikes_are_combat_actions() {
        assert!(AbilityKind::PowerStrike.is_combat_action());
        assert!(AbilityKind::Charge.is_combat_action());
        assert!(!AbilityKind::Split.is_combat_action());
        assert!(!AbilityKind::Regenerate.is_combat_action());
        assert!(!AbilityKind::Explode.is_combat_action());
    }

    #[test]
    fn names_parse_from_snake_case() {
        assert_eq!("mind_blast".parse::<AbilityKind>().ok(), Some(AbilityKind::MindBlast));
    }
}
