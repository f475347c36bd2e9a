//! Identity and behavioral profile of a creature.
//!
//! Everything here is fixed at spawn time from the archetype table except the
//! lifecycle [`CreatureState`], the health counter, and the ability cooldown.

use bitflags::bitflags;

use crate::ability::AbilityKind;

/// Archetype tag. One row in the archetype table per variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CreatureKind {
    Rat,
    Wolf,
    Goblin,
    GoblinArcher,
    Skeleton,
    GiantSpider,
    Bandit,
    Slime,
    /// Spawned by a splitting slime.
    Slimeling,
    Shade,
    Troll,
    FireBeetle,
    Cultist,
    Deer,
    Rabbit,
    Bear,
}

/// How a creature reacts to the player outside of combat.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorKind {
    /// Chases the player on sight.
    #[default]
    Aggressive,
    /// Ignores the player until provoked.
    Passive,
    /// Flees when provoked.
    Cowardly,
    /// Chases only when the player comes close.
    Territorial,
}

/// Governs retreat probability and movement strategy in combat.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Personality {
    Cautious,
    #[default]
    Balanced,
    Aggressive,
    Tactical,
    Cowardly,
    Berserk,
}

impl Personality {
    /// Chance of retreating once health drops below the retreat threshold.
    pub const fn retreat_probability(self) -> f32 {
        match self {
            Self::Cowardly => 0.8,
            Self::Cautious => 0.5,
            Self::Tactical => 0.3,
            Self::Balanced => 0.15,
            Self::Aggressive => 0.05,
            Self::Berserk => 0.0,
        }
    }

    /// Aggressive and Berserk creatures never fall back to a retreat position
    /// in the movement phase.
    pub const fn holds_ground(self) -> bool {
        matches!(self, Self::Aggressive | Self::Berserk)
    }
}

/// Lifecycle state. Orthogonal to the combat-zone flag.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CreatureState {
    #[default]
    Idle,
    Patrolling,
    Chasing,
    Fleeing,
    Stunned,
    /// Terminal.
    Dead,
}

bitflags! {
    /// Tactical preferences read by the turn engine.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TacticalFlags: u8 {
        const PREFERS_FLANKING = 1 << 0;
        const SEEKS_COVER = 1 << 1;
        const FOCUSES_WEAK_TARGETS = 1 << 2;
    }
}

/// Read-only combat temperament.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TacticalTraits {
    /// Health fraction at or below which the creature considers retreating.
    pub retreat_threshold: f32,
    pub aggression_level: f32,
    pub flags: TacticalFlags,
}

impl TacticalTraits {
    pub fn prefers_flanking(&self) -> bool {
        self.flags.contains(TacticalFlags::PREFERS_FLANKING)
    }
}

/// Stat block derived from the archetype table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureStats {
    pub max_health: u32,
    /// Always within `0..=max_health`. Zero means dead.
    pub current_health: u32,
    /// World units per second.
    pub speed: f32,
    pub damage: u32,
    /// Base hit probability in `0..=1`.
    pub accuracy: f32,
    /// Tiles.
    pub sight_range: u32,
    /// Tiles. Anything above 1 is a ranged attacker.
    pub attack_range: u32,
}

impl CreatureStats {
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }

    pub fn is_ranged(&self) -> bool {
        self.attack_range > 1
    }

    /// Heals up to max health and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health);
        self.current_health - before
    }
}

/// Ability slots and their shared cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlots {
    pub primary: Option<AbilityKind>,
    pub secondary: Option<AbilityKind>,
    /// Turns remaining. Never negative.
    pub cooldown: u32,
    pub cooldown_max: u32,
    /// Probability of choosing the ability over a plain attack.
    pub chance: f32,
}

impl AbilitySlots {
    pub fn iter(&self) -> impl Iterator<Item = AbilityKind> + '_ {
        self.primary.into_iter().chain(self.secondary)
    }

    pub fn has(&self, ability: AbilityKind) -> bool {
        self.iter().any(|a| a == ability)
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}
