//! Archetype templates and oracle interface.
//!
//! A [`CreatureTemplate`] holds every per-kind number the engine needs to
//! build a creature: stat block, behavior, personality, ability slots, and
//! tactical traits. Templates deserialize straight from RON rows, so new
//! archetypes are data, not code.
//!
//! The [`ArchetypeOracle`] trait lets catalogs provide templates by
//! [`CreatureKind`].

use crate::ability::AbilityKind;
use crate::creature::{BehaviorKind, CreatureKind, Personality, TacticalFlags};

/// Per-kind template used by `CreatureFactory::spawn`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CreatureTemplate {
    pub name: String,
    pub behavior: BehaviorKind,
    pub personality: Personality,

    pub max_health: u32,
    /// World units per second.
    pub speed: f32,
    pub damage: u32,
    pub accuracy: f32,
    pub sight_range: u32,
    pub attack_range: u32,

    pub max_action_points: u32,
    pub max_movement_points: u32,

    pub primary_ability: Option<AbilityKind>,
    pub secondary_ability: Option<AbilityKind>,
    pub ability_cooldown: u32,
    pub ability_chance: f32,

    pub retreat_threshold: f32,
    pub aggression_level: f32,
    pub tactical_flags: TacticalFlags,

    /// How many children a spawner may create over its lifetime.
    pub max_spawns: u32,
    /// Kind produced by a spawn ability.
    pub spawn_kind: Option<CreatureKind>,
    pub starts_stealthed: bool,
}

impl Default for CreatureTemplate {
    fn default() -> Self {
        Self {
            name: String::from("creature"),
            behavior: BehaviorKind::Aggressive,
            personality: Personality::Balanced,
            max_health: 10,
            speed: 64.0,
            damage: 2,
            accuracy: 0.7,
            sight_range: 6,
            attack_range: 1,
            max_action_points: 1,
            max_movement_points: 3,
            primary_ability: None,
            secondary_ability: None,
            ability_cooldown: 3,
            ability_chance: 0.3,
            retreat_threshold: 0.25,
            aggression_level: 0.5,
            tactical_flags: TacticalFlags::empty(),
            max_spawns: 0,
            spawn_kind: None,
            starts_stealthed: false,
        }
    }
}

impl CreatureTemplate {
    /// Create a builder for constructing templates.
    pub fn builder(name: impl Into<String>) -> CreatureTemplateBuilder {
        CreatureTemplateBuilder {
            template: Self {
                name: name.into(),
                ..Self::default()
            },
        }
    }

    /// True when one of the slots carries `ability`.
    pub fn has_ability(&self, ability: AbilityKind) -> bool {
        self.primary_ability == Some(ability) || self.secondary_ability == Some(ability)
    }
}

/// Builder for constructing creature templates.
#[derive(Clone, Debug)]
pub struct CreatureTemplateBuilder {
    template: CreatureTemplate,
}

impl CreatureTemplateBuilder {
    pub fn behavior(mut self, behavior: BehaviorKind) -> Self {
        self.template.behavior = behavior;
        self
    }

    pub fn personality(mut self, personality: Personality) -> Self {
        self.template.personality = personality;
        self
    }

    /// Set health, damage and accuracy in one go.
    pub fn combat(mut self, max_health: u32, damage: u32, accuracy: f32) -> Self {
        self.template.max_health = max_health;
        self.template.damage = damage;
        self.template.accuracy = accuracy;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.template.speed = speed;
        self
    }

    pub fn ranges(mut self, sight_range: u32, attack_range: u32) -> Self {
        self.template.sight_range = sight_range;
        self.template.attack_range = attack_range;
        self
    }

    pub fn points(mut self, action_points: u32, movement_points: u32) -> Self {
        self.template.max_action_points = action_points;
        self.template.max_movement_points = movement_points;
        self
    }

    pub fn abilities(
        mut self,
        primary: Option<AbilityKind>,
        secondary: Option<AbilityKind>,
    ) -> Self {
        self.template.primary_ability = primary;
        self.template.secondary_ability = secondary;
        self
    }

    pub fn ability_timing(mut self, cooldown: u32, chance: f32) -> Self {
        self.template.ability_cooldown = cooldown;
        self.template.ability_chance = chance;
        self
    }

    pub fn retreat_threshold(mut self, threshold: f32) -> Self {
        self.template.retreat_threshold = threshold;
        self
    }

    pub fn aggression(mut self, level: f32) -> Self {
        self.template.aggression_level = level;
        self
    }

    pub fn flags(mut self, flags: TacticalFlags) -> Self {
        self.template.tactical_flags = flags;
        self
    }

    pub fn spawns(mut self, kind: CreatureKind, max_spawns: u32) -> Self {
        self.template.spawn_kind = Some(kind);
        self.template.max_spawns = max_spawns;
        self
    }

    pub fn stealthed(mut self, starts_stealthed: bool) -> Self {
        self.template.starts_stealthed = starts_stealthed;
        self
    }

    pub fn build(self) -> CreatureTemplate {
        self.template
    }
}

/// Supplies archetype templates by creature kind.
pub trait ArchetypeOracle {
    fn template(&self, kind: CreatureKind) -> Option<&CreatureTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let template = CreatureTemplate::builder("Goblin Archer")
            .combat(12, 3, 0.75)
            .ranges(8, 6)
            .personality(Personality::Tactical)
            .abilities(Some(AbilityKind::PowerStrike), None)
            .build();

        assert_eq!(template.name, "Goblin Archer");
        assert_eq!(template.attack_range, 6);
        assert_eq!(template.max_movement_points, 3);
        assert!(template.has_ability(AbilityKind::PowerStrike));
        assert!(!template.has_ability(AbilityKind::Split));
    }
}
