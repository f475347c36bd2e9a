//! Reference player implementing [`CombatTarget`].
//!
//! Flat armor, a dodge bonus, and four body parts. A head hit is critical
//! and deals extra damage; a critical that kills is reported as instant
//! death.

use rand::Rng;

use creature_core::status::{self, TickMode};
use creature_core::{
    CombatTarget, CreatureRng, DamageReport, DamageType, Position, StatusEffectKind, StatusEffects,
};

/// Where a hit landed, with its roll weight out of 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BodyPart {
    Head,
    Torso,
    Arms,
    Legs,
}

impl BodyPart {
    const WEIGHTS: [(BodyPart, u32); 4] = [
        (BodyPart::Head, 10),
        (BodyPart::Torso, 45),
        (BodyPart::Arms, 25),
        (BodyPart::Legs, 20),
    ];

    fn roll(rng: &mut impl Rng) -> Self {
        let mut roll = rng.gen_range(0..100);
        for (part, weight) in Self::WEIGHTS {
            if roll < weight {
                return part;
            }
            roll -= weight;
        }
        BodyPart::Torso
    }
}

/// Damage multiplier for head hits.
pub const HEAD_MULTIPLIER: f32 = 1.5;

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    /// Flat reduction applied to every non-true hit.
    pub armor: u32,
    /// Subtracted from incoming hit chance.
    pub evasion: f32,
    pub status_effects: StatusEffects,
    rng: CreatureRng,
}

impl Player {
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_EVASION: f32 = 0.05;

    pub fn new(name: impl Into<String>, position: Position, rng: CreatureRng) -> Self {
        Self {
            name: name.into(),
            position,
            health: Self::DEFAULT_MAX_HEALTH,
            max_health: Self::DEFAULT_MAX_HEALTH,
            armor: 0,
            evasion: Self::DEFAULT_EVASION,
            status_effects: StatusEffects::empty(),
            rng,
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.max_health = health.max(1);
        self.health = self.max_health;
        self
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_evasion(mut self, evasion: f32) -> Self {
        self.evasion = evasion.clamp(0.0, 1.0);
        self
    }

    /// Advances turn-based statuses by one turn and applies their damage.
    /// Returns the damage taken.
    pub fn start_turn(&mut self) -> u32 {
        let tick = status::tick(&mut self.status_effects, TickMode::TurnBased);
        let damage = tick.damage.round() as u32;
        if damage > 0 && self.is_alive() {
            self.health = self.health.saturating_sub(damage);
            tracing::debug!(player = %self.name, damage, health = self.health, "status damage");
        }
        damage
    }

    pub fn can_act(&self) -> bool {
        self.is_alive() && status::can_act(&self.status_effects)
    }
}

impl CombatTarget for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn take_damage(&mut self, amount: u32, damage_type: DamageType) -> DamageReport {
        if !self.is_alive() {
            return DamageReport::default();
        }

        let part = BodyPart::roll(&mut self.rng);
        let critical = part == BodyPart::Head;
        let raw = if critical {
            (amount as f32 * HEAD_MULTIPLIER).round() as u32
        } else {
            amount
        };
        let absorbed = if damage_type == DamageType::True {
            0
        } else {
            self.armor.min(raw)
        };
        let dealt = (raw - absorbed).min(self.health);
        self.health -= dealt;
        let killed = self.health == 0;

        tracing::debug!(
            player = %self.name,
            dealt,
            absorbed,
            body_part = %part,
            critical,
            "player hit"
        );
        DamageReport {
            amount: dealt,
            absorbed,
            body_part: Some(part.to_string()),
            critical,
            instant_death: critical && killed,
        }
    }

    fn apply_status(
        &mut self,
        kind: StatusEffectKind,
        duration: f32,
        turn_based: bool,
        source: &str,
    ) {
        status::apply_effect(&mut self.status_effects, kind, duration, turn_based, source);
    }

    fn has_status(&self, kind: StatusEffectKind) -> bool {
        status::has_effect(&self.status_effects, kind)
    }

    fn remove_status(&mut self, kind: StatusEffectKind) {
        status::remove_effect(&mut self.status_effects, kind);
    }

    fn mobility_modifier(&self) -> f32 {
        if self.has_status(StatusEffectKind::Stunned) || self.has_status(StatusEffectKind::Rooted)
        {
            0.0
        } else if self.has_status(StatusEffectKind::Slowed) {
            self.evasion / 2.0
        } else {
            self.evasion
        }
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }
}
