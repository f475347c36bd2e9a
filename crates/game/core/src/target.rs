//! Narrow interface to whatever a creature attacks.
//!
//! The player's stat, armor, and body-part systems sit behind this trait.
//! The engine reads a position and a dodge bonus, pushes damage and status
//! effects through it, and forwards the returned flags into events.

use crate::combat::{DamageReport, DamageType};
use crate::state::{Position, StatusEffectKind};

pub trait CombatTarget {
    /// Tile the target currently stands on.
    fn position(&self) -> Position;

    /// Applies incoming damage and reports what happened to it.
    fn take_damage(&mut self, amount: u32, damage_type: DamageType) -> DamageReport;

    /// Applies a status effect for `duration` seconds or turns.
    fn apply_status(
        &mut self,
        kind: StatusEffectKind,
        duration: f32,
        turn_based: bool,
        source: &str,
    );

    fn has_status(&self, kind: StatusEffectKind) -> bool;

    fn remove_status(&mut self, kind: StatusEffectKind);

    /// Dodge bonus subtracted from incoming hit chance.
    fn mobility_modifier(&self) -> f32;

    fn is_alive(&self) -> bool;
}
