//! Creature abilities.
//!
//! [`profile`] holds the static table, [`resolve`](resolve::resolve) applies
//! one activation. Results carry a payload for effects the engine cannot
//! apply on its own (knockback needs the orchestrator's occupancy view,
//! spawns need a new roster entry).

pub mod profile;
mod resolve;

pub use profile::{AbilityEffect, AbilityKind, AbilityProfile, StatusRider};
pub use resolve::resolve;

use crate::creature::CreatureKind;
use crate::state::Position;

/// Follow-up work an ability hands back to the orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityPayload {
    #[default]
    None,
    /// Push the target `distance` tiles along `direction` (unit steps per axis).
    Knockback {
        direction: (i32, i32),
        distance: u32,
    },
    /// Place a `kind` on the free tile nearest `position`.
    Spawn { position: Position, kind: CreatureKind },
}

/// Outcome of one ability activation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityResult {
    pub ability: AbilityKind,
    pub success: bool,
    /// Damage that reached the target's health.
    pub damage: u32,
    pub message: String,
    pub payload: AbilityPayload,
}

impl AbilityResult {
    pub fn failure(ability: AbilityKind, message: impl Into<String>) -> Self {
        Self {
            ability,
            success: false,
            damage: 0,
            message: message.into(),
            payload: AbilityPayload::None,
        }
    }
}
