//! Observable combat events.
//!
//! Every engine entry point returns the events it produced, in order. The
//! orchestrator turns them into floating text, log lines, or follow-up work
//! (spawns, knockback, loot).

use crate::ability::AbilityResult;
use crate::combat::{AttackOutcome, DamageType};
use crate::creature::CreatureState;
use crate::state::{Position, StatusEffectKind};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// A plain attack or ability connected with the target.
    AttackHit {
        target: Position,
        amount: u32,
        outcome: AttackOutcome,
        instant_death: bool,
    },
    AttackMissed {
        target: Position,
        chance: f32,
    },
    /// An ability was attempted. `result.success` tells whether it landed.
    AbilityUsed {
        result: AbilityResult,
    },
    StatusApplied {
        target: Position,
        kind: StatusEffectKind,
        duration: f32,
    },
    StatusExpired {
        kind: StatusEffectKind,
    },
    Healed {
        at: Position,
        amount: u32,
    },
    Moved {
        from: Position,
        to: Position,
    },
    /// The creature itself lost health.
    Damaged {
        at: Position,
        amount: u32,
        damage_type: DamageType,
    },
    Died {
        at: Position,
    },
    StealthEntered {
        at: Position,
    },
    Revealed {
        at: Position,
    },
    /// The retreat roll succeeded and the turn was spent falling back.
    Retreated {
        from: Position,
        to: Position,
    },
    StateChanged {
        from: CreatureState,
        to: CreatureState,
    },
}
