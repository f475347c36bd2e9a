//! Tactical decision engine for non-player creatures.
//!
//! `creature-core` decides, for every hostile or neutral creature, where to
//! move, whom to attack, when to use an ability, when to retreat, and when
//! to hide. It is pure and synchronous: grid, pathfinding, archetype tables,
//! and the player all come in through traits in [`env`] and [`target`], and
//! every entry point returns the [`CombatEvent`]s it produced instead of
//! calling back into the game.
//!
//! Entry points on [`Creature`]:
//!
//! - `update(dt, &ExplorationContext)` for out-of-combat ticks
//! - `start_turn()` then `take_turn(&mut TurnContext)` for combat rounds
//! - `take_damage`, `provoke`, `on_death` for things that happen to it
pub mod ability;
pub mod combat;
pub mod config;
pub mod creature;
pub mod env;
pub mod error;
pub mod event;
pub mod exploration;
pub mod loot;
pub mod movement;
pub mod spatial;
pub mod state;
pub mod status;
pub mod tactics;
pub mod target;

pub use ability::{AbilityKind, AbilityPayload, AbilityProfile, AbilityResult};
pub use combat::{AttackOutcome, DamageReport, DamageTaken, DamageType, hit_chance};
pub use config::AiConfig;
pub use creature::{
    AbilitySlots, BehaviorKind, Creature, CreatureFactory, CreatureKind, CreatureState,
    CreatureStats, DeathEffect, DeathReport, Personality, TacticalFlags, TacticalTraits,
};
pub use env::{
    ArchetypeOracle, CreatureRng, CreatureTemplate, GridOracle, ItemDefinition, ItemOracle,
    LootEntry, LootTableOracle, MapDimensions, OracleError, PathOracle, Rarity, derive_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::CombatEvent;
pub use exploration::ExplorationContext;
pub use loot::{ItemQuality, ItemStack, LootGenerator};
pub use movement::StepOutcome;
pub use spatial::Occupancy;
pub use state::{
    Position, ResourcePool, StatusEffect, StatusEffectKind, StatusEffects, WorldPos,
};
pub use status::{StatusTick, TickMode};
pub use tactics::{TurnContext, TurnReport};
pub use target::CombatTarget;
