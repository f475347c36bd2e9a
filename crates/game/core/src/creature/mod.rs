//! Creature record, profile types, factory, and lifecycle.
//!
//! A [`Creature`] is built once by [`CreatureFactory::spawn`] from the
//! archetype table and then driven by two entry points: exploration ticks
//! (`update`) outside of combat and `start_turn`/`take_turn` inside it.
//! Death is terminal: once `state` is `Dead` no entry point changes it again,
//! and [`Creature::on_death`] hands out loot and death effects exactly once.

mod lifecycle;
mod profile;
mod record;

pub use lifecycle::{DeathEffect, DeathReport};
pub use profile::{
    AbilitySlots, BehaviorKind, CreatureKind, CreatureState, CreatureStats, Personality,
    TacticalFlags, TacticalTraits,
};
pub use record::{Creature, CreatureFactory};
