//! Plain state types shared by every engine component.
//!
//! Grid coordinates, world coordinates, spendable pools, and the status
//! effect collection. Nothing here makes decisions.
pub mod types;

pub use types::{
    Position, ResourcePool, StatusEffect, StatusEffectKind, StatusEffects, WorldPos,
};
