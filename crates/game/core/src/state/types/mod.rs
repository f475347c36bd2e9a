mod common;
mod status;

pub use common::{Position, ResourcePool, WorldPos};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
