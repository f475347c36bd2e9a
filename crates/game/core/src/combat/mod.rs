//! Combat formulas.
//!
//! Pure functions for resolving attacks. Randomness comes in through a
//! caller-supplied `rand::Rng` (each creature passes its own generator).
//!
//! # Core Functions
//!
//! - `hit_chance`: accuracy × ranged distance curve − dodge, clamped
//! - `roll_hit`: uniform roll against a chance
//! - `roll_damage`: base damage with variance and the weakened penalty

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{DamageType, roll_damage};
pub use hit::{
    MAX_HIT_CHANCE, MIN_HIT_CHANCE, distance_multiplier, hit_chance, optimal_distance, roll_hit,
};
pub use result::{AttackOutcome, DamageReport, DamageTaken};
