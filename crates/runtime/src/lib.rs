//! Encounter orchestration around the creature decision engine.
//!
//! `creature-core` decides what one creature does; this crate owns the
//! battlefield it does it on. It supplies reference implementations of the
//! engine's collaborators and runs them together:
//!
//! - [`map`]: ASCII-drawn terrain implementing `GridOracle`
//! - [`pathfinding`]: eight-connected A* implementing `PathOracle`
//! - [`player`]: armor and body-part model implementing `CombatTarget`
//! - [`encounter`]: roster, exploration ticks, combat rounds, spawn,
//!   knockback and death follow-up, JSON reports
//! - [`scenario`]: RON scenario files that build an [`Encounter`]
pub mod encounter;
pub mod error;
pub mod map;
pub mod pathfinding;
pub mod player;
pub mod scenario;

pub use encounter::{
    CreatureSummary, Encounter, EncounterEvent, EncounterReport, LootDrop, PlayerSummary,
    RoundSummary,
};
pub use error::{Result, RuntimeError};
pub use map::GridMap;
pub use pathfinding::AStarPathfinder;
pub use player::{BodyPart, Player};
pub use scenario::{CreaturePlacement, PlayerSetup, Scenario};
