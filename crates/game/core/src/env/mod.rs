//! Traits describing read-only world data.
//!
//! Oracles expose grid geometry, pathfinding, archetype templates, the item
//! catalog, and drop tables. The engine only ever borrows them; concrete
//! implementations live in `creature-content` (catalogs) and
//! `creature-runtime` (grid and A*).
mod archetypes;
mod error;
mod items;
mod map;
mod path;
mod rng;

pub use archetypes::{ArchetypeOracle, CreatureTemplate, CreatureTemplateBuilder};
pub use error::OracleError;
pub use items::{ItemDefinition, ItemOracle, LootEntry, LootTableOracle, Rarity};
pub use map::{GridOracle, MapDimensions};
pub use path::PathOracle;
pub use rng::{CreatureRng, derive_seed};
