//! Data-driven creature content and loaders.
//!
//! This crate houses static creature content and provides loaders for
//! RON/TOML data files:
//! - Archetype templates, one per `CreatureKind` (RON)
//! - Item catalog (RON)
//! - Per-kind drop tables (RON)
//! - Engine tuning (`AiConfig`, TOML)
//!
//! Everything ends up in a validated, immutable [`CreatureCatalog`] that
//! implements the core's archetype, item and loot-table oracles. Content is
//! read by the engine and never mutated by it.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, CreatureCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult, LootLoader, builtin,
};
