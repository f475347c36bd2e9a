//! Content pack compiled into the crate.
//!
//! The same files a data directory would hold, embedded with
//! `include_str!` so demos and tests work without touching the filesystem.

use creature_core::AiConfig;

use crate::catalog::CreatureCatalog;
use crate::loaders::{ArchetypeLoader, ConfigLoader, ItemLoader, LoadResult, LootLoader};

pub const ARCHETYPES_RON: &str = include_str!("../../data/archetypes.ron");
pub const ITEMS_RON: &str = include_str!("../../data/items.ron");
pub const LOOT_RON: &str = include_str!("../../data/loot.ron");
pub const CONFIG_TOML: &str = include_str!("../../data/config.toml");

/// Parses and validates the embedded catalog.
pub fn catalog() -> LoadResult<CreatureCatalog> {
    let mut catalog = CreatureCatalog::new();
    for (kind, template) in ArchetypeLoader::parse(ARCHETYPES_RON)? {
        catalog.insert_archetype(kind, template);
    }
    for item in ItemLoader::parse(ITEMS_RON)? {
        catalog.insert_item(item);
    }
    for (kind, entries) in LootLoader::parse(LOOT_RON)? {
        catalog.insert_loot(kind, entries);
    }

    catalog
        .validate()
        .map_err(|e| anyhow::anyhow!("Built-in content is invalid: {}", e))?;
    Ok(catalog)
}

/// Parses the embedded engine configuration.
pub fn config() -> LoadResult<AiConfig> {
    ConfigLoader::parse(CONFIG_TOML)
}

#[cfg(test)]
mod tests {
    use creature_core::{
        ArchetypeOracle, CreatureKind, ItemOracle, LootTableOracle, Rarity,
    };
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn builtin_pack_loads_and_validates() {
        let catalog = catalog().expect("built-in pack");
        assert_eq!(catalog.archetype_count(), CreatureKind::iter().count());
        for kind in CreatureKind::iter() {
            assert!(catalog.template(kind).is_some(), "{kind} missing");
        }
    }

    #[test]
    fn builtin_drop_tables_only_name_known_items() {
        let catalog = catalog().expect("built-in pack");
        for kind in CreatureKind::iter() {
            for entry in catalog.drop_table(kind) {
                assert!(
                    catalog.definition(&entry.item_id).is_some(),
                    "{kind} drops unknown item {}",
                    entry.item_id
                );
            }
        }
        assert!(!catalog.by_rarity(Rarity::Uncommon).is_empty());
    }

    #[test]
    fn builtin_config_matches_defaults() {
        assert_eq!(config().expect("built-in config"), AiConfig::default());
    }

    #[test]
    fn spawners_spawn_known_kinds() {
        let catalog = catalog().expect("built-in pack");
        let slime = catalog.template(CreatureKind::Slime).expect("slime row");
        assert_eq!(slime.spawn_kind, Some(CreatureKind::Slimeling));
        assert!(catalog.template(CreatureKind::Slimeling).is_some());
    }
}
