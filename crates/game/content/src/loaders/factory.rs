//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use creature_core::{AiConfig, CreatureKind, CreatureTemplate, ItemDefinition, LootEntry};

use crate::catalog::CreatureCatalog;
use crate::loaders::{ArchetypeLoader, ConfigLoader, ItemLoader, LoadResult, LootLoader};

/// Content factory that loads all creature content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── archetypes.ron
/// ├── items.ron
/// └── loot.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    ///
    /// A missing file is not an error; the engine defaults apply.
    pub fn load_config(&self) -> LoadResult<AiConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(AiConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load archetype templates from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<Vec<(CreatureKind, CreatureTemplate)>> {
        let path = self.data_dir.join("archetypes.ron");
        ArchetypeLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load drop tables from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<Vec<(CreatureKind, Vec<LootEntry>)>> {
        let path = self.data_dir.join("loot.ron");
        LootLoader::load(&path)
    }

    /// Loads all three tables and validates the result.
    pub fn load_catalog(&self) -> LoadResult<CreatureCatalog> {
        let mut catalog = CreatureCatalog::new();
        for (kind, template) in self.load_archetypes()? {
            catalog.insert_archetype(kind, template);
        }
        for item in self.load_items()? {
            catalog.insert_item(item);
        }
        for (kind, entries) in self.load_loot()? {
            catalog.insert_loot(kind, entries);
        }

        catalog.validate().map_err(|e| {
            anyhow::anyhow!("Invalid content in {}: {}", self.data_dir.display(), e)
        })?;
        tracing::info!(
            archetypes = catalog.archetype_count(),
            items = catalog.item_count(),
            "content loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
