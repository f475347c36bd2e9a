//! Drop table loader.

use std::path::Path;

use creature_core::{CreatureKind, LootEntry};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-kind drop tables from RON files.
///
/// RON format: `Vec<(CreatureKind, Vec<LootEntry>)>`. Kinds without a row
/// drop only the universal bonus item.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(CreatureKind, Vec<LootEntry>)>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(CreatureKind, Vec<LootEntry>)>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse loot table RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows() {
        let tables = LootLoader::parse(
            r#"[
                (Goblin, [
                    (item_id: "copper_coin", chance: 0.6, min_quantity: 1, max_quantity: 8),
                ]),
            ]"#,
        )
        .expect("valid RON");

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].0, CreatureKind::Goblin);
        assert_eq!(tables[0].1, vec![LootEntry::new("copper_coin", 0.6, 1, 8)]);
    }

    #[test]
    fn missing_field_is_an_error() {
        assert!(LootLoader::parse(r#"[(Rat, [(item_id: "tail", chance: 0.5)])]"#).is_err());
    }
}
