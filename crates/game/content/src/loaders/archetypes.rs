//! Archetype table loader.

use std::path::Path;

use creature_core::{CreatureKind, CreatureTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for archetype templates from RON files.
///
/// RON format: `Vec<(CreatureKind, CreatureTemplate)>`. Omitted template
/// fields take their defaults, so rows only list what differs.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(CreatureKind, CreatureTemplate)>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(CreatureKind, CreatureTemplate)>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype table RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use creature_core::{AbilityKind, BehaviorKind, TacticalFlags};

    use super::*;

    #[test]
    fn partial_rows_fill_in_defaults() {
        let rows = ArchetypeLoader::parse(
            r#"[
                (Wolf, (
                    name: "Wolf",
                    behavior: Aggressive,
                    max_health: 18,
                    tactical_flags: "PREFERS_FLANKING",
                )),
                (Slime, (
                    name: "Slime",
                    primary_ability: Some(Split),
                    spawn_kind: Some(Slimeling),
                    max_spawns: 2,
                )),
            ]"#,
        )
        .expect("valid RON");

        assert_eq!(rows.len(), 2);
        let (kind, wolf) = &rows[0];
        assert_eq!(*kind, CreatureKind::Wolf);
        assert_eq!(wolf.behavior, BehaviorKind::Aggressive);
        assert_eq!(wolf.max_health, 18);
        assert_eq!(wolf.tactical_flags, TacticalFlags::PREFERS_FLANKING);
        assert_eq!(wolf.attack_range, CreatureTemplate::default().attack_range);

        let (_, slime) = &rows[1];
        assert_eq!(slime.primary_ability, Some(AbilityKind::Split));
        assert_eq!(slime.spawn_kind, Some(CreatureKind::Slimeling));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let error = ArchetypeLoader::parse(r#"[(Dragon, (name: "Dragon"))]"#).unwrap_err();
        assert!(error.to_string().contains("archetype table"));
    }
}
