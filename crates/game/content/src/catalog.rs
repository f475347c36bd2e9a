//! Immutable content catalog.
//!
//! A [`CreatureCatalog`] bundles the three read-only tables the engine asks
//! about: archetype templates, the item catalog, and per-kind drop tables.
//! It is built once (from the embedded pack or a data directory), validated,
//! and then passed by reference into `CreatureFactory` and `LootGenerator`.

use std::collections::BTreeMap;

use creature_core::{
    AbilityKind, ArchetypeOracle, CreatureKind, CreatureTemplate, ErrorSeverity, GameError,
    ItemDefinition, ItemOracle, LootEntry, LootTableOracle, Rarity,
};
use strum::IntoEnumIterator;

/// Content that would make the engine misbehave.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("no archetype template for '{0}'")]
    MissingArchetype(CreatureKind),

    #[error("archetype '{kind}' has zero max health")]
    NonPositiveHealth { kind: CreatureKind },

    #[error("archetype '{kind}': {field} = {value} is outside [0, 1]")]
    ProbabilityOutOfRange {
        kind: CreatureKind,
        field: &'static str,
        value: f32,
    },

    #[error("archetype '{kind}' can spawn but names no spawn kind")]
    SpawnKindMissing { kind: CreatureKind },

    #[error("loot for '{kind}': chance {chance} of '{item}' is outside [0, 1]")]
    LootChanceOutOfRange {
        kind: CreatureKind,
        item: String,
        chance: f32,
    },

    #[error("loot for '{kind}': '{item}' quantity range {min}..={max} is inverted")]
    InvertedQuantity {
        kind: CreatureKind,
        item: String,
        min: u16,
        max: u16,
    },

    #[error("item '{0}' has a stack limit of zero")]
    ZeroStackLimit(String),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            MissingArchetype(_) => "CATALOG_MISSING_ARCHETYPE",
            NonPositiveHealth { .. } => "CATALOG_NON_POSITIVE_HEALTH",
            ProbabilityOutOfRange { .. } => "CATALOG_PROBABILITY_OUT_OF_RANGE",
            SpawnKindMissing { .. } => "CATALOG_SPAWN_KIND_MISSING",
            LootChanceOutOfRange { .. } => "CATALOG_LOOT_CHANCE_OUT_OF_RANGE",
            InvertedQuantity { .. } => "CATALOG_INVERTED_QUANTITY",
            ZeroStackLimit(_) => "CATALOG_ZERO_STACK_LIMIT",
        }
    }
}

/// Archetypes, items and drop tables keyed for lookup.
#[derive(Clone, Debug, Default)]
pub struct CreatureCatalog {
    archetypes: BTreeMap<CreatureKind, CreatureTemplate>,
    items: BTreeMap<String, ItemDefinition>,
    loot: BTreeMap<CreatureKind, Vec<LootEntry>>,
}

impl CreatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archetype(mut self, kind: CreatureKind, template: CreatureTemplate) -> Self {
        self.insert_archetype(kind, template);
        self
    }

    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.insert_item(item);
        self
    }

    pub fn with_loot(mut self, kind: CreatureKind, entries: Vec<LootEntry>) -> Self {
        self.insert_loot(kind, entries);
        self
    }

    /// Later rows replace earlier ones.
    pub fn insert_archetype(&mut self, kind: CreatureKind, template: CreatureTemplate) {
        if self.archetypes.insert(kind, template).is_some() {
            tracing::warn!(%kind, "archetype defined twice; keeping the last row");
        }
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        let id = item.id.clone();
        if self.items.insert(id.clone(), item).is_some() {
            tracing::warn!(item = %id, "item defined twice; keeping the last row");
        }
    }

    pub fn insert_loot(&mut self, kind: CreatureKind, entries: Vec<LootEntry>) {
        self.loot.entry(kind).or_default().extend(entries);
    }

    pub fn archetypes(&self) -> impl Iterator<Item = (CreatureKind, &CreatureTemplate)> {
        self.archetypes.iter().map(|(kind, template)| (*kind, template))
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks every row. Stops at the first problem.
    ///
    /// Loot rows naming items absent from the catalog are not errors; the
    /// loot generator skips them with a warning.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for kind in CreatureKind::iter() {
            let template = self
                .archetypes
                .get(&kind)
                .ok_or(CatalogError::MissingArchetype(kind))?;
            validate_template(kind, template)?;
        }

        for item in self.items.values() {
            if item.max_stack == 0 {
                return Err(CatalogError::ZeroStackLimit(item.id.clone()));
            }
        }

        for (&kind, entries) in &self.loot {
            for entry in entries {
                if !(0.0..=1.0).contains(&entry.chance) {
                    return Err(CatalogError::LootChanceOutOfRange {
                        kind,
                        item: entry.item_id.clone(),
                        chance: entry.chance,
                    });
                }
                if entry.min_quantity > entry.max_quantity {
                    return Err(CatalogError::InvertedQuantity {
                        kind,
                        item: entry.item_id.clone(),
                        min: entry.min_quantity,
                        max: entry.max_quantity,
                    });
                }
            }
        }

        Ok(())
    }
}

fn validate_template(kind: CreatureKind, template: &CreatureTemplate) -> Result<(), CatalogError> {
    if template.max_health == 0 {
        return Err(CatalogError::NonPositiveHealth { kind });
    }

    let probabilities = [
        ("accuracy", template.accuracy),
        ("ability_chance", template.ability_chance),
        ("retreat_threshold", template.retreat_threshold),
        ("aggression_level", template.aggression_level),
    ];
    for (field, value) in probabilities {
        if !(0.0..=1.0).contains(&value) {
            return Err(CatalogError::ProbabilityOutOfRange { kind, field, value });
        }
    }

    let spawns = [template.primary_ability, template.secondary_ability]
        .into_iter()
        .flatten()
        .any(AbilityKind::is_spawn);
    if spawns && template.spawn_kind.is_none() {
        return Err(CatalogError::SpawnKindMissing { kind });
    }

    Ok(())
}

impl ArchetypeOracle for CreatureCatalog {
    fn template(&self, kind: CreatureKind) -> Option<&CreatureTemplate> {
        self.archetypes.get(&kind)
    }
}

impl ItemOracle for CreatureCatalog {
    fn definition(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn by_rarity(&self, rarity: Rarity) -> Vec<&ItemDefinition> {
        self.items.values().filter(|item| item.rarity == rarity).collect()
    }
}

impl LootTableOracle for CreatureCatalog {
    fn drop_table(&self, kind: CreatureKind) -> &[LootEntry] {
        self.loot.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
