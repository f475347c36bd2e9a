//! Post-death loot.
//!
//! Each drop-table row is an independent Bernoulli roll. On top of the
//! archetype's table every death rolls once for a bonus item of Uncommon
//! rarity drawn from the whole catalog. Lookups that miss (an id in a drop
//! table with no catalog entry) are skipped with a warning.

mod stack;

pub use stack::{ItemQuality, ItemStack};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::AiConfig;
use crate::creature::CreatureKind;
use crate::env::{ItemOracle, LootTableOracle, Rarity};

/// Rarity of the universal bonus drop.
pub const BONUS_RARITY: Rarity = Rarity::Uncommon;

/// Stateless drop-table evaluator.
#[derive(Clone, Copy)]
pub struct LootGenerator<'a> {
    tables: &'a dyn LootTableOracle,
    items: &'a dyn ItemOracle,
    bonus_chance: f32,
}

impl<'a> LootGenerator<'a> {
    pub fn new(tables: &'a dyn LootTableOracle, items: &'a dyn ItemOracle, config: &AiConfig) -> Self {
        Self {
            tables,
            items,
            bonus_chance: config.bonus_loot_chance,
        }
    }

    /// Rolls the drop table of `kind` plus the bonus item.
    pub fn generate(&self, kind: CreatureKind, rng: &mut impl Rng) -> Vec<ItemStack> {
        let mut drops = Vec::new();

        for entry in self.tables.drop_table(kind) {
            if rng.r#gen::<f32>() >= entry.chance {
                continue;
            }
            let Some(definition) = self.items.definition(&entry.item_id) else {
                tracing::warn!(item = %entry.item_id, %kind, "drop table references unknown item");
                continue;
            };

            let low = entry.min_quantity.max(1);
            let high = entry.max_quantity.max(low);
            let quantity = rng.gen_range(low..=high).min(definition.max_stack.max(1));
            drops.push(ItemStack::new(
                definition.id.clone(),
                ItemQuality::roll(rng),
                quantity,
            ));
        }

        if rng.r#gen::<f32>() < self.bonus_chance {
            let pool = self.items.by_rarity(BONUS_RARITY);
            match pool.choose(rng) {
                Some(definition) => {
                    drops.push(ItemStack::new(definition.id.clone(), ItemQuality::roll(rng), 1));
                }
                None => tracing::warn!(rarity = %BONUS_RARITY, "no items for bonus drop"),
            }
        }

        tracing::debug!(%kind, drops = drops.len(), "loot generated");
        drops
    }
}

impl std::fmt::Debug for LootGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LootGenerator")
            .field("bonus_chance", &self.bonus_chance)
            .finish_non_exhaustive()
    }
}
