use crate::creature::CreatureKind;

/// Item catalog lookup.
pub trait ItemOracle {
    fn definition(&self, id: &str) -> Option<&ItemDefinition>;

    /// All definitions of the given rarity, sorted by item id.
    fn by_rarity(&self, rarity: Rarity) -> Vec<&ItemDefinition>;
}

/// Per-archetype drop tables.
pub trait LootTableOracle {
    /// Drop table for `kind`. Empty when the kind drops nothing.
    fn drop_table(&self, kind: CreatureKind) -> &[LootEntry];
}

/// Item definition with the fields loot and stacking need.
///
/// # Stacking
///
/// `max_stack` of 1 marks unique items (weapons, keys). Everything above
/// stacks up to that count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub max_stack: u16,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: Rarity, max_stack: u16) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            max_stack,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// One row of a drop table: an independent Bernoulli roll.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item_id: String,
    /// Drop probability in `0..=1`.
    pub chance: f32,
    pub min_quantity: u16,
    pub max_quantity: u16,
}

impl LootEntry {
    pub fn new(item_id: impl Into<String>, chance: f32, min_quantity: u16, max_quantity: u16) -> Self {
        Self {
            item_id: item_id.into(),
            chance,
            min_quantity,
            max_quantity,
        }
    }
}
