//! Item stacks produced by loot.

use rand::Rng;

/// Craftsmanship tier of a dropped item.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemQuality {
    Poor,
    #[default]
    Normal,
    Fine,
    Superior,
    Masterwork,
}

impl ItemQuality {
    /// Rolls a quality for a fresh drop: mostly Normal, rarely Masterwork.
    pub fn roll(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..100u32) {
            0..15 => Self::Poor,
            15..80 => Self::Normal,
            80..93 => Self::Fine,
            93..99 => Self::Superior,
            _ => Self::Masterwork,
        }
    }
}

/// A stack of identical items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item_def_id: String,
    pub quality: ItemQuality,
    pub stack_count: u16,
}

impl ItemStack {
    pub fn new(item_def_id: impl Into<String>, quality: ItemQuality, stack_count: u16) -> Self {
        Self {
            item_def_id: item_def_id.into(),
            quality,
            stack_count,
        }
    }

    /// Same definition and same quality.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        self.item_def_id == other.item_def_id && self.quality == other.quality
    }

    /// Moves `count` items into a new stack.
    ///
    /// Returns `None` (and leaves `self` untouched) unless
    /// `0 < count < stack_count`.
    pub fn split(&mut self, count: u16) -> Option<ItemStack> {
        if count == 0 || count >= self.stack_count {
            return None;
        }
        self.stack_count -= count;
        Some(ItemStack {
            item_def_id: self.item_def_id.clone(),
            quality: self.quality,
            stack_count: count,
        })
    }

    /// Absorbs `other`. Hands it back unchanged when the stacks differ.
    pub fn merge(&mut self, other: ItemStack) -> Result<(), ItemStack> {
        if !self.can_stack_with(&other) {
            return Err(other);
        }
        self.stack_count = self.stack_count.saturating_add(other.stack_count);
        Ok(())
    }
}
