//! Content loaders for reading creature data from files.
//!
//! Each loader has a `load(path)` entry point for data directories and a
//! `parse(text)` entry point used by the embedded pack in [`builtin`].

pub mod archetypes;
pub mod builtin;
pub mod config;
pub mod factory;
pub mod items;
pub mod loot;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use loot::LootLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
