//! Engine configuration loader.

use std::path::Path;

use creature_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing AiConfig
    ///
    /// # Returns
    ///
    /// Returns an AiConfig. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Rejects values the engine would sample from an empty range.
    fn validate(config: &AiConfig) -> LoadResult<()> {
        anyhow::ensure!(
            config.patrol_radius >= 0,
            "patrol_radius must not be negative (got {})",
            config.patrol_radius
        );
        anyhow::ensure!(
            config.flee_distance >= 0,
            "flee_distance must not be negative (got {})",
            config.flee_distance
        );
        anyhow::ensure!(
            config.patrol_interval_min > 0.0
                && config.patrol_interval_min < config.patrol_interval_max,
            "patrol interval must satisfy 0 < min < max (got {}..{})",
            config.patrol_interval_min,
            config.patrol_interval_max
        );
        Ok(())
    }
}
