//! Scenario files: a map, a player, and creature placements.
//!
//! Scenarios are RON. The map is drawn as ASCII rows (`#` is wall); the
//! terrain and the placements stay separate so one map can host several
//! setups.
//!
//! ```ron
//! (
//!     name: "den",
//!     seed: Some(7),
//!     map: [
//!         "#######",
//!         "#.....#",
//!         "#######",
//!     ],
//!     player: (position: (x: 1, y: 1), health: 60, armor: 1),
//!     creatures: [(kind: Wolf, position: (x: 5, y: 1))],
//! )
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use creature_content::CreatureCatalog;
use creature_core::{AiConfig, CreatureKind, CreatureRng, GridOracle, Position, derive_seed};

use crate::encounter::Encounter;
use crate::error::{Result, RuntimeError};
use crate::map::GridMap;
use crate::player::Player;

/// Built-in scenario used when none is given.
pub const DEFAULT_SCENARIO: &str = include_str!("../data/crossroads.ron");

/// Stream reserved for the player's generator so it never collides with a
/// creature stream.
const PLAYER_STREAM: u64 = u64::MAX;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub position: Position,
    #[serde(default = "PlayerSetup::default_health")]
    pub health: u32,
    #[serde(default)]
    pub armor: u32,
    #[serde(default = "PlayerSetup::default_evasion")]
    pub evasion: f32,
}

impl PlayerSetup {
    fn default_health() -> u32 {
        Player::DEFAULT_MAX_HEALTH
    }

    fn default_evasion() -> f32 {
        Player::DEFAULT_EVASION
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreaturePlacement {
    pub kind: CreatureKind,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Fixed seed. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    pub map: Vec<String>,
    pub player: PlayerSetup,
    #[serde(default)]
    pub creatures: Vec<CreaturePlacement>,
}

impl Scenario {
    pub fn parse(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| RuntimeError::InvalidScenario(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidScenario(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&source)
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_SCENARIO)
    }

    pub fn grid(&self) -> Result<GridMap> {
        GridMap::from_ascii(&self.map.join("\n"))
    }

    /// Builds the encounter. `seed` overrides the scenario's own.
    ///
    /// # Errors
    ///
    /// Fails when the map is malformed, the player stands on a wall, or a
    /// placement is blocked or has no archetype.
    pub fn build(
        &self,
        catalog: Arc<CreatureCatalog>,
        config: AiConfig,
        seed: Option<u64>,
    ) -> Result<Encounter> {
        let map = self.grid()?;
        if !map.is_walkable(self.player.position) {
            return Err(RuntimeError::InvalidScenario(format!(
                "player starts on blocked tile {}",
                self.player.position
            )));
        }

        let seed = seed.or(self.seed).unwrap_or_else(rand::random);
        let player = Player::new(
            "player",
            self.player.position,
            CreatureRng::new(derive_seed(seed, PLAYER_STREAM)),
        )
        .with_health(self.player.health)
        .with_armor(self.player.armor)
        .with_evasion(self.player.evasion);

        let mut encounter = Encounter::new(catalog, config, map, player, seed);
        for placement in &self.creatures {
            encounter.spawn(placement.kind, placement.position)?;
        }

        tracing::info!(
            scenario = %self.name,
            seed,
            creatures = self.creatures.len(),
            "scenario ready"
        );
        Ok(encounter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scenario_parses() {
        let scenario = Scenario::builtin().expect("builtin scenario");
        assert!(!scenario.creatures.is_empty());
        let map = scenario.grid().expect("map");
        assert!(map.is_walkable(scenario.player.position));
    }

    #[test]
    fn player_defaults_fill_in() {
        let scenario = Scenario::parse(
            r#"(name: "tiny", map: ["...", "..."], player: (position: (x: 0, y: 0)))"#,
        )
        .expect("parse");
        assert_eq!(scenario.player.health, Player::DEFAULT_MAX_HEALTH);
        assert_eq!(scenario.player.armor, 0);
        assert!(scenario.creatures.is_empty());
        assert_eq!(scenario.seed, None);
    }

    #[test]
    fn garbage_is_rejected() {
        let error = Scenario::parse("(name: 3)").unwrap_err();
        assert!(matches!(error, RuntimeError::InvalidScenario(_)));
    }
}
