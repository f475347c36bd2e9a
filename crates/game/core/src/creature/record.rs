//! The creature record and its factory.

use std::collections::VecDeque;

use rand::Rng;

use super::{
    AbilitySlots, BehaviorKind, CreatureKind, CreatureState, CreatureStats, Personality,
    TacticalTraits,
};
use crate::config::AiConfig;
use crate::env::{ArchetypeOracle, CreatureRng, CreatureTemplate, GridOracle, OracleError};
use crate::state::{Position, ResourcePool, StatusEffects, WorldPos};

/// One hostile or neutral actor.
///
/// Fields are public for orchestrators and tools to read; the engine entry
/// points (`update`, `start_turn`, `take_turn`, `take_damage`, ...) are the
/// only code expected to mutate them during play.
#[derive(Clone, Debug)]
pub struct Creature {
    pub id: String,
    pub name: String,
    pub kind: CreatureKind,

    /// Continuous position. The tile is always derived, never stored.
    pub position: WorldPos,
    /// Edge length of one tile on the grid the creature lives on.
    pub tile_size: f32,
    pub state: CreatureState,
    /// Set by the orchestrator while the creature takes part in combat.
    pub in_combat_zone: bool,

    pub behavior: BehaviorKind,
    pub personality: Personality,

    pub action_points: ResourcePool,
    pub movement_points: ResourcePool,

    pub stats: CreatureStats,
    pub abilities: AbilitySlots,
    pub traits: TacticalTraits,

    pub is_stealthed: bool,
    /// Set once stealth has been broken at least once.
    pub was_stealthed: bool,
    pub is_provoked: bool,
    /// Seconds until provocation wears off.
    pub provoked_timer: f32,

    pub spawn_count: u32,
    pub max_spawns: u32,
    pub spawn_kind: Option<CreatureKind>,

    /// Committed route, head first.
    pub path: VecDeque<Position>,
    pub status_effects: StatusEffects,

    pub(crate) patrol_timer: f32,
    pub(crate) patrol_interval: f32,
    /// Fractional real-time damage over time not yet applied.
    pub(crate) dot_accumulator: f32,
    pub(crate) death_handled: bool,
    pub(crate) rng: CreatureRng,
}

impl Creature {
    /// Builds a creature from a template, standing at the centre of `tile`.
    pub fn from_template(
        id: impl Into<String>,
        kind: CreatureKind,
        template: &CreatureTemplate,
        tile: Position,
        tile_size: f32,
        mut rng: CreatureRng,
        config: &AiConfig,
    ) -> Self {
        let patrol_interval = sample_patrol_interval(config, &mut rng);
        Self {
            id: id.into(),
            name: template.name.clone(),
            kind,
            position: tile.center(tile_size),
            tile_size,
            state: CreatureState::Idle,
            in_combat_zone: false,
            behavior: template.behavior,
            personality: template.personality,
            action_points: ResourcePool::full(template.max_action_points),
            movement_points: ResourcePool::full(template.max_movement_points),
            stats: CreatureStats {
                max_health: template.max_health,
                current_health: template.max_health,
                speed: template.speed,
                damage: template.damage,
                accuracy: template.accuracy,
                sight_range: template.sight_range,
                attack_range: template.attack_range,
            },
            abilities: AbilitySlots {
                primary: template.primary_ability,
                secondary: template.secondary_ability,
                cooldown: 0,
                cooldown_max: template.ability_cooldown,
                chance: template.ability_chance,
            },
            traits: TacticalTraits {
                retreat_threshold: template.retreat_threshold,
                aggression_level: template.aggression_level,
                flags: template.tactical_flags,
            },
            is_stealthed: template.starts_stealthed,
            was_stealthed: false,
            is_provoked: false,
            provoked_timer: 0.0,
            spawn_count: 0,
            max_spawns: template.max_spawns,
            spawn_kind: template.spawn_kind,
            path: VecDeque::new(),
            status_effects: StatusEffects::empty(),
            patrol_timer: 0.0,
            patrol_interval,
            dot_accumulator: 0.0,
            death_handled: false,
            rng,
        }
    }

    /// Tile under the creature.
    pub fn tile(&self) -> Position {
        self.position.tile(self.tile_size)
    }

    pub fn is_alive(&self) -> bool {
        self.state != CreatureState::Dead
    }

    pub fn is_ranged(&self) -> bool {
        self.stats.is_ranged()
    }

    pub(crate) fn resample_patrol_interval(&mut self, config: &AiConfig) {
        self.patrol_interval = sample_patrol_interval(config, &mut self.rng);
        self.patrol_timer = 0.0;
    }
}

fn sample_patrol_interval(config: &AiConfig, rng: &mut impl Rng) -> f32 {
    if config.patrol_interval_max > config.patrol_interval_min {
        rng.gen_range(config.patrol_interval_min..config.patrol_interval_max)
    } else {
        config.patrol_interval_min
    }
}

/// Builds creatures from the archetype table.
#[derive(Clone, Copy)]
pub struct CreatureFactory<'a> {
    archetypes: &'a dyn ArchetypeOracle,
    grid: &'a dyn GridOracle,
    config: &'a AiConfig,
}

impl<'a> CreatureFactory<'a> {
    pub fn new(
        archetypes: &'a dyn ArchetypeOracle,
        grid: &'a dyn GridOracle,
        config: &'a AiConfig,
    ) -> Self {
        Self {
            archetypes,
            grid,
            config,
        }
    }

    /// Spawns a `kind` at the centre of `tile`.
    ///
    /// # Errors
    ///
    /// - `ArchetypeNotFound` when the table has no row for `kind`
    /// - `PositionOutOfBounds` when `tile` is off the grid
    /// - `TileNotWalkable` when the terrain blocks `tile`
    pub fn spawn(
        &self,
        id: impl Into<String>,
        kind: CreatureKind,
        tile: Position,
        rng: CreatureRng,
    ) -> Result<Creature, OracleError> {
        let template = self
            .archetypes
            .template(kind)
            .ok_or(OracleError::ArchetypeNotFound(kind))?;
        if !self.grid.contains(tile) {
            return Err(OracleError::PositionOutOfBounds(tile));
        }
        if !self.grid.is_walkable(tile) {
            return Err(OracleError::TileNotWalkable(tile));
        }

        let creature = Creature::from_template(
            id,
            kind,
            template,
            tile,
            self.grid.tile_size(),
            rng,
            self.config,
        );
        tracing::debug!(id = %creature.id, %kind, %tile, "creature spawned");
        Ok(creature)
    }
}

impl std::fmt::Debug for CreatureFactory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatureFactory")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
