//! Encounter orchestration.
//!
//! An [`Encounter`] owns the battlefield: the terrain, the pathfinder, the
//! player, and the creature roster. It drives the engine's entry points in
//! order and does the follow-up work the engine hands back:
//!
//! - spawn payloads become new roster entries on the nearest free tile
//! - knockback payloads push the player until a wall or creature stops it
//! - deaths are resolved exactly once (loot is recorded, death bursts
//!   damage everyone in range and may chain)
//!
//! Creatures act one at a time. Before each one acts the encounter builds
//! an [`Occupancy`] of every other living creature plus the player, so no
//! two occupants ever share a tile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use creature_content::CreatureCatalog;
use creature_core::spatial::{self, Occupancy};
use creature_core::{
    AbilityPayload, AiConfig, CombatEvent, CombatTarget, Creature, CreatureFactory,
    CreatureKind, CreatureRng, CreatureState, DamageTaken, DamageType, DeathEffect,
    ExplorationContext, GridOracle, ItemStack, LootGenerator, Position, TurnContext, derive_seed,
};

use crate::error::{Result, RuntimeError};
use crate::map::GridMap;
use crate::pathfinding::AStarPathfinder;
use crate::player::Player;

/// Farthest ring searched for a free tile around a spawn anchor.
pub const SPAWN_SEARCH_RADIUS: u32 = 3;

/// Something the encounter observed, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncounterEvent {
    /// Forwarded engine event.
    Creature {
        round: u32,
        creature: String,
        event: CombatEvent,
    },
    Spawned {
        round: u32,
        creature: String,
        kind: CreatureKind,
        at: Position,
        parent: Option<String>,
    },
    SpawnFailed {
        round: u32,
        kind: CreatureKind,
        anchor: Position,
    },
    PlayerKnockedBack {
        round: u32,
        from: Position,
        to: Position,
    },
    PlayerStatusDamage {
        round: u32,
        amount: u32,
    },
    PlayerAttacked {
        round: u32,
        creature: String,
        amount: u32,
        killed: bool,
    },
    LootDropped {
        round: u32,
        creature: String,
        items: usize,
    },
    Exploded {
        round: u32,
        creature: String,
        at: Position,
        radius: u32,
        victims: usize,
    },
    PlayerDied {
        round: u32,
    },
}

/// What one [`Encounter::run_round`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundSummary {
    pub round: u32,
    /// Creatures whose turn actually ran.
    pub acted: usize,
    pub deaths: usize,
    pub spawned: usize,
    pub player_alive: bool,
    pub events: Vec<EncounterEvent>,
}

/// Drops recorded for one dead creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    pub creature: String,
    pub kind: CreatureKind,
    pub at: Position,
    pub items: Vec<ItemStack>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub id: String,
    pub kind: CreatureKind,
    pub tile: Position,
    pub health: u32,
    pub max_health: u32,
    pub state: CreatureState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
}

/// Serializable snapshot of an encounter and its history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterReport {
    pub seed: u64,
    pub rounds: u32,
    pub player: PlayerSummary,
    pub creatures: Vec<CreatureSummary>,
    pub loot: Vec<LootDrop>,
    pub events: Vec<EncounterEvent>,
}

impl EncounterReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct Encounter {
    catalog: Arc<CreatureCatalog>,
    config: AiConfig,
    map: GridMap,
    paths: AStarPathfinder,
    player: Player,
    creatures: Vec<Creature>,
    seed: u64,
    spawned_total: u64,
    round: u32,
    loot: Vec<LootDrop>,
    log: Vec<EncounterEvent>,
}

impl Encounter {
    pub fn new(
        catalog: Arc<CreatureCatalog>,
        config: AiConfig,
        map: GridMap,
        player: Player,
        seed: u64,
    ) -> Self {
        Self {
            catalog,
            config,
            map,
            paths: AStarPathfinder::new(),
            player,
            creatures: Vec::new(),
            seed,
            spawned_total: 0,
            round: 0,
            loot: Vec::new(),
            log: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    /// The pathfinder creatures plan with.
    pub fn pathfinder(&self) -> &AStarPathfinder {
        &self.paths
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whole roster, dead creatures included. Indices are stable.
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, index: usize) -> Result<&Creature> {
        self.creatures
            .get(index)
            .ok_or(RuntimeError::UnknownCreature(index))
    }

    pub fn creature_mut(&mut self, index: usize) -> Result<&mut Creature> {
        self.creatures
            .get_mut(index)
            .ok_or(RuntimeError::UnknownCreature(index))
    }

    pub fn living(&self) -> impl Iterator<Item = (usize, &Creature)> {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(_, creature)| creature.is_alive())
    }

    /// Living creature standing on `tile`.
    pub fn loot(&self) -> &[LootDrop] {
        &self.loot
    }

    pub fn events(&self) -> &[EncounterEvent] {
        &self.log
    }

    /// True once the player is dead or no creature in the fight is alive.
    pub fn is_over(&self) -> bool {
        !self.player.is_alive() || !self.living().any(|(_, c)| c.in_combat_zone)
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a `kind` on `tile`.
    ///
    /// # Errors
    ///
    /// - `SpawnBlocked` when a living creature or the player holds the tile
    /// - `Oracle` when the archetype is missing or the terrain rejects it
    pub fn spawn(&mut self, kind: CreatureKind, tile: Position) -> Result<usize> {
        let occupancy = self.occupancy(None);
        if occupancy.is_occupied(tile, true) {
            return Err(RuntimeError::SpawnBlocked(tile));
        }
        self.place(kind, tile)
    }

    fn place(&mut self, kind: CreatureKind, tile: Position) -> Result<usize> {
        let stream = self.spawned_total;
        let rng = CreatureRng::new(derive_seed(self.seed, stream));
        let id = format!("{}-{}", kind, stream);

        let factory = CreatureFactory::new(&*self.catalog, &self.map, &self.config);
        let creature = factory.spawn(id, kind, tile, rng)?;

        self.spawned_total += 1;
        self.creatures.push(creature);
        Ok(self.creatures.len() - 1)
    }

    /// Occupancy of every living creature except `exclude`, plus the player.
    fn occupancy(&self, exclude: Option<usize>) -> Occupancy {
        let tiles = self
            .living()
            .filter(|(index, _)| Some(*index) != exclude)
            .map(|(_, creature)| creature.tile());
        Occupancy::from_positions(tiles, Some(self.player.position))
    }

    /// Nearest free tile to `anchor`, ring by ring, or `None` when every
    /// ring up to [`SPAWN_SEARCH_RADIUS`] is full.
    fn free_tile_near(&self, anchor: Position) -> Option<Position> {
        let occupancy = self.occupancy(None);
        (1..=SPAWN_SEARCH_RADIUS).find_map(|radius| {
            spatial::ring(anchor, radius)
                .into_iter()
                .filter(|&tile| spatial::is_free(&self.map, &occupancy, tile, true))
                .min_by_key(|&tile| tile.distance_squared(anchor))
        })
    }

    // ========================================================================
    // Exploration
    // ========================================================================

    /// One real-time tick for every living creature outside the fight.
    pub fn explore(&mut self, dt: f32) -> Vec<EncounterEvent> {
        let mut events = Vec::new();
        let player_position = self.player.position;

        for index in 0..self.creatures.len() {
            if !self.creatures[index].is_alive() || self.creatures[index].in_combat_zone {
                continue;
            }
            let occupancy = self.occupancy(Some(index));
            let ctx = ExplorationContext {
                grid: &self.map,
                paths: &self.paths,
                config: &self.config,
                player_position,
                occupancy: &occupancy,
            };
            let creature = &mut self.creatures[index];
            let produced = creature.update(dt, &ctx);
            let id = creature.id.clone();
            events.extend(produced.into_iter().map(|event| EncounterEvent::Creature {
                round: self.round,
                creature: id.clone(),
                event,
            }));
        }

        self.resolve_deaths(&mut events);
        self.log.extend(events.iter().cloned());
        events
    }

    /// Pulls every living creature within `radius` of the player into the
    /// fight. Returns how many joined.
    pub fn engage(&mut self, radius: u32) -> usize {
        let player = self.player.position;
        let mut joined = 0;
        for creature in self.creatures.iter_mut().filter(|c| c.is_alive()) {
            if !creature.in_combat_zone && creature.tile().chebyshev(player) <= radius {
                creature.in_combat_zone = true;
                joined += 1;
            }
        }
        if joined > 0 {
            tracing::info!(joined, radius, "creatures joined the fight");
        }
        joined
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// One combat round. Every creature in the fight that was on the roster
    /// when the round started takes one turn, in roster order. Creatures
    /// spawned during the round wait for the next one.
    pub fn run_round(&mut self) -> RoundSummary {
        self.round += 1;
        let round = self.round;
        let mut summary = RoundSummary {
            round,
            ..RoundSummary::default()
        };
        let mut events = Vec::new();

        let status_damage = self.player.start_turn();
        if status_damage > 0 {
            events.push(EncounterEvent::PlayerStatusDamage {
                round,
                amount: status_damage,
            });
        }

        let roster = self.creatures.len();
        for index in 0..roster {
            if !self.player.is_alive() {
                break;
            }
            {
                let creature = &self.creatures[index];
                if !creature.is_alive() || !creature.in_combat_zone {
                    continue;
                }
            }

            let start_events = self.creatures[index].start_turn();
            let id = self.creatures[index].id.clone();
            Self::forward(&mut events, round, &id, start_events);

            let occupancy = self.occupancy(Some(index));
            let combat_center = self.player.position;
            let report = {
                let mut ctx = TurnContext {
                    grid: &self.map,
                    paths: &self.paths,
                    config: &self.config,
                    target: &mut self.player,
                    occupancy: &occupancy,
                    combat_center,
                };
                self.creatures[index].take_turn(&mut ctx)
            };
            if report.complete {
                summary.acted += 1;
            }

            let payloads: Vec<AbilityPayload> = report
                .events
                .iter()
                .filter_map(|event| match event {
                    CombatEvent::AbilityUsed { result } if result.success => Some(result.payload),
                    _ => None,
                })
                .collect();
            Self::forward(&mut events, round, &id, report.events);

            for payload in payloads {
                match payload {
                    AbilityPayload::None => {}
                    AbilityPayload::Spawn { position, kind } => {
                        if self.spawn_near(kind, position, Some(&id), &mut events) {
                            summary.spawned += 1;
                        }
                    }
                    AbilityPayload::Knockback {
                        direction,
                        distance,
                    } => self.knock_back_player(direction, distance, &mut events),
                }
            }

            summary.deaths += self.resolve_deaths(&mut events);
        }

        // Damage over time may finish a creature between its own turns.
        summary.deaths += self.resolve_deaths(&mut events);

        summary.player_alive = self.player.is_alive();
        if !summary.player_alive {
            tracing::info!(round, "player died");
            events.push(EncounterEvent::PlayerDied { round });
        }
        tracing::debug!(
            round,
            acted = summary.acted,
            deaths = summary.deaths,
            spawned = summary.spawned,
            "round finished"
        );

        self.log.extend(events.iter().cloned());
        summary.events = events;
        summary
    }

    /// The player hits the creature at `index`. A survivor is provoked and
    /// pulled into the fight.
    pub fn player_attack(
        &mut self,
        index: usize,
        amount: u32,
        damage_type: DamageType,
    ) -> Result<DamageTaken> {
        let round = self.round;
        let creature = self.creature_mut(index)?;
        let taken = creature.take_damage(amount, damage_type);
        let id = creature.id.clone();

        let mut events = vec![EncounterEvent::PlayerAttacked {
            round,
            creature: id.clone(),
            amount: taken.amount,
            killed: taken.killed,
        }];
        if creature.is_alive() {
            creature.in_combat_zone = true;
            let provoked = creature.provoke();
            Self::forward(&mut events, round, &id, provoked);
        }

        self.resolve_deaths(&mut events);
        self.log.extend(events);
        Ok(taken)
    }

    /// Moves the player one step. Returns false when the tile is blocked.
    pub fn move_player(&mut self, to: Position) -> bool {
        if self.player.position.chebyshev(to) != 1 || !self.player.is_alive() {
            return false;
        }
        let occupancy = self.occupancy(None);
        if !spatial::is_free(&self.map, &occupancy, to, false) {
            return false;
        }
        self.player.position = to;
        true
    }

    // ========================================================================
    // Follow-up work
    // ========================================================================

    fn forward(
        events: &mut Vec<EncounterEvent>,
        round: u32,
        creature: &str,
        produced: Vec<CombatEvent>,
    ) {
        events.extend(produced.into_iter().map(|event| EncounterEvent::Creature {
            round,
            creature: creature.to_owned(),
            event,
        }));
    }

    fn spawn_near(
        &mut self,
        kind: CreatureKind,
        anchor: Position,
        parent: Option<&str>,
        events: &mut Vec<EncounterEvent>,
    ) -> bool {
        let round = self.round;
        let Some(tile) = self.free_tile_near(anchor) else {
            tracing::warn!(%kind, %anchor, "no free tile for spawn");
            events.push(EncounterEvent::SpawnFailed {
                round,
                kind,
                anchor,
            });
            return false;
        };

        match self.place(kind, tile) {
            Ok(index) => {
                let creature = &mut self.creatures[index];
                creature.in_combat_zone = true;
                tracing::debug!(creature = %creature.id, %tile, "spawned into the fight");
                events.push(EncounterEvent::Spawned {
                    round,
                    creature: creature.id.clone(),
                    kind,
                    at: tile,
                    parent: parent.map(str::to_owned),
                });
                true
            }
            Err(error) => {
                tracing::warn!(%kind, %tile, %error, "spawn rejected");
                events.push(EncounterEvent::SpawnFailed {
                    round,
                    kind,
                    anchor,
                });
                false
            }
        }
    }

    /// Pushes the player up to `distance` tiles. Stops before walls, the map
    /// edge, and creatures.
    fn knock_back_player(
        &mut self,
        direction: (i32, i32),
        distance: u32,
        events: &mut Vec<EncounterEvent>,
    ) {
        if direction == (0, 0) || !self.player.is_alive() {
            return;
        }
        let from = self.player.position;
        let occupancy = self.occupancy(None);
        let mut to = from;
        for _ in 0..distance {
            let next = to.offset(direction.0, direction.1);
            if !spatial::is_free(&self.map, &occupancy, next, false) {
                break;
            }
            to = next;
        }
        if to != from {
            self.player.position = to;
            tracing::debug!(%from, %to, "player knocked back");
            events.push(EncounterEvent::PlayerKnockedBack {
                round: self.round,
                from,
                to,
            });
        }
    }

    /// Handles every death not yet handled, including deaths caused by
    /// explosions along the way. Returns how many creatures were resolved.
    fn resolve_deaths(&mut self, events: &mut Vec<EncounterEvent>) -> usize {
        let catalog = Arc::clone(&self.catalog);
        let generator = LootGenerator::new(&*catalog, &*catalog, &self.config);
        let round = self.round;
        let mut resolved = 0;

        loop {
            let mut pending = Vec::new();
            for creature in self.creatures.iter_mut() {
                if let Some(report) = creature.on_death(&generator) {
                    pending.push((creature.id.clone(), creature.kind, creature.tile(), report));
                }
            }
            if pending.is_empty() {
                break;
            }

            for (id, kind, at, report) in pending {
                resolved += 1;
                if !report.loot.is_empty() {
                    events.push(EncounterEvent::LootDropped {
                        round,
                        creature: id.clone(),
                        items: report.loot.len(),
                    });
                }
                self.loot.push(LootDrop {
                    creature: id.clone(),
                    kind,
                    at,
                    items: report.loot,
                });

                if let Some(effect) = report.effect {
                    self.detonate(&id, effect, events);
                }
            }
        }
        resolved
    }

    fn detonate(&mut self, source: &str, effect: DeathEffect, events: &mut Vec<EncounterEvent>) {
        let DeathEffect::Explosion {
            center,
            radius,
            damage,
            damage_type,
        } = effect;
        let at = center.tile(self.map.tile_size());
        let mut victims = 0;

        if self.player.is_alive() && self.player.position.chebyshev(at) <= radius {
            self.player.take_damage(damage, damage_type);
            victims += 1;
        }
        for creature in self.creatures.iter_mut().filter(|c| c.is_alive()) {
            if creature.tile().chebyshev(at) > radius {
                continue;
            }
            let taken = creature.take_damage(damage, damage_type);
            victims += 1;
            let id = creature.id.clone();
            let tile = creature.tile();
            events.push(EncounterEvent::Creature {
                round: self.round,
                creature: id.clone(),
                event: CombatEvent::Damaged {
                    at: tile,
                    amount: taken.amount,
                    damage_type,
                },
            });
            if taken.killed {
                events.push(EncounterEvent::Creature {
                    round: self.round,
                    creature: id,
                    event: CombatEvent::Died { at: tile },
                });
            }
        }

        tracing::debug!(creature = source, %at, radius, victims, "death burst");
        events.push(EncounterEvent::Exploded {
            round: self.round,
            creature: source.to_owned(),
            at,
            radius,
            victims,
        });
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn report(&self) -> EncounterReport {
        EncounterReport {
            seed: self.seed,
            rounds: self.round,
            player: PlayerSummary {
                name: self.player.name.clone(),
                position: self.player.position,
                health: self.player.health,
                max_health: self.player.max_health,
            },
            creatures: self
                .creatures
                .iter()
                .map(|creature| CreatureSummary {
                    id: creature.id.clone(),
                    kind: creature.kind,
                    tile: creature.tile(),
                    health: creature.stats.current_health,
                    max_health: creature.stats.max_health,
                    state: creature.state,
                })
                .collect(),
            loot: self.loot.clone(),
            events: self.log.clone(),
        }
    }
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("seed", &self.seed)
            .field("round", &self.round)
            .field("creatures", &self.creatures.len())
            .field("player", &self.player.position)
            .finish_non_exhaustive()
    }
}
