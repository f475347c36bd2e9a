#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};

use creature_core::{
    AiConfig, ArchetypeOracle, CombatTarget, Creature, CreatureKind, CreatureRng,
    CreatureTemplate, DamageReport, DamageType, GridOracle, MapDimensions, Occupancy, PathOracle,
    Position, StatusEffectKind, StatusEffects, status,
};

pub const TILE: f32 = 32.0;

/// Rectangular grid with optional wall tiles.
pub struct TestGrid {
    pub dimensions: MapDimensions,
    pub walls: HashSet<Position>,
}

impl TestGrid {
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            walls: HashSet::new(),
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }
}

impl GridOracle for TestGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_size(&self) -> f32 {
        TILE
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.dimensions.contains(position) && !self.walls.contains(&position)
    }
}

/// Breadth-first search over the 8-neighbourhood.
pub struct BfsPaths;

impl PathOracle for BfsPaths {
    fn find_path(
        &self,
        grid: &dyn GridOracle,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        if start == goal {
            return Some(Vec::new());
        }
        if !grid.is_walkable(goal) {
            return None;
        }
        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        came_from.insert(start, start);
        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = vec![goal];
                let mut node = goal;
                while let Some(&prev) = came_from.get(&node) {
                    if prev == start {
                        break;
                    }
                    path.push(prev);
                    node = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in creature_core::spatial::neighbors8(current) {
                if grid.is_walkable(next) && !came_from.contains_key(&next) {
                    came_from.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

#[derive(Default)]
pub struct Archetypes(pub HashMap<CreatureKind, CreatureTemplate>);

impl Archetypes {
    pub fn with(mut self, kind: CreatureKind, template: CreatureTemplate) -> Self {
        self.0.insert(kind, template);
        self
    }
}

impl ArchetypeOracle for Archetypes {
    fn template(&self, kind: CreatureKind) -> Option<&CreatureTemplate> {
        self.0.get(&kind)
    }
}

/// Player stand-in that records every hit.
pub struct Dummy {
    pub position: Position,
    pub health: u32,
    pub mobility: f32,
    pub statuses: StatusEffects,
    pub hits: Vec<(u32, DamageType)>,
}

impl Dummy {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            health: 1_000,
            mobility: 0.0,
            statuses: StatusEffects::empty(),
            hits: Vec::new(),
        }
    }
}

impl CombatTarget for Dummy {
    fn position(&self) -> Position {
        self.position
    }

    fn take_damage(&mut self, amount: u32, damage_type: DamageType) -> DamageReport {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        self.hits.push((dealt, damage_type));
        DamageReport::direct(dealt)
    }

    fn apply_status(&mut self, kind: StatusEffectKind, duration: f32, turn_based: bool, source: &str) {
        status::apply_effect(&mut self.statuses, kind, duration, turn_based, source);
    }

    fn has_status(&self, kind: StatusEffectKind) -> bool {
        self.statuses.has(kind)
    }

    fn remove_status(&mut self, kind: StatusEffectKind) {
        status::remove_effect(&mut self.statuses, kind);
    }

    fn mobility_modifier(&self) -> f32 {
        self.mobility
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }
}

pub fn spawn(kind: CreatureKind, template: &CreatureTemplate, tile: Position, seed: u64) -> Creature {
    Creature::from_template(
        format!("{kind}-{seed}"),
        kind,
        template,
        tile,
        TILE,
        CreatureRng::new(seed),
        &AiConfig::default(),
    )
}

pub fn occupancy_with_player(player: Position) -> Occupancy {
    Occupancy::new(Some(player))
}
