//! Out-of-combat behavior.
//!
//! A small state machine driven by elapsed time and the distance to the
//! player's tile:
//!
//! ```text
//! Idle ──sight/territory/provoked──▶ Chasing ──> 1.5 × sight──▶ Idle
//!  │  └──provoked coward──▶ Fleeing ──> 2 × sight──▶ Idle
//!  └──patrol timer──▶ Patrolling ──path done──▶ Idle
//! any ──stun──▶ Stunned ──stun gone──▶ Idle
//! ```
//!
//! Patrolling reacts to the player exactly like Idle. Dead is terminal and
//! never left.

use rand::Rng;

use crate::config::AiConfig;
use crate::creature::{BehaviorKind, Creature, CreatureState};
use crate::env::{GridOracle, PathOracle};
use crate::event::CombatEvent;
use crate::spatial::{self, Occupancy};
use crate::state::{Position, StatusEffectKind};
use crate::status::{self, TickMode};

/// Everything an exploration tick reads.
#[derive(Clone, Copy)]
pub struct ExplorationContext<'a> {
    pub grid: &'a dyn GridOracle,
    pub paths: &'a dyn PathOracle,
    pub config: &'a AiConfig,
    pub player_position: Position,
    /// Other living creatures and the player.
    pub occupancy: &'a Occupancy,
}

impl Creature {
    /// Advances exploration behavior by `dt` seconds.
    pub fn update(&mut self, dt: f32, ctx: &ExplorationContext<'_>) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if !self.is_alive() {
            return events;
        }

        let tick = status::tick(&mut self.status_effects, TickMode::RealTime(dt));
        self.apply_status_tick(tick, &mut events);
        if !self.is_alive() {
            return events;
        }

        if self.is_provoked {
            self.provoked_timer -= dt;
            if self.provoked_timer <= 0.0 {
                self.is_provoked = false;
                self.provoked_timer = 0.0;
            }
        }

        if self.status_effects.has(StatusEffectKind::Stunned) {
            self.path.clear();
            self.set_state(CreatureState::Stunned, &mut events);
            return events;
        }
        if self.state == CreatureState::Stunned {
            self.set_state(CreatureState::Idle, &mut events);
        }

        let distance = self.tile().chebyshev(ctx.player_position);
        match self.state {
            CreatureState::Idle | CreatureState::Patrolling => {
                if self.should_engage(distance, ctx.config) {
                    self.path.clear();
                    self.set_state(CreatureState::Chasing, &mut events);
                } else if self.is_provoked && self.behavior == BehaviorKind::Cowardly {
                    self.path.clear();
                    self.set_state(CreatureState::Fleeing, &mut events);
                } else if self.state == CreatureState::Idle {
                    self.idle(dt, ctx, &mut events);
                } else {
                    self.patrol(dt, ctx, &mut events);
                }
            }
            CreatureState::Chasing => self.chase(dt, distance, ctx, &mut events),
            CreatureState::Fleeing => self.flee(dt, distance, ctx, &mut events),
            CreatureState::Stunned | CreatureState::Dead => {}
        }
        events
    }

    /// Whether an idle or patrolling creature starts chasing.
    fn should_engage(&self, distance: u32, config: &AiConfig) -> bool {
        let in_sight = distance <= self.stats.sight_range;
        match self.behavior {
            BehaviorKind::Aggressive if in_sight => true,
            BehaviorKind::Territorial if distance <= config.territorial_radius => true,
            BehaviorKind::Cowardly => false,
            _ => self.is_provoked,
        }
    }

    fn movement_speed(&self, multiplier: f32) -> f32 {
        self.stats.speed * status::speed_modifier(&self.status_effects) * multiplier
    }

    fn idle(&mut self, dt: f32, ctx: &ExplorationContext<'_>, events: &mut Vec<CombatEvent>) {
        self.patrol_timer += dt;
        if self.patrol_timer < self.patrol_interval {
            return;
        }
        self.resample_patrol_interval(ctx.config);
        if self.rng.r#gen::<f32>() >= ctx.config.patrol_chance {
            return;
        }

        let here = self.tile();
        let radius = ctx.config.patrol_radius;
        let destination = here.offset(
            self.rng.gen_range(-radius..=radius),
            self.rng.gen_range(-radius..=radius),
        );
        if destination == here || !spatial::is_free(ctx.grid, ctx.occupancy, destination, true) {
            return;
        }
        if self.plan_path(ctx.grid, ctx.paths, destination) {
            tracing::debug!(creature = %self.id, %destination, "patrol started");
            self.set_state(CreatureState::Patrolling, events);
        }
    }

    fn patrol(&mut self, dt: f32, ctx: &ExplorationContext<'_>, events: &mut Vec<CombatEvent>) {
        let speed = self.movement_speed(1.0);
        self.advance_along_path(dt, speed, ctx.grid, ctx.occupancy, events);
        if self.path.is_empty() {
            self.set_state(CreatureState::Idle, events);
        }
    }

    fn chase(
        &mut self,
        dt: f32,
        distance: u32,
        ctx: &ExplorationContext<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let release = self.stats.sight_range as f32 * ctx.config.chase_release_factor;
        if distance as f32 > release {
            self.path.clear();
            self.set_state(CreatureState::Idle, events);
            return;
        }

        if self.path.is_empty() && self.plan_path(ctx.grid, ctx.paths, ctx.player_position) {
            // The route ends on the player; stop one tile short.
            if self.path.back() == Some(&ctx.player_position) {
                self.path.pop_back();
            }
        }
        let speed = self.movement_speed(1.0);
        self.advance_along_path(dt, speed, ctx.grid, ctx.occupancy, events);
    }

    fn flee(
        &mut self,
        dt: f32,
        distance: u32,
        ctx: &ExplorationContext<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let release = self.stats.sight_range as f32 * ctx.config.flee_release_factor;
        if distance as f32 > release {
            self.path.clear();
            self.is_provoked = false;
            self.provoked_timer = 0.0;
            self.set_state(CreatureState::Idle, events);
            return;
        }

        if self.path.is_empty() {
            let target = self.flee_target(ctx.player_position, ctx);
            self.plan_path(ctx.grid, ctx.paths, target);
        }
        let speed = self.movement_speed(ctx.config.flee_speed_multiplier);
        self.advance_along_path(dt, speed, ctx.grid, ctx.occupancy, events);
    }

    /// Tile `flee_distance` away from `threat` along the escape vector,
    /// clamped to the grid. A random direction when standing on the threat.
    fn flee_target(&mut self, threat: Position, ctx: &ExplorationContext<'_>) -> Position {
        let here = self.tile();
        let (mut vx, mut vy) = ((here.x - threat.x) as f32, (here.y - threat.y) as f32);
        let length = (vx * vx + vy * vy).sqrt();
        if length < f32::EPSILON {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            (vx, vy) = (angle.cos(), angle.sin());
        } else {
            vx /= length;
            vy /= length;
        }

        let reach = ctx.config.flee_distance as f32;
        let target = here.offset((vx * reach).round() as i32, (vy * reach).round() as i32);
        ctx.grid.dimensions().clamp(target)
    }
}
