/// Engine constants and tunable parameters.
///
/// Constants are rules the engine relies on (capacities, fixed durations).
/// Fields are heuristic weights and thresholds that content may override
/// through `config.toml`; every field has a `DEFAULT_*` constant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Half-width of the box a patrolling creature picks destinations from.
    pub patrol_radius: i32,
    /// Probability that an elapsed patrol timer starts a patrol.
    pub patrol_chance: f32,
    /// Lower bound (inclusive) of the resampled patrol interval in seconds.
    pub patrol_interval_min: f32,
    /// Upper bound (exclusive) of the resampled patrol interval in seconds.
    pub patrol_interval_max: f32,

    /// Chasing gives up beyond `sight_range * chase_release_factor`.
    pub chase_release_factor: f32,
    /// Fleeing calms down beyond `sight_range * flee_release_factor`.
    pub flee_release_factor: f32,
    /// How far (tiles) a fleeing creature aims away from the threat.
    pub flee_distance: i32,
    /// Speed multiplier while fleeing in exploration.
    pub flee_speed_multiplier: f32,
    /// Territorial creatures engage inside this many tiles.
    pub territorial_radius: u32,

    /// Passive creatures within this many tiles of the combat center flee it.
    pub passive_flee_radius: u32,
    /// Fraction of max health restored per turn by regeneration.
    pub regeneration_fraction: f32,
    /// Chance per turn a Tactical ranged creature strafes.
    pub strafe_chance: f32,
    /// Chance per turn a healthy stealth creature slips back into stealth.
    pub stealth_reentry_chance: f32,
    /// Stealth creatures only re-enter stealth beyond this many tiles.
    pub stealth_reentry_distance: u32,
    /// Melee flankers search for flanking tiles within this many tiles.
    pub flanking_engage_distance: u32,

    /// Flanking score penalty per tile of travel.
    pub flank_distance_weight: f32,
    /// Flanking score penalty per occupied tile around the candidate.
    pub flank_crowding_weight: f32,
    /// Flanking score bonus for diagonal approach tiles.
    pub flank_diagonal_bonus: f32,

    /// Chance of one bonus item on death, rolled for every archetype.
    pub bonus_loot_chance: f32,
}

impl AiConfig {
    // ===== compile-time constants =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Seconds a provocation lasts.
    pub const PROVOKE_DURATION: f32 = 30.0;
    /// World units within which a moving creature snaps to the tile center.
    pub const SNAP_TOLERANCE: f32 = 4.0;
    /// Health fraction below which special abilities take priority.
    pub const LOW_HEALTH_FRACTION: f32 = 0.5;
    /// Ranged creatures never try to hold closer than this.
    pub const MIN_KITING_DISTANCE: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PATROL_RADIUS: i32 = 5;
    pub const DEFAULT_PATROL_CHANCE: f32 = 0.3;
    pub const DEFAULT_PATROL_INTERVAL_MIN: f32 = 1.0;
    pub const DEFAULT_PATROL_INTERVAL_MAX: f32 = 4.0;
    pub const DEFAULT_CHASE_RELEASE_FACTOR: f32 = 1.5;
    pub const DEFAULT_FLEE_RELEASE_FACTOR: f32 = 2.0;
    pub const DEFAULT_FLEE_DISTANCE: i32 = 8;
    pub const DEFAULT_FLEE_SPEED_MULTIPLIER: f32 = 1.3;
    pub const DEFAULT_TERRITORIAL_RADIUS: u32 = 3;
    pub const DEFAULT_PASSIVE_FLEE_RADIUS: u32 = 8;
    pub const DEFAULT_REGENERATION_FRACTION: f32 = 0.05;
    pub const DEFAULT_STRAFE_CHANCE: f32 = 0.3;
    pub const DEFAULT_STEALTH_REENTRY_CHANCE: f32 = 0.1;
    pub const DEFAULT_STEALTH_REENTRY_DISTANCE: u32 = 3;
    pub const DEFAULT_FLANKING_ENGAGE_DISTANCE: u32 = 3;
    pub const DEFAULT_FLANK_DISTANCE_WEIGHT: f32 = 1.0;
    pub const DEFAULT_FLANK_CROWDING_WEIGHT: f32 = 2.0;
    pub const DEFAULT_FLANK_DIAGONAL_BONUS: f32 = 0.5;
    pub const DEFAULT_BONUS_LOOT_CHANCE: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            patrol_radius: Self::DEFAULT_PATROL_RADIUS,
            patrol_chance: Self::DEFAULT_PATROL_CHANCE,
            patrol_interval_min: Self::DEFAULT_PATROL_INTERVAL_MIN,
            patrol_interval_max: Self::DEFAULT_PATROL_INTERVAL_MAX,
            chase_release_factor: Self::DEFAULT_CHASE_RELEASE_FACTOR,
            flee_release_factor: Self::DEFAULT_FLEE_RELEASE_FACTOR,
            flee_distance: Self::DEFAULT_FLEE_DISTANCE,
            flee_speed_multiplier: Self::DEFAULT_FLEE_SPEED_MULTIPLIER,
            territorial_radius: Self::DEFAULT_TERRITORIAL_RADIUS,
            passive_flee_radius: Self::DEFAULT_PASSIVE_FLEE_RADIUS,
            regeneration_fraction: Self::DEFAULT_REGENERATION_FRACTION,
            strafe_chance: Self::DEFAULT_STRAFE_CHANCE,
            stealth_reentry_chance: Self::DEFAULT_STEALTH_REENTRY_CHANCE,
            stealth_reentry_distance: Self::DEFAULT_STEALTH_REENTRY_DISTANCE,
            flanking_engage_distance: Self::DEFAULT_FLANKING_ENGAGE_DISTANCE,
            flank_distance_weight: Self::DEFAULT_FLANK_DISTANCE_WEIGHT,
            flank_crowding_weight: Self::DEFAULT_FLANK_CROWDING_WEIGHT,
            flank_diagonal_bonus: Self::DEFAULT_FLANK_DIAGONAL_BONUS,
            bonus_loot_chance: Self::DEFAULT_BONUS_LOOT_CHANCE,
        }
    }

    pub fn with_strafe_chance(mut self, strafe_chance: f32) -> Self {
        self.strafe_chance = strafe_chance;
        self
    }

    pub fn with_patrol_chance(mut self, patrol_chance: f32) -> Self {
        self.patrol_chance = patrol_chance;
        self
    }

    pub fn with_bonus_loot_chance(mut self, bonus_loot_chance: f32) -> Self {
        self.bonus_loot_chance = bonus_loot_chance;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
