//! Neon Drift - a lane-based pseudo-3D endless runner engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projection, patterns, collisions, game state)
//! - `render`: Drawing-surface abstraction and the scene pass
//! - `settings`: Quality/accessibility preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest delta time accepted per frame (tab-background recovery guard)
    pub const MAX_DT: f32 = 0.1;

    /// Lane grid: horizontal lanes are -1..=1, vertical lanes 0..=2
    pub const LANE_X_MIN: i32 = -1;
    pub const LANE_X_MAX: i32 = 1;
    pub const LANE_Y_MIN: i32 = 0;
    pub const LANE_Y_MAX: i32 = 2;
    /// World-space spacing between adjacent horizontal lanes
    pub const LANE_WIDTH: f32 = 150.0;
    /// World-space spacing between adjacent vertical lanes
    pub const LANE_HEIGHT: f32 = 120.0;

    /// Pinhole camera focal length
    pub const FOCAL_LENGTH: f32 = 380.0;
    /// Screen-space horizon line
    pub const HORIZON_Y: f32 = 250.0;
    /// Extra screen-space drop below the horizon for the lane plane
    pub const VERTICAL_OFFSET: f32 = 70.0;
    /// World height the projection treats as eye level
    pub const LANE_REFERENCE_Y: f32 = 100.0;

    /// Forward speed bounds (world units/sec)
    pub const SPEED_BASE: f32 = 900.0;
    pub const SPEED_MAX: f32 = 2200.0;
    /// Constant forward acceleration (world units/sec^2)
    pub const ACCELERATION: f32 = 12.0;

    /// Score gained per world unit travelled
    pub const SCORE_RATE: f32 = 0.1;
    /// Bonus per data shard, before the combo multiplier
    pub const SHARD_BONUS: f32 = 500.0;
    /// Integrity restored per data shard
    pub const SHARD_HEAL: f32 = 5.0;
    /// Display score approach rate (per second)
    pub const DISPLAY_SCORE_RATE: f32 = 6.0;

    /// Integrity lost per wall hit
    pub const WALL_DAMAGE: f32 = 30.0;
    /// Multiplicative speed penalty on a wall hit
    pub const WALL_SLOWDOWN: f32 = 0.6;
    /// Screen shake set on a wall hit; also the damage-debounce timer
    pub const SHAKE_MAX: f32 = 0.8;
    /// Shake decay (per second)
    pub const SHAKE_DECAY: f32 = 3.0;

    /// Highest combo multiplier
    pub const MULTIPLIER_CAP: u32 = 5;
    /// Shards per multiplier step
    pub const COMBO_STEP: u32 = 5;

    /// Forward distance at which patterns spawn
    pub const SPAWN_Z: f32 = 3500.0;
    /// Distance travelled between pattern spawns
    pub const WAVE_INTERVAL: f32 = 2500.0;

    /// Half-depth of the collision proximity window around the player
    pub const COLLISION_Z_WINDOW: f32 = 80.0;
    /// Forgiving world-space hit tolerance, per axis
    pub const HIT_TOLERANCE_X: f32 = 80.0;
    pub const HIT_TOLERANCE_Y: f32 = 70.0;

    /// Lane interpolation rate for the player craft (per second)
    pub const LANE_APPROACH_RATE: f32 = 10.0;
    /// Visual bank impulse on lateral input (degrees)
    pub const TILT_IMPULSE: f32 = 20.0;
    /// Tilt recovery rate (per second)
    pub const TILT_RECOVERY: f32 = 5.0;

    /// Particles spawned per wall impact
    pub const IMPACT_PARTICLES: usize = 20;
    /// Particle fade rate (life/sec)
    pub const PARTICLE_FADE: f32 = 3.0;
}

/// World-space x coordinate of a horizontal lane index
#[inline]
pub fn lane_world_x(lane_x: i32) -> f32 {
    lane_x as f32 * consts::LANE_WIDTH
}

/// World-space y coordinate of a vertical lane index
#[inline]
pub fn lane_world_y(lane_y: i32) -> f32 {
    lane_y as f32 * consts::LANE_HEIGHT
}

/// Exponential approach of `current` toward `target` at `rate` per second
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}
