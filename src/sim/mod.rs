//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt` per tick, fixed timestep under the runner
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod patterns;
pub mod project;
pub mod runner;
pub mod state;
pub mod tick;

pub use collision::{in_collision_window, obstacle_hits, overlaps_player};
pub use patterns::{build_pattern, spawn_pattern, PatternKind};
pub use project::{Camera, ScreenPoint};
pub use runner::Runner;
pub use state::{
    GameEvent, GamePhase, HudSnapshot, Obstacle, ObstacleKind, Particle, Player, RunState,
    MAX_PARTICLES,
};
pub use tick::{tick, Key, TickInput};
