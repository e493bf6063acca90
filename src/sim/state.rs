//! Game state and core simulation types
//!
//! The whole run lives in one explicit [`RunState`] owned by the engine
//! instance; there are no module-level singletons, so multiple concurrent
//! runs (e.g. in tests) cannot cross-contaminate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{lane_world_x, lane_world_y};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entry point; simulation not running
    Menu,
    /// Pilot manual screen; simulation not running
    Tutorial,
    /// Active run; the per-tick update executes every frame
    Playing,
    /// Run ended (integrity hit zero); final score retained
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Laser gate hazard; costs integrity on contact
    Wall,
    /// Collectible data shard; scores and heals
    Data,
}

/// An obstacle travelling toward the camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Horizontal lane placement, -1..=1
    pub lane_x: i32,
    /// Vertical lane placement, 0..=2
    pub lane_y: i32,
    /// Forward distance from the camera; decreases every tick
    pub z: f32,
    /// Lane columns spanned (1 or 3)
    pub width: i32,
}

/// The player craft: discrete lane targets plus smoothed world position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Target horizontal lane, -1..=1
    pub lane_x: i32,
    /// Target vertical lane, 0..=2
    pub lane_y: i32,
    /// Continuous world position, relaxing toward the lane targets
    pub x: f32,
    pub y: f32,
    /// Visual bank angle in degrees; decays toward 0
    pub tilt: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane_x: 0,
            lane_y: 0,
            x: 0.0,
            y: 0.0,
            tilt: 0.0,
        }
    }
}

impl Player {
    /// World-space position of the current lane target
    pub fn target(&self) -> Vec2 {
        Vec2::new(lane_world_x(self.lane_x), lane_world_y(self.lane_y))
    }

    /// Shift the horizontal lane target, clamped, banking the craft
    pub fn steer(&mut self, dir: i32) {
        self.lane_x = (self.lane_x + dir.signum()).clamp(LANE_X_MIN, LANE_X_MAX);
        self.tilt = TILT_IMPULSE * dir.signum() as f32;
    }

    /// Shift the vertical lane target, clamped
    pub fn shift_altitude(&mut self, dir: i32) {
        self.lane_y = (self.lane_y + dir.signum()).clamp(LANE_Y_MIN, LANE_Y_MAX);
    }
}

/// A particle for impact effects
///
/// Positions are screen-space offsets from the surface center, so the
/// simulation stays independent of surface dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time; removed at 0
    pub life: f32,
    pub color: [f32; 4],
}

/// Maximum particles retained at once
pub const MAX_PARTICLES: usize = 256;

/// Notable happenings in a tick, drained by the host for HUD/audio hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Hit a laser gate; combo lost
    WallImpact,
    /// Collected a data shard
    ShardCollected { combo: u32 },
    /// Integrity reached zero; emitted exactly once per run
    Crashed { final_score: u64 },
    /// The pilot asked to leave the game entirely
    ExitRequested,
}

/// Lagging snapshot of the values a HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub speed: u32,
    pub integrity: u32,
    pub combo: u32,
    pub multiplier: u32,
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Pattern/particle RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player craft
    pub player: Player,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Forward speed, within [SPEED_BASE, SPEED_MAX]
    pub speed: f32,
    /// Total forward distance travelled this run
    pub z_pos: f32,
    /// Shield integrity, 0-100
    pub integrity: f32,
    /// Internal score accumulator
    pub score: f32,
    /// Smoothed presentation score, lags `score`
    pub display_score: f32,
    /// Consecutive shards since the last wall hit
    pub combo: u32,
    /// Best combo this run
    pub top_combo: u32,
    /// Screen shake intensity; while > 0, wall damage is debounced
    pub shake: f32,
    /// Distance accumulator driving pattern spawns
    pub wave_timer: f32,
    /// Final score, captured once on the crash tick
    pub final_score: Option<u64>,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl RunState {
    /// Create a fresh session at the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            speed: SPEED_BASE,
            z_pos: 0.0,
            integrity: 100.0,
            score: 0.0,
            display_score: 0.0,
            combo: 0,
            top_combo: 0,
            shake: 0.0,
            wave_timer: 0.0,
            final_score: None,
            events: Vec::new(),
        }
    }

    /// Reset all run-scoped values and enter Playing (new run or retry)
    pub fn begin_run(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.particles.clear();
        self.speed = SPEED_BASE;
        self.z_pos = 0.0;
        self.integrity = 100.0;
        self.score = 0.0;
        self.display_score = 0.0;
        self.combo = 0;
        self.top_combo = 0;
        self.shake = 0.0;
        self.wave_timer = 0.0;
        self.final_score = None;
        self.phase = GamePhase::Playing;
    }

    /// Combo multiplier: one step per [`COMBO_STEP`] shards, capped
    pub fn multiplier(&self) -> u32 {
        (1 + self.combo / COMBO_STEP).min(MULTIPLIER_CAP)
    }

    /// Snapshot the HUD-facing values (floored presentation integers)
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.display_score.floor() as u64,
            speed: self.speed.floor() as u32,
            integrity: self.integrity.clamp(0.0, 100.0).floor() as u32,
            combo: self.combo,
            multiplier: self.multiplier(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_lane_clamping() {
        let mut player = Player::default();
        for _ in 0..10 {
            player.steer(1);
        }
        assert_eq!(player.lane_x, LANE_X_MAX);
        for _ in 0..10 {
            player.steer(-1);
        }
        assert_eq!(player.lane_x, LANE_X_MIN);

        for _ in 0..10 {
            player.shift_altitude(1);
        }
        assert_eq!(player.lane_y, LANE_Y_MAX);
        for _ in 0..10 {
            player.shift_altitude(-1);
        }
        assert_eq!(player.lane_y, LANE_Y_MIN);
    }

    #[test]
    fn test_steer_banks_the_craft() {
        let mut player = Player::default();
        player.steer(-1);
        assert_eq!(player.tilt, -TILT_IMPULSE);
        player.steer(1);
        assert_eq!(player.tilt, TILT_IMPULSE);
    }

    #[test]
    fn test_multiplier_law() {
        let mut state = RunState::new(7);
        let expected = [(0, 1), (4, 1), (5, 2), (9, 2), (10, 3), (20, 5), (25, 5), (100, 5)];
        for (combo, mult) in expected {
            state.combo = combo;
            assert_eq!(state.multiplier(), mult, "combo {combo}");
        }
    }

    #[test]
    fn test_begin_run_resets_everything() {
        let mut state = RunState::new(42);
        state.phase = GamePhase::GameOver;
        state.speed = 1800.0;
        state.integrity = 0.0;
        state.score = 12345.0;
        state.combo = 17;
        state.final_score = Some(12345);
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Wall,
            lane_x: 0,
            lane_y: 0,
            z: 100.0,
            width: 3,
        });

        state.begin_run();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.speed, SPEED_BASE);
        assert_eq!(state.integrity, 100.0);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.final_score, None);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = RunState::new(1);
        state.push_event(GameEvent::WallImpact);
        state.push_event(GameEvent::ShardCollected { combo: 1 });
        assert_eq!(state.drain_events().len(), 2);
        assert!(state.drain_events().is_empty());
    }
}
