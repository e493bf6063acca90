//! Engine instance with an explicit lifecycle
//!
//! [`Runner`] wraps a [`RunState`] behind `start`/`stop`/`reset` so any
//! scheduler can drive it: a display-refresh callback in production, a
//! plain loop in tests. `frame` converts measured wall-clock deltas into
//! fixed [`SIM_DT`] substeps; `stop` is the liveness guard that makes a
//! leaked frame callback harmless.

use super::project::Camera;
use super::state::{GameEvent, GamePhase, HudSnapshot, RunState};
use super::tick::{tick, Key, TickInput};
use crate::consts::{MAX_DT, MAX_SUBSTEPS, SIM_DT};

/// A complete engine instance: session state, camera, and frame pacing
#[derive(Debug, Clone)]
pub struct Runner {
    state: RunState,
    camera: Camera,
    accumulator: f32,
    input: TickInput,
    running: bool,
}

impl Runner {
    /// Create a stopped engine sized to the given surface
    pub fn new(seed: u64, surface_width: f32, surface_height: f32) -> Self {
        Self {
            state: RunState::new(seed),
            camera: Camera::new(surface_width, surface_height),
            accumulator: 0.0,
            input: TickInput::default(),
            running: false,
        }
    }

    /// Subscribe to frames; idempotent
    pub fn start(&mut self) {
        if !self.running {
            log::info!("engine started (seed {})", self.state.seed);
            self.running = true;
        }
    }

    /// Unsubscribe from frames; idempotent. Pending time and latched
    /// inputs are discarded so a later `start` resumes cleanly.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("engine stopped at tick {}", self.state.time_ticks);
        }
        self.running = false;
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    /// Rebuild the session from a seed, back at the menu. Camera and
    /// running flag are preserved.
    pub fn reset(&mut self, seed: u64) {
        self.state = RunState::new(seed);
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Latch a discrete key press for the next substep
    pub fn press(&mut self, key: Key) {
        self.input.press(key);
    }

    /// Advance by a measured wall-clock delta (seconds)
    ///
    /// No-op while stopped. The delta is clamped, accumulated, and spent
    /// in fixed [`SIM_DT`] substeps (at most [`MAX_SUBSTEPS`] per frame);
    /// one-shot inputs are consumed by the first substep only.
    pub fn frame(&mut self, real_dt: f32) {
        if !self.running {
            return;
        }
        self.accumulator += real_dt.clamp(0.0, MAX_DT);
        // Shed backlog beyond one frame's worth of substeps, otherwise a
        // sustained stall would be replayed as a fast-forward burst once
        // the frame rate recovers.
        let budget = MAX_SUBSTEPS as f32 * SIM_DT;
        self.accumulator = self.accumulator.min(budget);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.input = TickInput::default();
        }
    }

    /// Update the render surface dimensions; simulation state is untouched
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// HUD-facing values; safe to sample at any cadence
    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    /// Take all events since the last drain (crash and exit included)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPEED_BASE;

    /// Drive a fresh runner through the menus into Playing
    fn playing_runner(seed: u64) -> Runner {
        let mut runner = Runner::new(seed, 800.0, 600.0);
        runner.start();
        runner.press(Key::Confirm);
        runner.frame(SIM_DT);
        runner.press(Key::Confirm);
        runner.frame(SIM_DT);
        assert_eq!(runner.phase(), GamePhase::Playing);
        runner
    }

    #[test]
    fn test_stopped_runner_is_inert() {
        let mut runner = Runner::new(1, 800.0, 600.0);
        runner.press(Key::Confirm);
        runner.frame(1.0);
        assert_eq!(runner.phase(), GamePhase::Menu);
        assert_eq!(runner.state().time_ticks, 0);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut runner = Runner::new(1, 800.0, 600.0);
        runner.start();
        runner.start();
        assert!(runner.is_running());
        runner.stop();
        runner.stop();
        assert!(!runner.is_running());

        // Stop then start resumes without a burst of pending time
        runner.start();
        runner.frame(SIM_DT / 4.0);
        assert_eq!(runner.state().time_ticks, 0);
    }

    #[test]
    fn test_fixed_timestep_accumulation() {
        let mut runner = playing_runner(7);
        let before = runner.state().time_ticks;
        runner.frame(2.5 * SIM_DT);
        assert_eq!(runner.state().time_ticks, before + 2);
        // The half-step remainder carries into the next frame
        runner.frame(0.6 * SIM_DT);
        assert_eq!(runner.state().time_ticks, before + 3);
    }

    #[test]
    fn test_substep_cap_bounds_catchup() {
        let mut runner = playing_runner(7);
        let before = runner.state().time_ticks;
        runner.frame(10.0); // absurd frame gap
        assert!(runner.state().time_ticks - before <= crate::consts::MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_sustained_stall_sheds_backlog() {
        // A long stretch of 5 FPS frames, then the frame rate recovers.
        // Each slow frame runs the capped substep count and the leftover
        // time is discarded, so the first fast frame must not replay a
        // backlog burst.
        let mut runner = playing_runner(7);
        for _ in 0..60 {
            runner.frame(0.2);
        }
        let before = runner.state().time_ticks;
        runner.frame(0.001);
        assert!(
            runner.state().time_ticks - before <= 1,
            "tiny frame fast-forwarded {} substeps off the backlog",
            runner.state().time_ticks - before
        );
    }

    #[test]
    fn test_one_shot_input_consumed_once() {
        let mut runner = playing_runner(7);
        runner.press(Key::Left);
        runner.frame(4.0 * SIM_DT);
        // Four substeps ran, but the press steered exactly one lane
        assert_eq!(runner.state().player.lane_x, -1);
    }

    #[test]
    fn test_resize_leaves_simulation_untouched() {
        // Scenario: window resize mid-session
        let mut runner = playing_runner(13);
        for _ in 0..30 {
            runner.frame(SIM_DT);
        }
        let state_before = runner.state().clone();

        runner.resize(2560.0, 1440.0);

        let state_after = runner.state();
        assert_eq!(runner.camera().width, 2560.0);
        assert_eq!(state_after.speed, state_before.speed);
        assert_eq!(state_after.integrity, state_before.integrity);
        assert_eq!(state_after.score, state_before.score);
        assert_eq!(state_after.obstacles.len(), state_before.obstacles.len());
        assert_eq!(state_after.player.lane_x, state_before.player.lane_x);
        assert_eq!(state_after.player.x, state_before.player.x);
    }

    #[test]
    fn test_reset_returns_to_menu() {
        let mut runner = playing_runner(19);
        for _ in 0..60 {
            runner.frame(SIM_DT);
        }
        runner.reset(99);
        assert_eq!(runner.phase(), GamePhase::Menu);
        assert_eq!(runner.state().speed, SPEED_BASE);
        assert_eq!(runner.state().time_ticks, 0);
        assert!(runner.is_running(), "reset keeps the frame subscription");
    }

    #[test]
    fn test_hud_matches_state() {
        let mut runner = playing_runner(3);
        for _ in 0..120 {
            runner.frame(SIM_DT);
        }
        let hud = runner.hud();
        assert_eq!(hud.integrity, 100);
        assert_eq!(hud.multiplier, 1);
        assert!(hud.speed >= SPEED_BASE as u32);
        assert_eq!(hud.score, runner.state().display_score.floor() as u64);
    }
}
