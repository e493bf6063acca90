//! Per-tick simulation update
//!
//! `tick` advances one session by one timestep, deterministically: same
//! state, same inputs, same `dt` always produce the same result. State
//! mutation completes fully before any render pass reads the state for
//! that tick.

use glam::Vec2;
use rand::Rng;

use super::collision::obstacle_hits;
use super::patterns::spawn_pattern;
use super::state::{GameEvent, GamePhase, ObstacleKind, Particle, RunState, MAX_PARTICLES};
use crate::approach;
use crate::consts::*;

/// Wall-impact particle color (laser red)
const IMPACT_COLOR: [f32; 4] = [0.937, 0.267, 0.267, 1.0];

/// Discrete key presses the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Advance Menu -> Tutorial -> Playing; retry from GameOver
    Confirm,
    /// Leave the game; honored in every phase
    Abort,
}

/// Discrete inputs for a single tick
///
/// Directional inputs move lane *targets*, never position; the craft's
/// continuous position relaxes toward the target over following ticks.
/// Every field is a one-shot: the runner clears them once consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    /// Up arrow: raise the vertical lane target
    pub climb: bool,
    /// Down arrow: lower the vertical lane target
    pub dive: bool,
    pub confirm: bool,
    pub abort: bool,
}

impl TickInput {
    /// Latch a key press into the matching one-shot flag
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => self.steer_left = true,
            Key::Right => self.steer_right = true,
            Key::Up => self.climb = true,
            Key::Down => self.dive = true,
            Key::Confirm => self.confirm = true,
            Key::Abort => self.abort = true,
        }
    }
}

/// Advance the session by one timestep
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) {
    // Abort works everywhere; the host decides what "exit" means.
    if input.abort {
        state.push_event(GameEvent::ExitRequested);
        return;
    }

    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.phase = GamePhase::Tutorial;
            }
            return;
        }
        GamePhase::Tutorial | GamePhase::GameOver => {
            if input.confirm {
                state.begin_run();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Clamp runaway frame times (backgrounded tab, debugger pause) so a
    // single tick can never skip obstacles past the collision window.
    let dt = dt.clamp(0.0, MAX_DT);

    // Lane inputs mutate targets only
    if input.steer_left {
        state.player.steer(-1);
    }
    if input.steer_right {
        state.player.steer(1);
    }
    if input.climb {
        state.player.shift_altitude(1);
    }
    if input.dive {
        state.player.shift_altitude(-1);
    }

    state.time_ticks += 1;

    // Speed ramps continuously, capped
    state.speed = (state.speed + ACCELERATION * dt).min(SPEED_MAX);
    let step = state.speed * dt;

    state.z_pos += step;
    state.score += step * SCORE_RATE;
    state.display_score = approach(state.display_score, state.score, DISPLAY_SCORE_RATE, dt);

    state.shake = (state.shake - SHAKE_DECAY * dt).max(0.0);
    state.player.tilt = approach(state.player.tilt, 0.0, TILT_RECOVERY, dt);

    // Smooth the craft toward its lane targets
    let target = state.player.target();
    state.player.x = approach(state.player.x, target.x, LANE_APPROACH_RATE, dt);
    state.player.y = approach(state.player.y, target.y, LANE_APPROACH_RATE, dt);

    // Pattern spawning is distance-driven, so faster runs get denser waves
    state.wave_timer += step;
    if state.wave_timer > WAVE_INTERVAL {
        spawn_pattern(state);
        state.wave_timer = 0.0;
    }

    advance_obstacles(state, step);
    update_particles(state, dt);

    if state.integrity <= 0.0 {
        state.integrity = 0.0;
        let final_score = state.score.floor() as u64;
        state.final_score = Some(final_score);
        state.push_event(GameEvent::Crashed { final_score });
        state.phase = GamePhase::GameOver;
        log::info!(
            "crashed at score {} after {} ticks",
            final_score,
            state.time_ticks
        );
    }
}

/// Move every obstacle toward the camera, resolve contacts, cull passed ones
fn advance_obstacles(state: &mut RunState, step: f32) {
    let mut obstacles = std::mem::take(&mut state.obstacles);
    obstacles.retain_mut(|obs| {
        obs.z -= step;
        if obs.z < -FOCAL_LENGTH {
            return false;
        }
        if !obstacle_hits(obs, state.player.x, state.player.y) {
            return true;
        }
        match obs.kind {
            ObstacleKind::Wall => {
                // Active shake debounces damage, so one gate can't drain
                // integrity across several ticks of contact.
                if state.shake <= 0.0 {
                    state.integrity -= WALL_DAMAGE;
                    state.speed = (state.speed * WALL_SLOWDOWN).max(SPEED_BASE);
                    state.combo = 0;
                    state.shake = SHAKE_MAX;
                    spawn_impact_burst(state);
                    state.push_event(GameEvent::WallImpact);
                }
                true
            }
            ObstacleKind::Data => {
                // Bonus uses the multiplier in effect before this pickup
                state.score += SHARD_BONUS * state.multiplier() as f32;
                state.combo += 1;
                state.top_combo = state.top_combo.max(state.combo);
                state.integrity = (state.integrity + SHARD_HEAL).min(100.0);
                state.push_event(GameEvent::ShardCollected { combo: state.combo });
                false
            }
        }
    });
    state.obstacles = obstacles;
}

/// Red debris burst at the impact point (screen-center offset space)
fn spawn_impact_burst(state: &mut RunState) {
    for _ in 0..IMPACT_PARTICLES {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let vel = Vec2::new(
            state.rng.random_range(-600.0..600.0),
            state.rng.random_range(-600.0..600.0),
        );
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel,
            life: 1.0,
            color: IMPACT_COLOR,
        });
    }
}

fn update_particles(state: &mut RunState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= PARTICLE_FADE * dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}
