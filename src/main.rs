//! Neon Drift entry point
//!
//! Headless demo driver: an autopilot flies a full session against the
//! deterministic engine, logging HUD state and scene stats, then records
//! the run on the local leaderboard. Pass a seed as the first argument
//! for a reproducible run.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use neon_drift::consts::{COLLISION_Z_WINDOW, SIM_DT};
use neon_drift::render::{scene, RecordingSurface};
use neon_drift::sim::{GameEvent, GamePhase, Key, Obstacle, ObstacleKind, RunState, Runner};
use neon_drift::{HighScores, Settings};

const SETTINGS_PATH: &str = "neon-drift-settings.json";
const SCORES_PATH: &str = "neon-drift-scores.json";

/// Longest demo session, in ticks (three simulated minutes at 120 Hz)
const MAX_TICKS: u64 = 120 * 180;
/// How far ahead the autopilot scans for threats and shards
const LOOKAHEAD_Z: f32 = 1200.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(now_ms);
    log::info!("Neon Drift demo starting (seed {seed})");

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let mut runner = Runner::new(seed, 1280.0, 720.0);
    runner.start();

    // Through the menu and pilot manual into the run
    runner.press(Key::Confirm);
    runner.frame(SIM_DT);
    runner.press(Key::Confirm);
    runner.frame(SIM_DT);

    let mut surface = RecordingSurface::new();
    let mut final_score = None;

    'session: while runner.state().time_ticks < MAX_TICKS {
        if let Some(key) = autopilot(runner.state()) {
            runner.press(key);
        }
        runner.frame(SIM_DT);

        for event in runner.drain_events() {
            match event {
                GameEvent::Crashed { final_score: score } => {
                    final_score = Some(score);
                    break 'session;
                }
                GameEvent::WallImpact => log::debug!("wall impact"),
                GameEvent::ShardCollected { combo } => {
                    log::debug!("shard collected (combo {combo})")
                }
                GameEvent::ExitRequested => break 'session,
            }
        }

        // Once per simulated second: HUD line plus a headless render pass
        if runner.state().time_ticks % 120 == 0 {
            surface.reset();
            scene::draw(&mut surface, runner.state(), runner.camera(), &settings);
            let hud = runner.hud();
            log::info!(
                "score {:06}  speed {} km/h  integrity {:3}%  combo x{}  ({} draw calls)",
                hud.score,
                hud.speed,
                hud.integrity,
                hud.multiplier,
                surface.commands.len()
            );
        }
    }
    runner.stop();

    let score = final_score.unwrap_or_else(|| runner.state().score.floor() as u64);
    let top_combo = runner.state().top_combo;
    log::info!("session over: score {score}, best combo {top_combo}");

    let scores_path = Path::new(SCORES_PATH);
    let mut scores = HighScores::load(scores_path);
    match scores.add_score(score, top_combo, now_ms()) {
        Some(rank) => log::info!("leaderboard rank #{rank}"),
        None => log::info!("score did not make the leaderboard"),
    }
    if let Err(err) = scores.save(scores_path) {
        log::warn!("failed to save leaderboard: {err}");
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Does a wall's lane footprint include the given cell?
fn wall_covers(wall: &Obstacle, lane_x: i32, lane_y: i32) -> bool {
    wall.lane_y == lane_y && (wall.width >= 3 || wall.lane_x == lane_x)
}

/// Pick one lane input steering toward the cheapest nearby lane cell
///
/// Cost per cell: travel distance, plus a penalty per threatening wall
/// weighted by how close it is, minus a bonus for reachable shards.
fn autopilot(state: &RunState) -> Option<Key> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let ahead: Vec<&Obstacle> = state
        .obstacles
        .iter()
        .filter(|o| o.z > COLLISION_Z_WINDOW && o.z < LOOKAHEAD_Z)
        .collect();

    let player = &state.player;
    let mut best = (player.lane_x, player.lane_y);
    let mut best_cost = f32::MAX;
    for lane_x in -1..=1 {
        for lane_y in 0..=2 {
            let mut cost =
                ((lane_x - player.lane_x).abs() + (lane_y - player.lane_y).abs()) as f32;
            for obs in &ahead {
                match obs.kind {
                    ObstacleKind::Wall if wall_covers(obs, lane_x, lane_y) => {
                        cost += 100.0 * (1.0 - obs.z / LOOKAHEAD_Z);
                    }
                    ObstacleKind::Data if obs.lane_x == lane_x && obs.lane_y == lane_y => {
                        cost -= 2.0;
                    }
                    _ => {}
                }
            }
            if cost < best_cost {
                best_cost = cost;
                best = (lane_x, lane_y);
            }
        }
    }

    // One discrete press per frame, vertical dodges first
    if best.1 > player.lane_y {
        Some(Key::Up)
    } else if best.1 < player.lane_y {
        Some(Key::Down)
    } else if best.0 < player.lane_x {
        Some(Key::Left)
    } else if best.0 > player.lane_x {
        Some(Key::Right)
    } else {
        None
    }
}
