//! The scene pass: synthwave backdrop, projected grid, obstacles, craft,
//! particles
//!
//! Reads simulation state only; every world point goes through
//! [`Camera::project`] so rendering and collision can never disagree about
//! the lane-to-screen mapping. Obstacles draw back-to-front.

use glam::Vec2;
use std::f32::consts::PI;

use super::{palette, DrawSurface};
use crate::consts::{HORIZON_Y, LANE_WIDTH, SIM_DT};
use crate::settings::Settings;
use crate::sim::project::Camera;
use crate::sim::state::{Obstacle, ObstacleKind, RunState};
use crate::{lane_world_x, lane_world_y};

/// Screen size of an obstacle at unit scale
const OBSTACLE_SIZE: f32 = 120.0;
/// Screen-space amplitude of shake jitter
const SHAKE_AMPLITUDE: f32 = 25.0;

/// Render one frame of the session
pub fn draw(
    surface: &mut impl DrawSurface,
    state: &RunState,
    camera: &Camera,
    settings: &Settings,
) {
    let time_secs = state.time_ticks as f32 * SIM_DT;
    let center = Vec2::new(camera.center_x(), camera.height / 2.0);
    let shake = shake_offset(state, settings);

    surface.clear(palette::NIGHT);
    draw_backdrop(surface, camera, shake);
    draw_grid(surface, state, camera, shake);

    for obs in depth_sorted(&state.obstacles) {
        draw_obstacle(surface, obs, camera, time_secs, shake);
    }

    draw_craft(surface, state, camera, time_secs, shake);
    draw_particles(surface, state, settings, center);
}

/// Deterministic shake jitter; respects the reduced-motion preference
fn shake_offset(state: &RunState, settings: &Settings) -> Vec2 {
    if state.shake <= 0.0 || !settings.effective_screen_shake() {
        return Vec2::ZERO;
    }
    // Hash the tick counter so the jitter needs no RNG state
    let hash = (state.time_ticks as u32).wrapping_mul(2654435761);
    let jx = (hash % 1000) as f32 / 1000.0 - 0.5;
    let jy = (hash / 1000 % 1000) as f32 / 1000.0 - 0.5;
    Vec2::new(jx, jy) * state.shake * SHAKE_AMPLITUDE
}

/// References sorted far-to-near so nearer obstacles paint over farther ones
fn depth_sorted(obstacles: &[Obstacle]) -> Vec<&Obstacle> {
    let mut sorted: Vec<&Obstacle> = obstacles.iter().collect();
    sorted.sort_by(|a, b| b.z.partial_cmp(&a.z).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

fn draw_backdrop(surface: &mut impl DrawSurface, camera: &Camera, shake: Vec2) {
    let cx = camera.center_x();
    let sun_y = HORIZON_Y - 50.0;

    surface.fill_circle(Vec2::new(cx, sun_y) + shake, 180.0, palette::SUN);
    // Retro scanline slats across the lower half of the sun
    for j in 0..10 {
        surface.fill_rect(
            Vec2::new(cx - 200.0, sun_y + 20.0 + j as f32 * 14.0) + shake,
            Vec2::new(400.0, 2.0 + j as f32 * 2.0),
            palette::NIGHT,
        );
    }

    surface.fill_rect(
        Vec2::new(0.0, HORIZON_Y) + shake,
        Vec2::new(camera.width, camera.height - HORIZON_Y),
        palette::HORIZON,
    );
}

fn draw_grid(surface: &mut impl DrawSurface, state: &RunState, camera: &Camera, shake: Vec2) {
    // Cross lines scroll with travelled distance
    let offset = state.z_pos % 200.0;
    let mut z = 0.0;
    while z < 3000.0 {
        let ez = z - offset;
        if ez >= 0.0 {
            let left = camera.project(-1500.0, 0.0, ez);
            let right = camera.project(1500.0, 0.0, ez);
            surface.line(
                Vec2::new(left.x, left.y) + shake,
                Vec2::new(right.x, right.y) + shake,
                palette::GRID_PINK,
                2.0,
            );
        }
        z += 100.0;
    }

    // Lane rails, canyon edges highlighted
    for x in -2..=2_i32 {
        let wx = x as f32 * LANE_WIDTH * 1.5;
        let far = camera.project(wx, 0.0, 3000.0);
        let near = camera.project(wx, 0.0, 0.0);
        let color = if x.abs() >= 2 {
            palette::RAIL_CYAN
        } else {
            palette::RAIL_FAINT
        };
        surface.line(
            Vec2::new(far.x, far.y) + shake,
            Vec2::new(near.x, near.y) + shake,
            color,
            2.0,
        );
    }
}

fn draw_obstacle(
    surface: &mut impl DrawSurface,
    obs: &Obstacle,
    camera: &Camera,
    time_secs: f32,
    shake: Vec2,
) {
    let p = camera.project(lane_world_x(obs.lane_x), lane_world_y(obs.lane_y), obs.z);
    let at = Vec2::new(p.x, p.y) + shake;
    let size = OBSTACLE_SIZE * p.scale;

    match obs.kind {
        ObstacleKind::Wall => {
            let w = size * obs.width as f32;
            let h = size * 0.8;
            let top = at.y - h;

            // Gate frame
            surface.line(
                Vec2::new(at.x - w / 2.0, top),
                Vec2::new(at.x + w / 2.0, top),
                palette::LASER_RED,
                5.0 * p.scale,
            );
            surface.line(
                Vec2::new(at.x - w / 2.0, at.y),
                Vec2::new(at.x + w / 2.0, at.y),
                palette::LASER_RED,
                5.0 * p.scale,
            );
            // Inner laser strands
            for k in 1..4 {
                let x = at.x - w / 2.0 + (w / 4.0) * k as f32;
                surface.line(
                    Vec2::new(x, top),
                    Vec2::new(x, at.y),
                    palette::with_alpha(palette::LASER_RED, 0.6),
                    2.0 * p.scale,
                );
            }
            surface.fill_circle(Vec2::new(at.x, at.y - h / 2.0), 10.0 * p.scale, palette::LASER_RED);
        }
        ObstacleKind::Data => {
            // Spinning shard diamond
            let rot = time_secs * 3.0;
            let mut points = [Vec2::ZERO; 4];
            for (k, point) in points.iter_mut().enumerate() {
                let angle = rot + k as f32 * PI / 2.0;
                let r = if k % 2 == 0 { size / 2.0 } else { size / 4.0 };
                *point = Vec2::new(
                    at.x + angle.cos() * r,
                    at.y - size / 2.0 + angle.sin() * r,
                );
            }
            surface.fill_polygon(&points, palette::SHARD_CYAN);
        }
    }
}

fn draw_craft(
    surface: &mut impl DrawSurface,
    state: &RunState,
    camera: &Camera,
    time_secs: f32,
    shake: Vec2,
) {
    let player = &state.player;
    let p = camera.project(player.x, player.y, 0.0);
    let origin = Vec2::new(p.x, p.y - 30.0 * p.scale) + shake;
    // Bank from input tilt plus the remaining slide toward the lane target
    let bank_deg = player.tilt + (player.target().x - player.x) * 0.05;
    let bank = bank_deg * PI / 180.0;

    let place = |local: Vec2| -> Vec2 {
        let scaled = local * p.scale;
        let rotated = Vec2::new(
            scaled.x * bank.cos() - scaled.y * bank.sin(),
            scaled.x * bank.sin() + scaled.y * bank.cos(),
        );
        origin + rotated
    };

    // Jet plume flickers with the tick counter
    let flicker = ((time_secs * 40.0).sin() * 0.5 + 0.5) * 20.0;
    let jet = [
        place(Vec2::new(-10.0, 0.0)),
        place(Vec2::new(10.0, 0.0)),
        place(Vec2::new(0.0, 40.0 + flicker)),
    ];
    surface.fill_polygon(&jet, palette::JET_MAGENTA);

    let hull: Vec<Vec2> = [
        Vec2::new(0.0, -50.0), // nose
        Vec2::new(20.0, -10.0),
        Vec2::new(50.0, 20.0), // right wing
        Vec2::new(20.0, 20.0),
        Vec2::new(0.0, 10.0), // tail
        Vec2::new(-20.0, 20.0),
        Vec2::new(-50.0, 20.0), // left wing
        Vec2::new(-20.0, -10.0),
    ]
    .into_iter()
    .map(place)
    .collect();
    surface.fill_polygon(&hull, palette::HULL_DARK);
    surface.stroke_polygon(&hull, palette::HULL_OUTLINE, 3.0);

    let cockpit = [
        place(Vec2::new(0.0, -30.0)),
        place(Vec2::new(5.0, -10.0)),
        place(Vec2::new(-5.0, -10.0)),
    ];
    surface.fill_polygon(&cockpit, palette::COCKPIT_WHITE);
}

fn draw_particles(
    surface: &mut impl DrawSurface,
    state: &RunState,
    settings: &Settings,
    center: Vec2,
) {
    let cap = settings.max_particles();
    for particle in state.particles.iter().rev().take(cap) {
        surface.fill_circle(
            center + particle.pos,
            4.0,
            palette::with_alpha(particle.color, particle.life.clamp(0.0, 1.0)),
        );
    }
}
