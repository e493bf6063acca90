//! Procedural obstacle pattern generation
//!
//! Patterns are fixed templates of wall/shard placements appended ahead of
//! the player whenever the distance accumulator fires. Every template must
//! leave at least one lane cell free of walls per depth group, so no spawn
//! can force a collision.

use rand::Rng;

use super::state::{Obstacle, ObstacleKind, RunState};
use crate::consts::SPAWN_Z;

/// The four pattern shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Diagonal ascent of shard/wall pairs
    Stairs,
    /// Floor and ceiling gates with shards in the safe middle lane
    Tunnel,
    /// Alternating side gates with shards down the center
    Slalom,
    /// Full-width double gate forcing a climb to the open top lane
    WallOfDoom,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Stairs,
        PatternKind::Tunnel,
        PatternKind::Slalom,
        PatternKind::WallOfDoom,
    ];
}

fn wall(lane_x: i32, lane_y: i32, z: f32, width: i32) -> Obstacle {
    Obstacle {
        kind: ObstacleKind::Wall,
        lane_x,
        lane_y,
        z,
        width,
    }
}

fn shard(lane_x: i32, lane_y: i32, z: f32) -> Obstacle {
    Obstacle {
        kind: ObstacleKind::Data,
        lane_x,
        lane_y,
        z,
        width: 1,
    }
}

/// Build one pattern instance starting at depth `z_start`
pub fn build_pattern(kind: PatternKind, z_start: f32) -> Vec<Obstacle> {
    let mut out = Vec::new();
    match kind {
        PatternKind::Stairs => {
            for i in 0..3 {
                let z = z_start + i as f32 * 400.0;
                out.push(shard(-1 + i, i, z));
                out.push(wall(-1 + i, (i + 1) % 3, z, 1));
            }
        }
        PatternKind::Tunnel => {
            for i in 0..5 {
                let z = z_start + i as f32 * 500.0;
                out.push(wall(0, 0, z, 3)); // floor
                out.push(wall(0, 2, z, 3)); // ceiling
                out.push(shard(0, 1, z)); // safe middle
            }
        }
        PatternKind::Slalom => {
            for i in 0..6 {
                let z = z_start + i as f32 * 400.0;
                let lane = if i % 2 == 0 { -1 } else { 1 };
                out.push(wall(lane, 0, z, 1));
                out.push(shard(0, 0, z));
            }
        }
        PatternKind::WallOfDoom => {
            out.push(wall(0, 0, z_start, 3));
            out.push(wall(0, 1, z_start, 3));
            // Top lane open; reward just beyond the gate
            out.push(shard(0, 2, z_start + 500.0));
        }
    }
    out
}

/// Draw a pattern uniformly at random and append it at the spawn depth
pub fn spawn_pattern(state: &mut RunState) {
    let kind = PatternKind::ALL[state.rng.random_range(0..PatternKind::ALL.len())];
    log::debug!("spawning pattern {:?} at z={}", kind, SPAWN_Z);
    state.obstacles.extend(build_pattern(kind, SPAWN_Z));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANE_X_MAX, LANE_X_MIN, LANE_Y_MAX, LANE_Y_MIN};

    /// Does a wall cover the given lane cell?
    fn covers(obs: &Obstacle, lane_x: i32, lane_y: i32) -> bool {
        obs.lane_y == lane_y && (obs.width >= 3 || obs.lane_x == lane_x)
    }

    /// Group a pattern's obstacles by depth and verify each group leaves a
    /// wall-free lane cell.
    fn assert_safe_path(kind: PatternKind) {
        let obstacles = build_pattern(kind, 3500.0);
        let mut depths: Vec<f32> = obstacles.iter().map(|o| o.z).collect();
        depths.sort_by(|a, b| a.partial_cmp(b).unwrap());
        depths.dedup();

        for z in depths {
            let walls: Vec<_> = obstacles
                .iter()
                .filter(|o| o.kind == ObstacleKind::Wall && o.z == z)
                .collect();
            let mut free = 0;
            for lane_x in LANE_X_MIN..=LANE_X_MAX {
                for lane_y in LANE_Y_MIN..=LANE_Y_MAX {
                    if !walls.iter().any(|w| covers(w, lane_x, lane_y)) {
                        free += 1;
                    }
                }
            }
            assert!(free > 0, "{kind:?} blocks every lane at z={z}");
        }
    }

    #[test]
    fn test_every_pattern_leaves_a_safe_lane() {
        for kind in PatternKind::ALL {
            assert_safe_path(kind);
        }
    }

    #[test]
    fn test_shards_never_share_a_cell_with_walls() {
        // Generator invariant: the resolver never has to tie-break a shard
        // and a wall in the same cell at the same depth.
        for kind in PatternKind::ALL {
            let obstacles = build_pattern(kind, 3500.0);
            for shard in obstacles.iter().filter(|o| o.kind == ObstacleKind::Data) {
                let conflict = obstacles
                    .iter()
                    .filter(|o| o.kind == ObstacleKind::Wall && o.z == shard.z)
                    .any(|w| covers(w, shard.lane_x, shard.lane_y));
                assert!(!conflict, "{kind:?} puts a shard inside a wall");
            }
        }
    }

    #[test]
    fn test_patterns_stay_in_lane_bounds() {
        for kind in PatternKind::ALL {
            for obs in build_pattern(kind, 3500.0) {
                assert!((LANE_X_MIN..=LANE_X_MAX).contains(&obs.lane_x));
                assert!((LANE_Y_MIN..=LANE_Y_MAX).contains(&obs.lane_y));
                assert!(obs.width == 1 || obs.width == 3);
                assert!(obs.z >= 3500.0);
            }
        }
    }

    #[test]
    fn test_spawn_appends_at_depth() {
        let mut state = RunState::new(2024);

        let mut seen_walls = false;
        let mut seen_shards = false;
        for _ in 0..32 {
            state.obstacles.clear();
            spawn_pattern(&mut state);
            assert!(!state.obstacles.is_empty());
            seen_walls |= state.obstacles.iter().any(|o| o.kind == ObstacleKind::Wall);
            seen_shards |= state.obstacles.iter().any(|o| o.kind == ObstacleKind::Data);
            assert!(state.obstacles.iter().all(|o| o.z >= SPAWN_Z));
        }
        assert!(seen_walls && seen_shards);
    }
}
