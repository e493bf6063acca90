//! Proximity tests between the player craft and oncoming obstacles
//!
//! Hits are position-based against the player's smoothed world position,
//! not exact lane equality, with a forgiving tolerance band per axis. The
//! tolerances are world-space constants; collisions only occur inside the
//! narrow depth window, so the effective hit-box is depth-consistent.

use super::state::Obstacle;
use crate::consts::{COLLISION_Z_WINDOW, HIT_TOLERANCE_X, HIT_TOLERANCE_Y, LANE_WIDTH};
use crate::{lane_world_x, lane_world_y};

/// Is the obstacle within the depth window where contact can happen?
#[inline]
pub fn in_collision_window(z: f32) -> bool {
    z.abs() < COLLISION_Z_WINDOW
}

/// Does the obstacle's lane footprint overlap the player position?
///
/// An obstacle of `width` n spans n lane columns centered on `lane_x`;
/// the X band stretches across the whole span plus the tolerance.
pub fn overlaps_player(obs: &Obstacle, player_x: f32, player_y: f32) -> bool {
    let half_span = (obs.width - 1) as f32 / 2.0 * LANE_WIDTH;
    let center_x = lane_world_x(obs.lane_x);
    let hit_x = player_x > center_x - half_span - HIT_TOLERANCE_X
        && player_x < center_x + half_span + HIT_TOLERANCE_X;
    let hit_y = (lane_world_y(obs.lane_y) - player_y).abs() < HIT_TOLERANCE_Y;
    hit_x && hit_y
}

/// Full contact test: depth window plus lane overlap
#[inline]
pub fn obstacle_hits(obs: &Obstacle, player_x: f32, player_y: f32) -> bool {
    in_collision_window(obs.z) && overlaps_player(obs, player_x, player_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANE_HEIGHT, LANE_WIDTH};
    use crate::sim::state::ObstacleKind;

    fn obstacle(lane_x: i32, lane_y: i32, z: f32, width: i32) -> Obstacle {
        Obstacle {
            kind: ObstacleKind::Wall,
            lane_x,
            lane_y,
            z,
            width,
        }
    }

    #[test]
    fn test_depth_window() {
        assert!(in_collision_window(0.0));
        assert!(in_collision_window(79.0));
        assert!(in_collision_window(-79.0));
        assert!(!in_collision_window(80.0));
        assert!(!in_collision_window(-200.0));
    }

    #[test]
    fn test_same_lane_hits() {
        let obs = obstacle(1, 2, 0.0, 1);
        assert!(overlaps_player(&obs, LANE_WIDTH, 2.0 * LANE_HEIGHT));
    }

    #[test]
    fn test_tolerance_band_is_forgiving() {
        let obs = obstacle(0, 0, 0.0, 1);
        // Partway through a lane change still counts as contact
        assert!(overlaps_player(&obs, HIT_TOLERANCE_X - 1.0, 0.0));
        assert!(!overlaps_player(&obs, HIT_TOLERANCE_X + 1.0, 0.0));
        assert!(overlaps_player(&obs, 0.0, HIT_TOLERANCE_Y - 1.0));
        assert!(!overlaps_player(&obs, 0.0, HIT_TOLERANCE_Y + 1.0));
    }

    #[test]
    fn test_adjacent_lane_misses() {
        let obs = obstacle(-1, 0, 0.0, 1);
        assert!(!overlaps_player(&obs, lane_world_x(1), 0.0));
        let obs = obstacle(0, 0, 0.0, 1);
        assert!(!overlaps_player(&obs, 0.0, lane_world_y(2)));
    }

    #[test]
    fn test_full_width_wall_spans_all_columns() {
        let gate = obstacle(0, 0, 0.0, 3);
        for lane_x in -1..=1 {
            assert!(overlaps_player(&gate, lane_world_x(lane_x), 0.0));
        }
        // Wrong altitude still dodges it
        assert!(!overlaps_player(&gate, 0.0, lane_world_y(1)));
    }

    #[test]
    fn test_contact_needs_window_and_overlap() {
        let near = obstacle(0, 0, 40.0, 1);
        let far = obstacle(0, 0, 500.0, 1);
        assert!(obstacle_hits(&near, 0.0, 0.0));
        assert!(!obstacle_hits(&far, 0.0, 0.0));
        assert!(!obstacle_hits(&near, lane_world_x(1) + HIT_TOLERANCE_X, 0.0));
    }
}
