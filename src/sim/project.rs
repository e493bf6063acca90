//! Pinhole camera projection
//!
//! Single source of truth for the world (x, y, z) -> screen mapping. Both
//! the render pass and any lane-to-screen reasoning go through [`Camera::project`]
//! so they can never disagree.

use serde::{Deserialize, Serialize};

use crate::consts::{FOCAL_LENGTH, HORIZON_Y, LANE_REFERENCE_Y, VERTICAL_OFFSET};

/// A projected point: screen position plus perspective scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// `FOCAL_LENGTH / (FOCAL_LENGTH + z)`; 1.0 at the camera plane
    pub scale: f32,
}

/// Camera constants plus the current render surface dimensions
///
/// Resizing changes only where world points land on the surface; world
/// coordinates and simulation state are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Update surface dimensions (window resize); nothing else changes
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Project a world point to the surface
    ///
    /// Callers must cull points behind the camera (`z < -FOCAL_LENGTH`)
    /// before projecting; the tick does this for every obstacle.
    #[inline]
    pub fn project(&self, x: f32, y: f32, z: f32) -> ScreenPoint {
        let scale = FOCAL_LENGTH / (FOCAL_LENGTH + z);
        ScreenPoint {
            x: self.center_x() + x * scale,
            y: HORIZON_Y + VERTICAL_OFFSET + (LANE_REFERENCE_Y - y) * scale,
            scale,
        }
    }
}
