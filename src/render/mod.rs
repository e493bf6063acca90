//! Rendering decoupled from any graphics API
//!
//! The scene pass emits primitive draw calls through [`DrawSurface`], so the
//! engine can target a real raster surface in production and a recording
//! double in tests. Nothing in here mutates simulation state.

pub mod recording;
pub mod scene;

pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

/// RGBA color, components 0-1
pub type Color = [f32; 4];

/// Neon palette
pub mod palette {
    use super::Color;

    pub const NIGHT: Color = [0.059, 0.020, 0.094, 1.0];
    pub const HORIZON: Color = [0.290, 0.016, 0.306, 1.0];
    pub const GRID_PINK: Color = [0.910, 0.475, 0.976, 0.3];
    pub const RAIL_FAINT: Color = [0.910, 0.475, 0.976, 0.1];
    pub const RAIL_CYAN: Color = [0.133, 0.827, 0.933, 1.0];
    pub const SUN: Color = [0.937, 0.435, 0.424, 1.0];
    pub const LASER_RED: Color = [0.937, 0.267, 0.267, 1.0];
    pub const SHARD_CYAN: Color = [0.133, 0.827, 0.933, 1.0];
    pub const JET_MAGENTA: Color = [0.851, 0.275, 0.937, 1.0];
    pub const HULL_DARK: Color = [0.059, 0.090, 0.165, 1.0];
    pub const HULL_OUTLINE: Color = [0.0, 0.941, 1.0, 1.0];
    pub const COCKPIT_WHITE: Color = [1.0, 1.0, 1.0, 1.0];

    /// Replace a color's alpha
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha]
    }
}

/// Primitive draw calls the scene pass needs
pub trait DrawSurface {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Outline a closed polygon (default: one line per edge)
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32) {
        for i in 0..points.len() {
            let next = (i + 1) % points.len();
            self.line(points[i], points[next], color, width);
        }
    }
}
