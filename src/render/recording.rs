//! Recording surface for headless render tests

use glam::Vec2;

use super::{Color, DrawSurface};

/// One captured primitive call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
}

/// A [`DrawSurface`] that records every call instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Count of commands matching a predicate
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }
}
