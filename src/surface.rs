// Drawing contract between the particle field and whatever hosts it.
// The browser host implements it over a 2D canvas context (see canvas.rs);
// RecordingSurface keeps the primitives in memory instead.

use crate::color::Color;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, opacity: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, opacity: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        opacity: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        opacity: f64,
    },
}

#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, opacity: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            opacity,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, opacity: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            opacity,
        });
    }
}
