//! Immediate-mode drawing surface
//!
//! Entities emit path commands in a fixed order; a surface decides what to
//! do with them (record, tessellate, or forward to an HTML canvas).

use glam::Vec2;

use crate::palette::Color;

/// Write-only vector drawing target
pub trait Surface {
    /// Wipe the `width` x `height` area starting at the origin
    fn clear(&mut self, width: f32, height: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn bezier_curve_to(&mut self, cp1: Vec2, cp2: Vec2, to: Vec2);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);

    /// Set fill and stroke to the same color
    fn set_color(&mut self, color: Color) {
        self.set_fill_color(color);
        self.set_stroke_color(color);
    }
}

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierCurveTo { cp1: Vec2, cp2: Vec2, to: Vec2 },
    ClosePath,
    Stroke,
    Fill,
    FillColor(Color),
    StrokeColor(Color),
}

/// Surface that records every command in order
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `Fill` commands recorded
    pub fn fill_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill))
    }

    /// Number of `Stroke` commands recorded
    pub fn stroke_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke))
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn bezier_curve_to(&mut self, cp1: Vec2, cp2: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::BezierCurveTo { cp1, cp2, to });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let mut rec = CommandRecorder::new();
        rec.set_color(Color::hex(0x112233));
        rec.begin_path();
        rec.move_to(Vec2::ZERO);
        rec.line_to(Vec2::X);
        rec.close_path();
        rec.fill();

        assert_eq!(
            rec.commands,
            vec![
                DrawCommand::FillColor(Color::hex(0x112233)),
                DrawCommand::StrokeColor(Color::hex(0x112233)),
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(Vec2::ZERO),
                DrawCommand::LineTo(Vec2::X),
                DrawCommand::ClosePath,
                DrawCommand::Fill,
            ]
        );
        assert_eq!(rec.fill_count(), 1);
        assert_eq!(rec.stroke_count(), 0);

        rec.clear_commands();
        assert!(rec.is_empty());
    }
}
