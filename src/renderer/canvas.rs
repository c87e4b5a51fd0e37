//! HTML canvas 2D context as a drawing surface

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::surface::Surface;
use crate::palette::Color;

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, p: Vec2) {
        CanvasRenderingContext2d::move_to(self, p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Vec2) {
        CanvasRenderingContext2d::line_to(self, p.x as f64, p.y as f64);
    }

    fn bezier_curve_to(&mut self, cp1: Vec2, cp2: Vec2, to: Vec2) {
        CanvasRenderingContext2d::bezier_curve_to(
            self,
            cp1.x as f64,
            cp1.y as f64,
            cp2.x as f64,
            cp2.y as f64,
            to.x as f64,
            to.y as f64,
        );
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.set_stroke_style_str(&color.to_css());
    }
}
