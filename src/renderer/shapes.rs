//! Path tessellation into triangle lists
//!
//! Turns the immediate-mode path commands into `Vertex` triangles ready for
//! a GPU vertex buffer. Fills are fan-triangulated per subpath (entity
//! outlines are convex or close to it), strokes become thin quads.

use glam::Vec2;

use super::surface::Surface;
use super::vertex::Vertex;
use crate::palette::Color;

/// Line segments per flattened cubic Bézier
pub const BEZIER_SEGMENTS: u32 = 12;
/// Default stroke width in pixels
pub const STROKE_WIDTH: f32 = 1.0;

/// Point on a cubic Bézier at `t` in [0, 1]
pub fn cubic_bezier(p0: Vec2, cp1: Vec2, cp2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + cp1 * (3.0 * u * u * t) + cp2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Surface that accumulates triangles
#[derive(Debug, Clone)]
pub struct Tessellator {
    vertices: Vec<Vertex>,
    subpaths: Vec<Vec<Vec2>>,
    fill_color: [f32; 4],
    stroke_color: [f32; 4],
    pub stroke_width: f32,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            subpaths: Vec::new(),
            fill_color: [0.0, 0.0, 0.0, 1.0],
            stroke_color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: STROKE_WIDTH,
        }
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw vertex bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn current_point(&self) -> Option<Vec2> {
        self.subpaths.last().and_then(|s| s.last().copied())
    }

    /// Make sure there is an open subpath, starting it at `p` if not
    fn ensure_subpath(&mut self, p: Vec2) {
        if self.subpaths.is_empty() {
            self.subpaths.push(vec![p]);
        }
    }

    fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.vertices
            .extend([a, b, c].map(|p| Vertex::at(p, color)));
    }
}

impl Surface for Tessellator {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.vertices.clear();
        self.subpaths.clear();
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        self.subpaths.push(vec![p]);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ensure_subpath(p);
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.push(p);
        }
    }

    fn bezier_curve_to(&mut self, cp1: Vec2, cp2: Vec2, to: Vec2) {
        self.ensure_subpath(cp1);
        let start = self.current_point().unwrap_or(cp1);
        if let Some(subpath) = self.subpaths.last_mut() {
            for i in 1..=BEZIER_SEGMENTS {
                let t = i as f32 / BEZIER_SEGMENTS as f32;
                subpath.push(cubic_bezier(start, cp1, cp2, to, t));
            }
        }
    }

    fn close_path(&mut self) {
        let Some(first) = self.subpaths.last().and_then(|s| s.first().copied()) else {
            return;
        };
        if let Some(subpath) = self.subpaths.last_mut() {
            if subpath.len() > 1 && subpath.last() != Some(&first) {
                subpath.push(first);
            }
        }
        // A closed path continues from its starting point
        self.subpaths.push(vec![first]);
    }

    fn stroke(&mut self) {
        let half = self.stroke_width * 0.5;
        let color = self.stroke_color;
        let segments: Vec<(Vec2, Vec2)> = self
            .subpaths
            .iter()
            .flat_map(|s| s.windows(2).map(|w| (w[0], w[1])))
            .collect();

        for (a, b) in segments {
            let dir = (b - a).normalize_or_zero();
            if dir == Vec2::ZERO {
                continue;
            }
            let perp = Vec2::new(-dir.y, dir.x) * half;
            self.push_triangle(a + perp, a - perp, b + perp, color);
            self.push_triangle(b + perp, a - perp, b - perp, color);
        }
    }

    fn fill(&mut self) {
        let color = self.fill_color;
        let fans: Vec<Vec<Vec2>> = self
            .subpaths
            .iter()
            .filter(|s| s.len() >= 3)
            .cloned()
            .collect();

        for points in fans {
            let origin = points[0];
            for pair in points[1..].windows(2) {
                self.push_triangle(origin, pair[0], pair[1], color);
            }
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color.to_f32_array();
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color.to_f32_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(t: &mut Tessellator) {
        t.begin_path();
        t.move_to(Vec2::new(0.0, 0.0));
        t.line_to(Vec2::new(10.0, 0.0));
        t.line_to(Vec2::new(10.0, 10.0));
        t.line_to(Vec2::new(0.0, 10.0));
        t.close_path();
    }

    #[test]
    fn test_fill_square_is_fan() {
        let mut t = Tessellator::new();
        t.set_fill_color(Color::hex(0xff0000));
        square(&mut t);
        t.fill();
        // 5 points including the closing one: 3 fan triangles, the last degenerate
        assert_eq!(t.triangle_count(), 3);
        assert_eq!(t.vertices()[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_stroke_emits_quads() {
        let mut t = Tessellator::new();
        t.begin_path();
        t.move_to(Vec2::ZERO);
        t.line_to(Vec2::new(10.0, 0.0));
        t.stroke();
        assert_eq!(t.vertices().len(), 6);
        let ys: Vec<f32> = t.vertices().iter().map(|v| v.point().y).collect();
        assert!(ys.iter().all(|y| y.abs() == STROKE_WIDTH * 0.5));
    }

    #[test]
    fn test_zero_length_segment_skipped() {
        let mut t = Tessellator::new();
        t.begin_path();
        t.move_to(Vec2::ONE);
        t.line_to(Vec2::ONE);
        t.stroke();
        assert!(t.vertices().is_empty());
    }

    #[test]
    fn test_bezier_flattening_ends_on_target() {
        let p0 = Vec2::new(0.0, 0.0);
        let to = Vec2::new(30.0, 0.0);
        assert_eq!(cubic_bezier(p0, Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), to, 0.0), p0);
        assert_eq!(cubic_bezier(p0, Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), to, 1.0), to);

        let mut t = Tessellator::new();
        t.begin_path();
        t.move_to(p0);
        t.bezier_curve_to(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), to);
        t.stroke();
        assert_eq!(t.triangle_count(), BEZIER_SEGMENTS as usize * 2);
    }

    #[test]
    fn test_clear_and_bytes() {
        let mut t = Tessellator::new();
        square(&mut t);
        t.fill();
        assert_eq!(t.as_bytes().len(), t.vertices().len() * Vertex::SIZE);
        t.clear(100.0, 100.0);
        assert!(t.vertices().is_empty());
    }

    #[test]
    fn test_begin_path_drops_previous_subpaths() {
        let mut t = Tessellator::new();
        square(&mut t);
        t.begin_path();
        t.fill();
        assert!(t.vertices().is_empty());
    }
}
