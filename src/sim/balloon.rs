//! Rising balloons with a wobbling string

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Entity, spawn_age};
use crate::config::RandRange;
use crate::palette::{COLORS, Color, WHITE_HIGHLIGHT, WHITE_STRING, random_color};
use crate::renderer::Surface;

/// Half-width of the knot triangle under the balloon
const KNOT_SIZE: f32 = 3.0;

/// Balloon tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub width: f32,
    pub height: f32,
    /// Rise speed (pixels/sec)
    pub y_speed: RandRange,
    pub osc_speed: RandRange,
    pub osc_dist: RandRange,
    pub string_length: f32,
    pub string_osc_speed: RandRange,
    pub string_osc_dist: RandRange,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 100.0,
            y_speed: RandRange::new(100.0, 80.0),
            osc_speed: RandRange::new(10.0, 10.0),
            osc_dist: RandRange::new(10.0, 10.0),
            string_length: 120.0,
            string_osc_speed: RandRange::new(20.0, 1.0),
            string_osc_dist: RandRange::new(2.0, 1.0),
        }
    }
}

/// A balloon rising from below the visible area.
///
/// `pos` is the top of the balloon body. The string hangs from the body's
/// bottom tip as a cubic Bézier whose control points are rebuilt each frame.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub config: BalloonConfig,
    pub age: f32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed_y: f32,
    pub osc_speed: f32,
    pub osc_dist: f32,
    pub string_length: f32,
    pub string_osc_speed: f32,
    pub string_osc_dist: f32,
    pub string_cp1: Vec2,
    pub string_cp2: Vec2,
    pub color: Color,
}

impl Balloon {
    pub fn new<R: Rng + ?Sized>(config: BalloonConfig, bounds: &Bounds, rng: &mut R) -> Self {
        let mut balloon = Self {
            config,
            age: 0.0,
            pos: Vec2::ZERO,
            width: config.width,
            height: config.height,
            speed_y: 0.0,
            osc_speed: 0.0,
            osc_dist: 0.0,
            string_length: config.string_length,
            string_osc_speed: 0.0,
            string_osc_dist: 0.0,
            string_cp1: Vec2::ZERO,
            string_cp2: Vec2::ZERO,
            color: COLORS[0],
        };
        balloon.reset(bounds, rng);
        balloon
    }

    /// Bottom tip of the body, where the string is tied
    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.height)
    }

    /// Loose end of the string
    pub fn string_end(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.height + self.string_length)
    }

    /// Hang the string control points at 1/3 and 2/3 of its length below the body
    fn hang_string(&mut self) {
        let top = self.pos.y + self.height;
        self.string_cp1.y = top + self.string_length * 0.33;
        self.string_cp2.y = top + self.string_length * 0.66;
    }

    /// True once the balloon and its string are entirely above the surface
    pub fn is_gone(&self) -> bool {
        self.pos.y < -self.height - self.string_length
    }

    fn draw_body<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.width, self.height);
        let mid_y = y + h * 0.7;
        let mid_left = Vec2::new(x - w * 0.35, mid_y);
        let mid_right = Vec2::new(x + w * 0.35, mid_y);

        surface.set_color(self.color);
        surface.begin_path();
        surface.move_to(self.pos);
        surface.bezier_curve_to(
            Vec2::new(x - w / 2.0, y),
            Vec2::new(x - w * 0.6, y + h * 0.45),
            mid_left,
        );
        surface.line_to(self.bottom());
        surface.line_to(mid_right);
        surface.bezier_curve_to(
            Vec2::new(x + w * 0.6, y + h * 0.45),
            Vec2::new(x + w / 2.0, y),
            self.pos,
        );
        surface.close_path();
        surface.stroke();
        surface.fill();
    }

    fn draw_string<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_color(WHITE_STRING);
        surface.begin_path();
        surface.move_to(self.bottom());
        surface.bezier_curve_to(self.string_cp1, self.string_cp2, self.string_end());
        surface.stroke();
    }

    fn draw_knot<S: Surface + ?Sized>(&self, surface: &mut S) {
        let tip = self.bottom();
        surface.set_color(self.color);
        surface.begin_path();
        surface.move_to(tip);
        surface.line_to(tip + Vec2::new(-KNOT_SIZE, KNOT_SIZE));
        surface.line_to(tip + Vec2::new(KNOT_SIZE, KNOT_SIZE));
        surface.line_to(tip);
        surface.close_path();
        surface.stroke();
        surface.fill();
    }

    fn draw_highlight<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (w, h) = (self.width, self.height);
        let outer = Vec2::new(self.pos.x - w * 0.33, self.pos.y + h * 0.28);
        let inner = Vec2::new(self.pos.x - w * 0.18, self.pos.y + h * 0.1);

        surface.set_color(WHITE_HIGHLIGHT);
        surface.begin_path();
        surface.move_to(outer);
        surface.bezier_curve_to(
            outer - Vec2::new(w * 0.05, h * 0.05),
            Vec2::new(inner.x - w * 0.1, inner.y),
            inner,
        );
        surface.bezier_curve_to(
            inner + Vec2::new(w * 0.05, h * 0.05),
            Vec2::new(outer.x + w * 0.1, outer.y),
            outer,
        );
        surface.close_path();
        surface.fill();
    }
}

impl Entity for Balloon {
    fn age(&self) -> f32 {
        self.age
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn reset<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        let cfg = self.config;
        self.age = spawn_age(rng);
        self.pos = Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * cfg.height * 2.0 + bounds.height,
        );
        self.width = cfg.width;
        self.height = cfg.height;
        self.speed_y = cfg.y_speed.sample(rng);
        self.osc_speed = cfg.osc_speed.sample(rng);
        self.osc_dist = cfg.osc_dist.sample(rng);

        self.string_length = cfg.string_length;
        self.string_osc_speed = cfg.string_osc_speed.sample(rng);
        self.string_osc_dist = cfg.string_osc_dist.sample(rng);
        self.string_cp1.x = self.pos.x;
        self.string_cp2.x = self.pos.x;
        self.hang_string();
        self.color = random_color(rng);
    }

    fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: &Bounds, rng: &mut R) {
        self.age += dt;

        // Rise, and wobble sideways. The wobble accumulates like a velocity,
        // so its reach grows over the balloon's lifetime.
        let old_x = self.pos.x;
        self.pos.y -= self.speed_y * dt;
        self.pos.x += (self.age + dt * self.osc_speed).cos() * self.osc_dist * dt;
        let x_diff = self.pos.x - old_x;

        // String follows the body one frame behind, plus its own wiggle
        let string_osc =
            (self.age + dt * self.string_osc_speed).cos() * self.string_osc_dist * dt;
        self.string_cp1.x += string_osc + x_diff;
        self.string_cp2.x = self.pos.x + (self.pos.x - self.string_cp1.x);
        self.hang_string();

        if self.is_gone() {
            log::trace!("Balloon recycled at x={:.1}", self.pos.x);
            self.reset(bounds, rng);
        }
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.draw_body(surface);
        self.draw_string(surface);
        self.draw_knot(surface);
        self.draw_highlight(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shapes::cubic_bezier;
    use crate::renderer::{CommandRecorder, DrawCommand};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn(seed: u64, bounds: &Bounds) -> (Balloon, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let b = Balloon::new(BalloonConfig::default(), bounds, &mut rng);
        (b, rng)
    }

    #[test]
    fn test_new_draws_only_through_reset() {
        let bounds = Bounds::new(640.0, 480.0);
        let (built, _) = spawn(11, &bounds);
        let mut again = built.clone();
        let mut rng = Pcg32::seed_from_u64(11);
        again.reset(&bounds, &mut rng);
        assert_eq!(again.pos, built.pos);
        assert_eq!(again.age, built.age);
        assert_eq!(again.color, built.color);
    }

    #[test]
    fn test_spawns_below_visible_area() {
        let bounds = Bounds::new(640.0, 480.0);
        for seed in 0..20 {
            let (b, _) = spawn(seed, &bounds);
            assert!(b.pos.y >= 480.0 && b.pos.y <= 480.0 + 200.0);
            assert!((0.0..=640.0).contains(&b.pos.x));
            assert!(COLORS.contains(&b.color));
            let top = b.pos.y + b.height;
            assert_eq!(b.string_cp1, Vec2::new(b.pos.x, top + b.string_length * 0.33));
            assert_eq!(b.string_cp2, Vec2::new(b.pos.x, top + b.string_length * 0.66));
        }
    }

    #[test]
    fn test_rises() {
        let bounds = Bounds::new(640.0, 480.0);
        let (mut b, mut rng) = spawn(1, &bounds);
        let y = b.pos.y;
        b.update(0.1, &bounds, &mut rng);
        assert!((b.pos.y - (y - b.speed_y * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_string_control_points_track_body() {
        let bounds = Bounds::new(640.0, 480.0);
        let (mut b, mut rng) = spawn(2, &bounds);
        for _ in 0..30 {
            b.update(0.016, &bounds, &mut rng);
            // Reflected about the balloon's x
            let mirror = b.pos.x - b.string_cp1.x;
            assert!((b.string_cp2.x - b.pos.x - mirror).abs() < 1e-3);
            let top = b.pos.y + b.height;
            assert!((b.string_cp1.y - (top + b.string_length * 0.33)).abs() < 1e-3);
            assert!((b.string_cp2.y - (top + b.string_length * 0.66)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_string_couples_to_body_drift() {
        let bounds = Bounds::new(640.0, 480.0);
        let (mut b, mut rng) = spawn(3, &bounds);
        b.string_osc_dist = 0.0;
        let cp1_x = b.string_cp1.x;
        let x = b.pos.x;
        b.update(0.05, &bounds, &mut rng);
        assert!((b.string_cp1.x - cp1_x - (b.pos.x - x)).abs() < 1e-4);
    }

    #[test]
    fn test_recycles_after_leaving_top() {
        let bounds = Bounds::new(400.0, 500.0);
        let (mut b, mut rng) = spawn(4, &bounds);
        let mut recycled = false;
        for _ in 0..5000 {
            let before = b.pos.y;
            b.update(0.016, &bounds, &mut rng);
            if b.pos.y > before {
                recycled = true;
                assert!(b.pos.y >= 500.0 && b.pos.y <= 500.0 + 2.0 * b.config.height);
                break;
            }
            assert!(!b.is_gone());
        }
        assert!(recycled);
    }

    #[test]
    fn test_recycled_string_hangs_below_surface() {
        let bounds = Bounds::new(400.0, 500.0);
        let (mut b, mut rng) = spawn(4, &bounds);
        for _ in 0..5000 {
            let before = b.pos.y;
            b.update(0.016, &bounds, &mut rng);
            if b.pos.y > before {
                break;
            }
        }
        // The frame drawn right after recycling keeps the whole string offscreen
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let p = cubic_bezier(b.bottom(), b.string_cp1, b.string_cp2, b.string_end(), t);
            assert!(p.y >= bounds.height, "string point at t={t} is at y={}", p.y);
        }
    }

    #[test]
    fn test_tolerates_shrinking_bounds() {
        let (mut b, mut rng) = spawn(5, &Bounds::new(1000.0, 1000.0));
        let small = Bounds::new(0.0, 0.0);
        for _ in 0..2000 {
            b.update(0.016, &small, &mut rng);
            assert!(b.pos.is_finite());
        }
    }

    #[test]
    fn test_draw_layers() {
        let bounds = Bounds::new(640.0, 480.0);
        let (b, _) = spawn(6, &bounds);
        let mut rec = CommandRecorder::new();
        b.draw(&mut rec);

        // Body, knot and highlight fill; body, string and knot stroke
        assert_eq!(rec.fill_count(), 3);
        assert_eq!(rec.stroke_count(), 3);
        assert_eq!(rec.commands[0], DrawCommand::FillColor(b.color));
        assert!(rec.commands.contains(&DrawCommand::BezierCurveTo {
            cp1: b.string_cp1,
            cp2: b.string_cp2,
            to: b.string_end(),
        }));
        assert!(rec.commands.contains(&DrawCommand::FillColor(WHITE_HIGHLIGHT)));
        assert_eq!(rec.commands.last(), Some(&DrawCommand::Fill));
    }
}
