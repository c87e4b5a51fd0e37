//! Falling, tumbling confetti squares

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Entity, spawn_age};
use crate::config::RandRange;
use crate::palette::{COLOR_PAIRS, ColorPair, random_pair};
use crate::renderer::Surface;

/// Confetti tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    /// Half-size of the square (pixels)
    pub size: f32,
    /// Horizontal oscillation speed
    pub osc: RandRange,
    /// Tumble speed (degrees/sec)
    pub rotation: RandRange,
    /// Horizontal drift speed (pixels/sec)
    pub x_speed: RandRange,
    /// Fall speed (pixels/sec)
    pub y_speed: RandRange,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            osc: RandRange::new(0.2, 0.5),
            rotation: RandRange::new(800.0, 600.0),
            x_speed: RandRange::new(30.0, 20.0),
            y_speed: RandRange::new(80.0, 60.0),
        }
    }
}

/// A two-sided square that falls, drifts and flips
#[derive(Debug, Clone)]
pub struct Confetti {
    pub config: ConfettiConfig,
    pub age: f32,
    pub pos: Vec2,
    pub size: f32,
    /// Spawn angle (radians) the corners were laid out from
    pub angle: f32,
    /// Accumulated tumble (degrees)
    pub rotation: f32,
    pub rot_speed: f32,
    pub osc_speed: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Cosine of the tumble: vertical foreshortening and visible face
    pub cos_a: f32,
    pub colors: ColorPair,
    /// Unit corner offsets, fixed at construction
    pub corners: [Vec2; 4],
}

impl Confetti {
    pub fn new<R: Rng + ?Sized>(config: ConfettiConfig, bounds: &Bounds, rng: &mut R) -> Self {
        let mut confetti = Self {
            config,
            age: 0.0,
            pos: Vec2::ZERO,
            size: config.size,
            angle: 0.0,
            rotation: 0.0,
            rot_speed: 0.0,
            osc_speed: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            cos_a: 1.0,
            colors: COLOR_PAIRS[0],
            corners: [Vec2::ZERO; 4],
        };
        confetti.reset(bounds, rng);

        // Corners stay at 45° offsets from the first spawn angle for life
        let angle = confetti.angle;
        confetti.corners = std::array::from_fn(|i| {
            let theta = angle + ((i as f32) * 90.0 + 45.0).to_radians();
            Vec2::new(theta.cos(), theta.sin())
        });
        confetti
    }

    /// Color of the face currently toward the viewer
    pub fn visible_color(&self) -> crate::palette::Color {
        if self.cos_a > 0.0 {
            self.colors.front
        } else {
            self.colors.back
        }
    }

    /// Corner `i` in surface space, foreshortened vertically by the tumble
    pub fn corner(&self, i: usize) -> Vec2 {
        let c = self.corners[i];
        Vec2::new(
            self.pos.x + c.x * self.size,
            self.pos.y + c.y * self.size * self.cos_a,
        )
    }
}

impl Entity for Confetti {
    fn age(&self) -> f32 {
        self.age
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn reset<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        let cfg = self.config;
        self.age = spawn_age(rng);
        self.pos = Vec2::new(rng.random::<f32>() * bounds.width, 0.0);
        self.size = cfg.size;
        self.cos_a = 1.0;

        self.speed_x = cfg.x_speed.sample(rng);
        self.speed_y = cfg.y_speed.sample(rng);

        self.angle = (rng.random::<f32>() * 360.0).to_radians();
        self.rotation = rng.random::<f32>() * 360.0;
        self.rot_speed = cfg.rotation.sample(rng);
        self.osc_speed = cfg.osc.sample(rng);

        self.colors = random_pair(rng);
    }

    fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: &Bounds, rng: &mut R) {
        self.age += dt;

        self.rotation += self.rot_speed * dt;
        self.cos_a = self.rotation.to_radians().cos();
        // Velocity-like term: drift range widens the longer it lives
        self.pos.x += (self.age * self.osc_speed).cos() * self.speed_x * dt;
        self.pos.y += self.speed_y * dt;

        if self.pos.y + self.size > bounds.height {
            log::trace!("Confetti recycled at x={:.1}", self.pos.x);
            self.reset(bounds, rng);
        }
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill_color(self.visible_color());

        surface.begin_path();
        surface.move_to(self.corner(0));
        for i in 0..4 {
            surface.line_to(self.corner(i));
        }
        surface.close_path();
        surface.fill();
    }
}
