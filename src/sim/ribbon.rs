//! Streamer ribbons: a kinematic head dragging a chain of Euler masses
//!
//! Each frame runs three separate passes over the trailing particles:
//! 1. pull every particle toward its predecessor (force only, no movement)
//! 2. integrate all of them
//! 3. snap each one back to exactly `length` from its predecessor
//!
//! The passes must not be fused: a force must never see a neighbor that has
//! already moved this frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Bounds, Entity, spawn_age};
use super::euler::EulerMass;
use super::vector::VectorExt;
use crate::config::RandRange;
use crate::palette::{COLOR_PAIRS, ColorPair, random_pair};
use crate::renderer::Surface;
use crate::{midpoint, side};

/// Ribbon tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Number of chain particles
    pub pieces: usize,
    /// Distance between neighboring particles
    pub length: f32,
    /// Ribbon width (length of the edge offset)
    pub width: f32,
    /// Edge offset angle (degrees)
    pub angle: f32,
    pub mass: f32,
    pub drag: f32,
    /// Fall speed (pixels/sec)
    pub y_speed: RandRange,
    /// Scales the pull the head exerts on the chain
    pub velocity: RandRange,
    pub osc_speed: RandRange,
    pub osc_dist: RandRange,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            pieces: 30,
            length: 8.0,
            width: 8.0,
            angle: 45.0,
            mass: 1.0,
            drag: 0.05,
            y_speed: RandRange::new(100.0, 60.0),
            velocity: RandRange::new(4.0, 2.0),
            osc_speed: RandRange::new(2.0, 2.0),
            osc_dist: RandRange::new(40.0, 40.0),
        }
    }
}

impl RibbonConfig {
    /// Length of the fully extended chain
    pub fn chain_length(&self) -> f32 {
        self.length * self.pieces as f32
    }
}

#[derive(Debug, Clone)]
pub struct Ribbon {
    pub config: RibbonConfig,
    pub age: f32,
    /// Head position, driven directly
    pub pos: Vec2,
    /// Head position last frame (an owned copy)
    pub prev_pos: Vec2,
    /// Offset from the centerline edge to the far edge
    pub offset: Vec2,
    pub velocity: f32,
    pub speed_y: f32,
    pub osc_speed: f32,
    pub osc_dist: f32,
    pub colors: ColorPair,
    /// Chain particles; index 0 is pinned to the head
    pub particles: Vec<EulerMass>,
}

impl Ribbon {
    pub fn new<R: Rng + ?Sized>(config: RibbonConfig, bounds: &Bounds, rng: &mut R) -> Self {
        let mut ribbon = Self {
            config,
            age: 0.0,
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            offset: Vec2::ZERO,
            velocity: 0.0,
            speed_y: 0.0,
            osc_speed: 0.0,
            osc_dist: 0.0,
            colors: COLOR_PAIRS[0],
            particles: Vec::with_capacity(config.pieces),
        };
        ribbon.reset(bounds, rng);
        ribbon
    }

    /// Pull, integrate, then re-project the trailing particles
    fn step_chain(&mut self, dt: f32, pull: f32) {
        let length = self.config.length;
        let particles = &mut self.particles;

        for i in 1..particles.len() {
            let mut dir = particles[i - 1].pos - particles[i].pos;
            dir.normalize_in_place();
            dir *= pull;
            particles[i].add_force(dir);
        }

        for particle in particles.iter_mut().skip(1) {
            particle.integrate(dt);
        }

        for i in 1..particles.len() {
            let anchor = particles[i - 1].pos;
            let mut link = particles[i].pos - anchor;
            link.normalize_in_place();
            link *= length;
            particles[i].pos = anchor + link;
        }
    }

    fn draw_segment<S: Surface + ?Sized>(&self, surface: &mut S, i: usize) {
        let last = self.particles.len() - 2;
        let this = self.particles[i].pos;
        let next = self.particles[i + 1].pos;
        let p1 = this + self.offset;
        let p2 = next + self.offset;

        if side(this, next, p1) < 0.0 {
            surface.set_color(self.colors.front);
        } else {
            surface.set_color(self.colors.back);
        }

        surface.begin_path();
        surface.move_to(this);
        surface.line_to(next);

        // The two end segments get a notch cut into them
        if i == 0 || i == last {
            let notch = if i == 0 {
                midpoint(next, p2)
            } else {
                midpoint(this, p1)
            };
            surface.line_to(notch);
            surface.close_path();
            surface.stroke();
            surface.fill();

            surface.begin_path();
            surface.move_to(p2);
            surface.line_to(p1);
            surface.line_to(notch);
        } else {
            surface.line_to(p2);
            surface.line_to(p1);
        }

        surface.close_path();
        surface.stroke();
        surface.fill();
    }
}

impl Entity for Ribbon {
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
        self.prev_pos = self.pos;
        let angle = cfg.angle.to_radians();
        self.offset = Vec2::new(angle.cos(), angle.sin()) * cfg.width;

        self.velocity = cfg.velocity.sample(rng);
        self.speed_y = cfg.y_speed.sample(rng);
        self.osc_speed = cfg.osc_speed.sample(rng);
        self.osc_dist = cfg.osc_dist.sample(rng);

        self.colors = random_pair(rng);

        // Chain starts hanging straight up from the head, off-screen
        let head = self.pos;
        self.particles.clear();
        self.particles.extend((0..cfg.pieces).map(|i| {
            EulerMass::new(
                Vec2::new(head.x, head.y - i as f32 * cfg.length),
                cfg.mass,
                cfg.drag,
            )
        }));
    }

    fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: &Bounds, rng: &mut R) {
        // The pull force divides by dt
        if dt == 0.0 {
            return;
        }

        self.age += dt * self.osc_speed;
        self.pos.y += self.speed_y * dt;
        self.pos.x += self.age.cos() * self.osc_dist * dt;
        if let Some(head) = self.particles.first_mut() {
            head.pos = self.pos;
        }

        let diff = (self.prev_pos - self.pos).length();
        self.prev_pos = self.pos;
        let pull = diff / dt * self.velocity;
        self.step_chain(dt, pull);

        if self.pos.y > bounds.height + self.config.chain_length() {
            log::trace!("Ribbon recycled at x={:.1}", self.pos.x);
            self.reset(bounds, rng);
        }
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for i in 0..self.particles.len().saturating_sub(1) {
            self.draw_segment(surface, i);
        }
    }
}
