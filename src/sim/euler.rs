//! Point mass advanced by Euler integration
//!
//! Used for every trailing particle of a ribbon chain.

use glam::Vec2;

/// A point mass with accumulated force and velocity-proportional drag
#[derive(Debug, Clone)]
pub struct EulerMass {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Force accumulated since the last `integrate`
    pub force: Vec2,
    pub mass: f32,
    pub drag: f32,
}

impl EulerMass {
    pub fn new(pos: Vec2, mass: f32, drag: f32) -> Self {
        Self {
            pos,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass,
            drag,
        }
    }

    /// Accumulate an external force for the current step
    #[inline]
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Accumulated force minus drag (`drag * mass * speed`, opposing velocity)
    pub fn current_force(&self) -> Vec2 {
        let speed = self.velocity.length();
        self.force - self.velocity * (self.drag * self.mass * speed)
    }

    /// Advance one step of `dt` seconds.
    ///
    /// Position moves with the velocity from before this step's acceleration
    /// is applied. Accumulated force is cleared afterwards.
    pub fn integrate(&mut self, dt: f32) {
        let accel = self.current_force() / self.mass;

        self.pos += self.velocity * dt;
        self.velocity += accel * dt;
        self.force = Vec2::ZERO;
    }
}
