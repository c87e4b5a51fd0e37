//! OK Party - confetti, balloons and ribbons for any 2D canvas
//!
//! Core modules:
//! - `sim`: Entity simulation (vector math, Euler masses, per-entity physics, driver)
//! - `renderer`: Drawing surfaces (command recorder, tessellator, HTML canvas)
//! - `config`: Data-driven tuning for every entity type
//! - `palette`: Immutable color tables

pub mod config;
pub mod palette;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, Density, EntityCounts, PartyConfig, RandRange};
pub use palette::{Color, ColorPair};
pub use renderer::{CommandRecorder, DrawCommand, Surface, Tessellator};
pub use sim::{Balloon, Bounds, Confetti, Entity, EulerMass, Party, Ribbon, VectorExt};

/// Party-wide constants
pub mod consts {
    /// Largest frame delta (seconds) the driver will feed into entities.
    /// Keeps a backgrounded tab from launching everything off-screen at once.
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Upper bound of the randomized starting age, so identical entities
    /// don't oscillate in lockstep
    pub const MAX_START_AGE: f32 = 100.0;

    /// Default entity counts
    pub const DEFAULT_CONFETTI_COUNT: usize = 200;
    pub const DEFAULT_BALLOON_COUNT: usize = 2;
    pub const DEFAULT_RIBBON_COUNT: usize = 6;

    /// Stacking order of the overlay canvas unless the host picks one
    pub const DEFAULT_Z_INDEX: i32 = 1_000_001;
}

/// Cross product sign of `c` relative to the line through `b` and `a`.
///
/// Negative means `c` lies on the "front" side when walking from `b` to `a`.
#[inline]
pub fn side(a: glam::Vec2, b: glam::Vec2, c: glam::Vec2) -> f32 {
    (a.x - b.x) * (c.y - b.y) - (a.y - b.y) * (c.x - b.x)
}

/// Midpoint of two points
#[inline]
pub fn midpoint(a: glam::Vec2, b: glam::Vec2) -> glam::Vec2 {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_side_sign() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 10.0);
        // Walking from b up to a, +x is on one side, -x on the other
        assert!(side(a, b, Vec2::new(-5.0, 5.0)) < 0.0);
        assert!(side(a, b, Vec2::new(5.0, 5.0)) > 0.0);
        assert_eq!(side(a, b, Vec2::new(0.0, 3.0)), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Vec2::new(2.0, 4.0), Vec2::new(4.0, 8.0));
        assert_eq!(m, Vec2::new(3.0, 6.0));
    }
}
