//! Entity lifecycle shared by every party entity
//!
//! Entities are never destroyed. They are built once, then recycled through
//! `reset` whenever they leave the visible area in their direction of travel.

use glam::Vec2;
use rand::Rng;

use crate::consts::MAX_START_AGE;
use crate::renderer::Surface;

/// Drawable region, owned by the driver and lent to entities each call.
///
/// Entity positions are surface-local: x in `[0, width]`, y in `[0, height]`,
/// y growing downward. `top`/`left`/`bottom`/`right` locate the surface on
/// the host page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_rect(0.0, 0.0, width, height)
    }

    /// Bounds from a host rectangle. Negative or NaN sizes collapse to zero.
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            width,
            height,
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }
}

/// Fresh randomized age for a (re)spawned entity
#[inline]
pub fn spawn_age<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * MAX_START_AGE
}

/// Reset/update/draw contract of a party entity
pub trait Entity {
    /// Time alive, in simulation seconds (randomized at reset)
    fn age(&self) -> f32;

    /// Current anchor position (confetti center, balloon top, ribbon head)
    fn position(&self) -> Vec2;

    /// Re-randomize every kinematic parameter and move to the spawn edge
    fn reset<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R);

    /// Advance by `dt` seconds. Recycling is checked last.
    fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: &Bounds, rng: &mut R);

    /// Emit drawing commands for the current state
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::from_rect(10.0, 20.0, 300.0, 200.0);
        assert_eq!(b.right, 310.0);
        assert_eq!(b.bottom, 220.0);
        assert_eq!(Bounds::new(5.0, 6.0).left, 0.0);
    }

    #[test]
    fn test_bounds_reject_bad_sizes() {
        let b = Bounds::from_rect(0.0, 0.0, -50.0, f32::NAN);
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
        assert!(!b.bottom.is_nan());
    }
}
