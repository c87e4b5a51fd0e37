//! Vector helpers on top of `glam::Vec2`
//!
//! `Vec2` already covers length, equality and the in-place arithmetic the
//! entities need. What it doesn't have is the zero-vector policy used by the
//! ribbon chain: normalizing zero is a no-op in place, and a fresh
//! normalized copy of zero falls back to `(1, 1)`.

use glam::Vec2;

pub trait VectorExt {
    /// Squared length, skipping the square root
    fn squared_length(self) -> f32;

    /// Normalize in place. Leaves a zero vector untouched.
    fn normalize_in_place(&mut self);

    /// Unit-length copy, or `(1, 1)` for the zero vector
    fn normalized_or_one(self) -> Vec2;
}

impl VectorExt for Vec2 {
    #[inline]
    fn squared_length(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    fn normalize_in_place(&mut self) {
        let sqr_len = self.squared_length();
        if sqr_len != 0.0 {
            *self *= 1.0 / sqr_len.sqrt();
        }
    }

    #[inline]
    fn normalized_or_one(self) -> Vec2 {
        let sqr_len = self.squared_length();
        if sqr_len != 0.0 {
            self * (1.0 / sqr_len.sqrt())
        } else {
            Vec2::ONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_vector_policies() {
        let mut v = Vec2::ZERO;
        v.normalize_in_place();
        assert_eq!(v, Vec2::ZERO);
        assert_eq!(Vec2::ZERO.normalized_or_one(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_normalize_in_place() {
        let mut v = Vec2::new(3.0, 4.0);
        v.normalize_in_place();
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_leaves_source() {
        let v = Vec2::new(0.0, -5.0);
        let n = v.normalized_or_one();
        assert_eq!(v, Vec2::new(0.0, -5.0));
        assert_eq!(n, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_squared_length() {
        assert_eq!(Vec2::new(3.0, 4.0).squared_length(), 25.0);
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_scalar_ops_apply_to_both_components() {
        let mut v = Vec2::new(2.0, -6.0);
        v *= 1.5;
        assert_eq!(v, Vec2::new(3.0, -9.0));
        v /= 3.0;
        assert_eq!(v, Vec2::new(1.0, -3.0));
        v += Vec2::new(1.0, 1.0);
        v -= Vec2::new(0.5, 0.5);
        assert_eq!(v, Vec2::new(1.5, -2.5));
    }

    proptest! {
        #[test]
        fn normalized_has_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
            let n = Vec2::new(x, y).normalized_or_one();
            prop_assert!((n.length() - 1.0).abs() < 1e-4);

            let mut m = Vec2::new(x, y);
            m.normalize_in_place();
            prop_assert!((m.length() - 1.0).abs() < 1e-4);
        }
    }
}
