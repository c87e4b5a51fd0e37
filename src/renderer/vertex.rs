//! Tessellator output vertex

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Position + straight-alpha RGBA, `#[repr(C)]` so a `&[Vertex]` can be
/// handed to a GPU buffer as raw bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes per vertex in a packed buffer
    pub const SIZE: usize = std::mem::size_of::<Vertex>();

    #[inline]
    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: p.to_array(),
            color,
        }
    }

    pub fn point(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        assert_eq!(Vertex::SIZE, 24);
        let v = Vertex::at(Vec2::new(1.0, 2.0), [0.1, 0.2, 0.3, 0.4]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 0.1, 0.2, 0.3, 0.4]);
        assert_eq!(v.point(), Vec2::new(1.0, 2.0));
    }
}
