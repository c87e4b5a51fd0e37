//! Drawing surfaces
//!
//! Entities draw through the [`Surface`] trait. The crate ships a command
//! recorder, a triangle tessellator for GPU upload, and (on wasm32) the
//! HTML canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use shapes::Tessellator;
pub use surface::{CommandRecorder, DrawCommand, Surface};
pub use vertex::Vertex;
