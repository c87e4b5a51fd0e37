//! Entity simulation
//!
//! Everything here is host-agnostic and deterministic for a given seed:
//! - Randomness only through the `Rng` handed in by the caller
//! - Bounds passed in on every call, never stored by entities
//! - Stable iteration order (per type, then by index)

pub mod balloon;
pub mod confetti;
pub mod entity;
pub mod euler;
pub mod party;
pub mod ribbon;
pub mod vector;

pub use balloon::{Balloon, BalloonConfig};
pub use confetti::{Confetti, ConfettiConfig};
pub use entity::{Bounds, Entity};
pub use euler::EulerMass;
pub use party::Party;
pub use ribbon::{Ribbon, RibbonConfig};
pub use vector::VectorExt;
