//! Deformable planet terrain for GRAVWAR.
//!
//! A planet surface is a closed polygon of radius samples taken at a fixed
//! angular resolution around the planet center. This crate answers
//! intersection queries against that polygon and applies the crater and
//! deposit mutations triggered by explosions.

pub use gravwar_core as core;

pub mod geometry;
pub mod surface;

// Re-export key types for convenience.
pub use geometry::{circle_intersects_triangle, ray_circle, RayHit};
pub use surface::{bucket_for_degrees, PlanetSurface, SmokePuff};

#[cfg(test)]
mod tests;
