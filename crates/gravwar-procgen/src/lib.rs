//! Procedural planet profiles for GRAVWAR.
//!
//! Produces the radius samples a `PlanetSurface` is built from. The
//! planetary method is the default; the fractal profile is kept as a
//! smoother, deterministic alternative.

pub mod fractal;
pub mod planetary;

use glam::Vec2;
use rand::Rng;

use gravwar_terrain::PlanetSurface;

pub use fractal::{fractal_profile, FractalParams};
pub use planetary::{planetary_profile, PlanetaryParams};

/// Profile generator selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileMethod {
    Planetary(PlanetaryParams),
    Fractal(FractalParams),
}

impl Default for ProfileMethod {
    fn default() -> Self {
        ProfileMethod::Planetary(PlanetaryParams::default())
    }
}

/// Generate a planet surface with the default planetary method.
pub fn generate_surface<R: Rng + ?Sized>(center: Vec2, sealevel: f32, rng: &mut R) -> PlanetSurface {
    generate_surface_with(ProfileMethod::default(), center, sealevel, rng)
}

/// Generate a planet surface with an explicit method.
pub fn generate_surface_with<R: Rng + ?Sized>(
    method: ProfileMethod,
    center: Vec2,
    sealevel: f32,
    rng: &mut R,
) -> PlanetSurface {
    let samples = match method {
        ProfileMethod::Planetary(params) => planetary_profile(&params, sealevel, rng),
        ProfileMethod::Fractal(params) => fractal_profile(&params, sealevel),
    };
    let surface = PlanetSurface::from_samples(center, sealevel, samples);
    log::debug!(
        "Generated planet at ({:.0}, {:.0}): sealevel {:.0}, altitude {:.1}..{:.1}",
        center.x,
        center.y,
        sealevel,
        surface.min_altitude(),
        surface.max_altitude()
    );
    surface
}

#[cfg(test)]
mod tests;
