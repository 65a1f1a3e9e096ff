//! Naive 1D fractal profile: a sum of sine octaves.

use std::f32::consts::PI;

use gravwar_core::constants::TERRAIN_SAMPLES;

/// Fractal profile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    pub octaves: u32,
    /// Frequency multiplier between octaves; amplitude falls by the same factor.
    pub step_size: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 9,
            step_size: 2.0,
        }
    }
}

/// Absolute radius samples. Deterministic; both ends of the circle meet at
/// sea level so there is no seam at longitude 0.
pub fn fractal_profile(params: &FractalParams, sealevel: f32) -> Vec<f32> {
    let n = TERRAIN_SAMPLES as f32;
    (0..TERRAIN_SAMPLES)
        .map(|i| {
            let x = i as f32 / n;
            let envelope = (PI * x).sin();
            (0..params.octaves).fold(sealevel, |acc, octave| {
                let p = params.step_size.powi(octave as i32);
                acc + sealevel / (10.0 * p) * envelope * (4.0 * PI * p * x).sin()
            })
        })
        .collect()
}
