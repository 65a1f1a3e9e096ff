//! Planetary method around a circle.
//!
//! Repeatedly raise or lower a random half of the circle, then rescale so
//! the peak-to-trough span is a fixed fraction of sea level.

use rand::Rng;

use gravwar_core::constants::*;

/// Planetary method parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetaryParams {
    pub iterations: u32,
    /// Height added or removed per iteration.
    pub height_step: f32,
    /// Buckets moved per iteration. Zero means half the circle.
    pub arc_len: usize,
    /// Span of the final profile as a fraction of sea level.
    pub peak_fraction: f32,
}

impl Default for PlanetaryParams {
    fn default() -> Self {
        Self {
            iterations: PLANETARY_ITERATIONS,
            height_step: PLANETARY_HEIGHT_STEP,
            arc_len: 0,
            peak_fraction: TALLEST_PEAK_FRACTION,
        }
    }
}

/// Absolute radius samples for a planet with the given sea level.
pub fn planetary_profile<R: Rng + ?Sized>(
    params: &PlanetaryParams,
    sealevel: f32,
    rng: &mut R,
) -> Vec<f32> {
    let n = TERRAIN_SAMPLES;
    let arc_len = match params.arc_len {
        0 => n / 2,
        len => len.min(n),
    };

    let mut heights = vec![0.0f32; n];
    for _ in 0..params.iterations {
        let start = rng.gen_range(0..n);
        let delta = if rng.gen_bool(0.5) {
            params.height_step
        } else {
            -params.height_step
        };
        for j in 0..arc_len {
            heights[(start + j) % n] += delta;
        }
    }

    let (min, max) = heights
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let span = max - min;
    let scale = if span > 0.0 {
        params.peak_fraction * sealevel / span
    } else {
        0.0
    };

    heights.into_iter().map(|h| h * scale + sealevel).collect()
}
