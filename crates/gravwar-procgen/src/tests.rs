#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use gravwar_core::constants::*;

    use crate::*;

    fn span(samples: &[f32]) -> f32 {
        let max = samples.iter().cloned().fold(f32::MIN, f32::max);
        let min = samples.iter().cloned().fold(f32::MAX, f32::min);
        max - min
    }

    #[test]
    fn test_planetary_span_is_peak_fraction() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples = planetary_profile(&PlanetaryParams::default(), 900.0, &mut rng);
        assert_eq!(samples.len(), TERRAIN_SAMPLES);
        let expected = 900.0 * TALLEST_PEAK_FRACTION;
        assert!(
            (span(&samples) - expected).abs() < 0.5,
            "span {} expected {}",
            span(&samples),
            expected
        );
    }

    #[test]
    fn test_planetary_is_seeded() {
        let params = PlanetaryParams::default();
        let a = planetary_profile(&params, 500.0, &mut ChaCha8Rng::seed_from_u64(7));
        let b = planetary_profile(&params, 500.0, &mut ChaCha8Rng::seed_from_u64(7));
        let c = planetary_profile(&params, 500.0, &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_planetary_without_iterations_is_flat() {
        let params = PlanetaryParams {
            iterations: 0,
            ..Default::default()
        };
        let samples = planetary_profile(&params, 500.0, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(samples.iter().all(|&s| s == 500.0));
    }

    #[test]
    fn test_fractal_has_no_seam() {
        let samples = fractal_profile(&FractalParams::default(), 600.0);
        assert_eq!(samples[0], 600.0);
        assert!((samples[TERRAIN_SAMPLES - 1] - 600.0).abs() < 5.0);
        assert!(span(&samples) > 0.0);
    }

    #[test]
    fn test_generated_surface_respects_core_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let surface = generate_surface(Vec2::new(7500.0, 7500.0), 900.0, &mut rng);
        assert_eq!(surface.center, Vec2::new(7500.0, 7500.0));
        assert!(surface.min_altitude() >= surface.floor());
        assert!(surface.max_altitude() - surface.min_altitude() <= 900.0 * TALLEST_PEAK_FRACTION + 0.5);
    }

    #[test]
    fn test_fractal_method_selection() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let surface = generate_surface_with(
            ProfileMethod::Fractal(FractalParams::default()),
            Vec2::ZERO,
            600.0,
            &mut rng,
        );
        assert_eq!(
            surface.samples(),
            fractal_profile(&FractalParams::default(), 600.0).as_slice()
        );
    }
}
