#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use gravwar_core::constants::*;
    use gravwar_core::types::Circle;

    use crate::surface::{bucket_for_degrees, PlanetSurface};

    /// Sea level 500 around (1000, 1000), with a gentle ripple.
    fn rippled_planet() -> PlanetSurface {
        let samples = (0..TERRAIN_SAMPLES)
            .map(|i| 500.0 + 20.0 * (i as f32 * 0.05).sin())
            .collect();
        PlanetSurface::from_samples(Vec2::new(1000.0, 1000.0), 500.0, samples)
    }

    // ---- Lookup ----

    #[test]
    fn test_bucket_rule() {
        assert_eq!(bucket_for_degrees(0.0), 0);
        assert_eq!(bucket_for_degrees(0.49), 0);
        assert_eq!(bucket_for_degrees(0.5), 1);
        assert_eq!(bucket_for_degrees(359.9), TERRAIN_SAMPLES - 1);
        assert_eq!(bucket_for_degrees(360.0), 0);
        assert_eq!(bucket_for_degrees(-0.25), TERRAIN_SAMPLES - 1);
        assert_eq!(bucket_for_degrees(f32::NAN), 0);
        assert_eq!(bucket_for_degrees(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn test_flat_planet_lookup() {
        let planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        assert!((planet.core_radius - 120.0).abs() < 1e-3);
        assert_eq!(planet.min_altitude(), 400.0);
        assert_eq!(planet.max_altitude(), 400.0);
        assert_eq!(planet.altitude_at_degrees(-725.0), 400.0);

        let top = planet.surface_point_at_degrees(90.0);
        assert!(top.x.abs() < 1e-3 && (top.y - 400.0).abs() < 1e-3);
        // Just past 90 degrees.
        assert_eq!(planet.bucket_under_point(Vec2::new(-0.035, 10.0)), 180);
    }

    #[test]
    fn test_surface_point_accepts_negative_index() {
        let planet = rippled_planet();
        let a = planet.surface_point(-1);
        let b = planet.surface_point(TERRAIN_SAMPLES as isize - 1);
        assert!(a.distance(b) < 1e-2);
    }

    #[test]
    fn test_flat_slope_is_tangent() {
        let planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        // At longitude 90 the surface runs toward -x.
        let slope = planet.slope_at_degrees(90.0);
        assert!((slope.abs() - 180.0).abs() < 1.0, "slope {slope}");
    }

    #[test]
    fn test_short_sample_vector_is_padded() {
        let planet = PlanetSurface::from_samples(Vec2::ZERO, 300.0, vec![10.0; 3]);
        assert_eq!(planet.samples().len(), TERRAIN_SAMPLES);
        // Below the floor gets lifted.
        assert_eq!(planet.samples()[0], planet.floor());
        assert_eq!(planet.samples()[3], 300.0);
        assert_eq!(planet.min_altitude(), planet.floor());
    }

    // ---- Intersection ----

    #[test]
    fn test_intersects_core_and_surface() {
        let planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        assert!(planet.intersects(&Circle::new(Vec2::ZERO, 1.0)));
        assert!(planet.intersects(&Circle::new(Vec2::new(0.0, 398.0), 1.0)));
        assert!(planet.intersects(&Circle::new(Vec2::new(0.0, 403.0), 4.0)));
        assert!(!planet.intersects(&Circle::new(Vec2::new(0.0, 410.0), 4.0)));
        assert!(!planet.intersects(&Circle::new(Vec2::new(5000.0, 0.0), 4.0)));
    }

    // ---- Mutation ----

    #[test]
    fn test_crater_lowers_surface_under_blast() {
        let mut planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        let smoke = planet.crater(&Circle::new(Vec2::new(0.0, 400.0), 50.0));
        assert!(!smoke.is_empty());

        // Straight under the blast the sample drops to the near crossing.
        assert!((planet.altitude_at_degrees(90.0) - 350.0).abs() < 1.0);
        // Far away nothing changes.
        assert_eq!(planet.altitude_at_degrees(270.0), 400.0);
        assert!(planet.min_altitude() < 400.0);
    }

    #[test]
    fn test_crater_smoke_peaks_in_the_middle() {
        let mut planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        let smoke = planet.crater(&Circle::new(Vec2::new(0.0, 400.0), 50.0));
        let mid = smoke[smoke.len() / 2].scale;
        assert!(mid > smoke[0].scale);
        assert!(mid <= 3.0);
        // Puffs drift toward the planet center.
        let puff = smoke[smoke.len() / 2];
        assert!(puff.velocity.dot(-puff.position) > 0.0);
    }

    #[test]
    fn test_crater_at_planet_center_floors_everything() {
        let mut planet = rippled_planet();
        planet.crater(&Circle::new(planet.center, 1000.0));
        let floor = planet.floor();
        assert!(planet.samples().iter().all(|&s| s == floor));
        assert_eq!(planet.max_altitude(), floor);
    }

    #[test]
    fn test_deposit_raises_surface() {
        let mut planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        planet.deposit(&Circle::new(Vec2::new(0.0, 400.0), 50.0));
        // The chord above ground is 50 straight under the centre.
        assert!((planet.altitude_at_degrees(90.0) - 450.0).abs() < 1.0);
        assert!((planet.max_altitude() - 450.0).abs() < 1.0);
        assert_eq!(planet.altitude_at_degrees(270.0), 400.0);
    }

    #[test]
    fn test_deposit_above_ground_adds_full_chord() {
        let mut planet = PlanetSurface::flat(Vec2::ZERO, 400.0);
        planet.deposit(&Circle::new(Vec2::new(0.0, 500.0), 20.0));
        assert!((planet.altitude_at_degrees(90.0) - 440.0).abs() < 1.0);
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_bucket_always_in_range(degrees in proptest::num::f32::ANY) {
            prop_assert!(bucket_for_degrees(degrees) < TERRAIN_SAMPLES);
        }

        #[test]
        fn prop_intersects_is_translation_invariant(
            x in -900.0f32..900.0,
            y in -900.0f32..900.0,
            r in 1.0f32..120.0,
            dx in -5000.0f32..5000.0,
            dy in -5000.0f32..5000.0,
        ) {
            let planet = rippled_planet();
            let circle = Circle::new(planet.center + Vec2::new(x, y), r);
            let offset = Vec2::new(dx, dy);

            let mut moved = planet.clone();
            moved.translate(offset);
            prop_assert_eq!(
                planet.intersects(&circle),
                moved.intersects(&circle.translated(offset))
            );
        }

        #[test]
        fn prop_crater_never_digs_below_floor(
            x in -700.0f32..700.0,
            y in -700.0f32..700.0,
            r in 1.0f32..400.0,
            repeats in 1usize..4,
        ) {
            let mut planet = rippled_planet();
            let blast = Circle::new(planet.center + Vec2::new(x, y), r);
            for _ in 0..repeats {
                planet.crater(&blast);
            }
            let floor = planet.floor();
            prop_assert!(planet.samples().iter().all(|&s| s >= floor));
            prop_assert!(planet.min_altitude() >= floor);
        }

        #[test]
        fn prop_crater_idempotent_once_floored(
            x in -50.0f32..50.0,
            y in -50.0f32..50.0,
        ) {
            let mut planet = rippled_planet();
            // Covers the centre and every surface vertex.
            let blast = Circle::new(planet.center + Vec2::new(x, y), 700.0);
            planet.crater(&blast);
            let once = planet.samples().to_vec();
            planet.crater(&blast);
            prop_assert_eq!(once, planet.samples().to_vec());
        }
    }
}
