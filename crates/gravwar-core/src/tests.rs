#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::level::*;
    use crate::types::*;

    fn two_vehicle_level() -> LevelDescription {
        LevelDescription {
            name: "duel".into(),
            world: WorldSize::default(),
            planets: vec![PlanetRecord {
                position: Vec2::new(7500.0, 7500.0),
                mass: 100.0,
                radius: 900.0,
                mobile: false,
            }],
            vehicles: vec![
                VehicleRecord {
                    longitude: 90.0,
                    planet: 0,
                    color: VehicleColor::Red,
                    is_player: true,
                },
                VehicleRecord {
                    longitude: 270.0,
                    planet: 0,
                    color: VehicleColor::Blue,
                    is_player: false,
                },
            ],
        }
    }

    // ---- Inventory ----

    #[test]
    fn test_inventory_defaults() {
        let inv = Inventory::default();
        assert_eq!(inv.selected, ProjectileKind::Standard);
        assert_eq!(inv.counts[ProjectileKind::Fatman.index()], 1);
        assert_eq!(inv.counts[ProjectileKind::Mine.index()], 2);
        assert!(inv.has(ProjectileKind::Splitter));
    }

    #[test]
    fn test_inventory_infinite_kinds_never_decrement() {
        let mut inv = Inventory::default();
        for _ in 0..20_000 {
            inv.consume(ProjectileKind::Standard);
        }
        assert_eq!(inv.counts[ProjectileKind::Standard.index()], 9999);
        assert_eq!(inv.selected, ProjectileKind::Standard);
    }

    #[test]
    fn test_inventory_auto_advances_when_exhausted() {
        let mut inv = Inventory::default();
        inv.select(ProjectileKind::Fatman);
        inv.consume(ProjectileKind::Fatman);
        assert_eq!(inv.counts[ProjectileKind::Fatman.index()], 0);
        assert_eq!(
            inv.selected,
            ProjectileKind::Wormhole,
            "Exhausted kind should advance to the next available one"
        );

        // Selecting an empty kind skips ahead as well.
        assert_eq!(inv.select(ProjectileKind::Fatman), ProjectileKind::Wormhole);
    }

    #[test]
    fn test_inventory_advance_wraps_to_infinite_kinds() {
        let mut inv = Inventory::default();
        for kind in ProjectileKind::ALL {
            if !kind.is_infinite() {
                inv.counts[kind.index()] = 0;
            }
        }
        inv.selected = ProjectileKind::Mine;
        assert_eq!(inv.advance(), ProjectileKind::Standard);
        assert_eq!(inv.advance(), ProjectileKind::Dirt);
        assert_eq!(inv.advance(), ProjectileKind::Standard);
    }

    #[test]
    fn test_kind_indices_match_all_order() {
        for (i, kind) in ProjectileKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    // ---- Angles ----

    #[test]
    fn test_shortest_delta_picks_short_way() {
        assert!((shortest_delta_degrees(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((shortest_delta_degrees(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((shortest_delta_degrees(-720.0, 90.0) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_view_vector_points_outward_at_ninety_degrees() {
        // Vehicle on top of its planet (longitude 90) aiming straight up.
        let aim = AimParams::new(90.0, 400.0, 90.0);
        let view = aim.view();
        assert!(view.x.abs() < 1e-5);
        assert!((view.y - 1.0).abs() < 1e-5);

        // Turret at 0 lies along the local horizon.
        let flat = AimParams::new(0.0, 400.0, 90.0).view();
        assert!((flat.x - 1.0).abs() < 1e-5);
        assert!(flat.y.abs() < 1e-5);
    }

    #[test]
    fn test_rotate_degrees_quarter_turn() {
        let v = rotate_degrees(Vec2::X, 90.0);
        assert!(v.x.abs() < 1e-5 && (v.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_intersection() {
        let a = Circle::new(Vec2::ZERO, 10.0);
        let b = Circle::new(Vec2::new(15.0, 0.0), 5.0);
        let c = Circle::new(Vec2::new(15.1, 0.0), 5.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    // ---- Level ----

    #[test]
    fn test_level_validates() {
        assert!(two_vehicle_level().validate().is_ok());
    }

    #[test]
    fn test_level_rejects_missing_planets() {
        let mut level = two_vehicle_level();
        level.planets.clear();
        assert_eq!(level.validate(), Err(LevelError::NoPlanets));
    }

    #[test]
    fn test_level_rejects_bad_world() {
        let mut level = two_vehicle_level();
        level.world.width = 0.0;
        assert!(matches!(
            level.validate(),
            Err(LevelError::InvalidWorld { .. })
        ));
    }

    #[test]
    fn test_level_rejects_single_vehicle() {
        let mut level = two_vehicle_level();
        level.vehicles.truncate(1);
        assert_eq!(level.validate(), Err(LevelError::TooFewVehicles(1)));
    }

    #[test]
    fn test_level_normalizes_planet_index() {
        let mut level = two_vehicle_level();
        level.vehicles[1].planet = 7;
        level.vehicles[1].longitude = -90.0;
        assert_eq!(level.normalize(), 1);
        assert_eq!(level.vehicles[1].planet, 0);
        assert!((level.vehicles[1].longitude - 270.0).abs() < 1e-4);
        assert_eq!(level.player_count(), 1);
    }

    #[test]
    fn test_level_defaults_when_fields_missing() {
        let json = r#"{
            "planets": [{"position": [100.0, 100.0], "mass": 10.0, "radius": 50.0}],
            "vehicles": [{"longitude": 0.0, "planet": 0}, {"longitude": 180.0, "planet": 0}]
        }"#;
        let level: LevelDescription = serde_json::from_str(json).unwrap();
        assert_eq!(level.world, WorldSize::default());
        assert!(!level.planets[0].mobile);
        assert!(!level.vehicles[0].is_player);
        assert!(level.validate().is_ok());
    }

    // ---- Commands ----

    #[test]
    fn test_command_is_tagged() {
        let cmd = PlayerCommand::FireGun {
            kind: Some(ProjectileKind::Bouncer),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"FireGun\""), "got {json}");
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            back,
            PlayerCommand::FireGun {
                kind: Some(ProjectileKind::Bouncer)
            }
        ));
    }
}
