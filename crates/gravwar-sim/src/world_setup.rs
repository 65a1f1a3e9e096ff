//! Entity spawn factories for setting up the simulation world.
//!
//! Builds planets, vehicles, projectiles, wormholes and drifters with the
//! component bundles the systems expect.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use gravwar_core::components::*;
use gravwar_core::constants::*;
use gravwar_core::enums::ProjectileKind;
use gravwar_core::level::{LevelDescription, PlanetRecord, VehicleRecord};
use gravwar_core::types::{unit_from_degrees, AimParams, Inventory};
use gravwar_terrain::PlanetSurface;

use crate::arsenal::get_profile;
use crate::relations::{HomePlanet, Owner, VehicleNumber, WormholeLink};
use crate::scenario;

/// Entities spawned for a level, in record order.
pub struct LoadedLevel {
    pub planets: Vec<Entity>,
    pub vehicles: Vec<Entity>,
}

/// Repair or replace a level so it can be played.
///
/// Out-of-range planet indices are pointed at planet 0; a level that still
/// fails validation is replaced by the default level.
pub fn resolve_level(level: Option<LevelDescription>) -> LevelDescription {
    let Some(mut level) = level else {
        return scenario::default_level();
    };
    let repaired = level.normalize();
    if repaired > 0 {
        log::warn!(
            "Level '{}': {} vehicle(s) referenced a missing planet, moved to planet 0",
            level.name,
            repaired
        );
    }
    match level.validate() {
        Ok(()) => level,
        Err(err) => {
            log::warn!(
                "Level '{}' is not playable ({}), loading the default level",
                level.name,
                err
            );
            scenario::default_level()
        }
    }
}

/// Spawn every planet and vehicle of a validated level.
pub fn load_level<R: Rng + ?Sized>(
    world: &mut World,
    level: &LevelDescription,
    gravitational_constant: f32,
    accuracy: f32,
    rng: &mut R,
) -> LoadedLevel {
    let planets: Vec<Entity> = level
        .planets
        .iter()
        .enumerate()
        .map(|(index, record)| spawn_planet(world, index, record, rng))
        .collect();

    let mut vehicles = Vec::with_capacity(level.vehicles.len());
    for (number, record) in level.vehicles.iter().enumerate() {
        let Some(&planet) = planets.get(record.planet) else {
            continue;
        };
        vehicles.push(spawn_vehicle(
            world,
            number as u32,
            record,
            planet,
            gravitational_constant,
            accuracy,
        ));
    }

    LoadedLevel { planets, vehicles }
}

/// Spawn a planet with a freshly generated surface.
pub fn spawn_planet<R: Rng + ?Sized>(
    world: &mut World,
    index: usize,
    record: &PlanetRecord,
    rng: &mut R,
) -> Entity {
    let surface = gravwar_procgen::generate_surface(record.position, record.radius, rng);
    spawn_planet_with_surface(world, index, surface, record.mass, record.mobile)
}

/// Spawn a planet around an existing surface.
pub fn spawn_planet_with_surface(
    world: &mut World,
    index: usize,
    surface: PlanetSurface,
    mass: f32,
    mobile: bool,
) -> Entity {
    let center = surface.center;
    let radius = surface.sealevel_radius;
    let entity = world.spawn((
        PlanetId { index },
        Kinematics::at(center),
        Collider { radius },
        surface,
    ));
    if mass > 0.0 {
        let _ = world.insert_one(entity, Mass { value: mass });
    }
    if mobile {
        let _ = world.insert_one(entity, GravityAffected);
    }
    entity
}

/// Spawn a vehicle resting on its home planet.
///
/// Starting power is the circular-orbit speed `√(G·M / altitude)` at the
/// vehicle's longitude.
pub fn spawn_vehicle(
    world: &mut World,
    number: u32,
    record: &VehicleRecord,
    planet: Entity,
    gravitational_constant: f32,
    accuracy: f32,
) -> Entity {
    let longitude = record.longitude.rem_euclid(360.0);
    let (position, altitude) = match world.get::<&PlanetSurface>(planet) {
        Ok(surface) => {
            let altitude = surface.altitude_at_degrees(longitude);
            (
                surface.center + (altitude + VEHICLE_HALF_HEIGHT) * unit_from_degrees(longitude),
                altitude,
            )
        }
        Err(_) => (Vec2::ZERO, 0.0),
    };
    let mass = world.get::<&Mass>(planet).map(|m| m.value).unwrap_or(0.0);

    let orbital = if altitude > 0.0 {
        (gravitational_constant * mass / altitude).sqrt()
    } else {
        0.0
    };
    let power = orbital.clamp(0.0, VEHICLE_BASE_POWER + VEHICLE_MAX_FUEL);

    let vehicle = Vehicle::new(longitude, power, record.color, record.is_player);
    let brain = AiBrain::new(
        AimParams::new(AI_INITIAL_TURRET_ANGLE, power, longitude),
        record.is_player,
        accuracy,
    );

    world.spawn((
        VehicleNumber(number),
        vehicle,
        Kinematics::at(position),
        Collider {
            radius: VEHICLE_COLLIDER_RADIUS,
        },
        HomePlanet(planet),
        Inventory::default(),
        brain,
    ))
}

/// Spawn a projectile with the kind's default stats.
pub fn spawn_projectile(
    world: &mut World,
    kind: ProjectileKind,
    position: Vec2,
    velocity: Vec2,
    owner: Option<Entity>,
) -> Entity {
    let profile = get_profile(kind);
    let projectile = Projectile {
        kind,
        damage: profile.damage,
        explosion_radius: profile.explosion_radius,
        age_secs: 0.0,
        ttl_secs: profile.ttl_secs,
        bounces: 0,
        triggers_used: 0,
        split_done: false,
    };
    let entity = world.spawn((
        projectile,
        Kinematics::moving(position, velocity),
        Collider {
            radius: profile.collider_radius,
        },
        GravityAffected,
    ));
    if let Some(owner) = owner {
        let _ = world.insert_one(entity, Owner(owner));
    }
    entity
}

/// Spawn a small child released by a split or a trigger. Children never
/// split again.
pub fn spawn_child_projectile(
    world: &mut World,
    kind: ProjectileKind,
    position: Vec2,
    velocity: Vec2,
    owner: Option<Entity>,
) -> Entity {
    let entity = spawn_projectile(world, kind, position, velocity, owner);
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.ttl_secs = CHILD_PROJECTILE_TTL_SECS;
        projectile.split_done = true;
    }
    if let Ok(mut collider) = world.get::<&mut Collider>(entity) {
        collider.radius = CHILD_PROJECTILE_RADIUS;
    }
    entity
}

/// Spawn two linked wormholes.
pub fn spawn_wormhole_pair(world: &mut World, a: Vec2, b: Vec2, turns: u32) -> (Entity, Entity) {
    let bundle = |position: Vec2| {
        (
            Wormhole {
                turns_remaining: turns,
            },
            Kinematics::at(position),
            Collider {
                radius: WORMHOLE_RADIUS,
            },
        )
    };
    let first = world.spawn(bundle(a));
    let second = world.spawn(bundle(b));
    let _ = world.insert_one(first, WormholeLink(second));
    let _ = world.insert_one(second, WormholeLink(first));
    (first, second)
}

/// Spawn a free-flying body that bounces off terrain.
pub fn spawn_drifter(world: &mut World, position: Vec2, velocity: Vec2, radius: f32) -> Entity {
    world.spawn((
        Drifter,
        Kinematics::moving(position, velocity),
        Collider { radius },
        GravityAffected,
    ))
}
