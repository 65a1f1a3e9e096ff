//! Collision system: projectile hits, wormhole transits and drifter bounces.

use glam::Vec2;
use hecs::{Entity, World};

use gravwar_core::components::{Collider, Dead, Drifter, Kinematics, Projectile, Vehicle, Wormhole};
use gravwar_core::types::Circle;
use gravwar_terrain::PlanetSurface;

use crate::detonation::{detonate, Impact};
use crate::events::EventLog;
use crate::physics::PhysicsParams;
use crate::relations::{Owner, WormholeLink};
use crate::roster::is_alive;

/// A wormhole mouth and where it leads.
struct Mouth {
    circle: Circle,
    exit: Vec2,
}

pub fn run(world: &mut World, params: &PhysicsParams, events: &mut EventLog) {
    let mouths = collect_mouths(world);

    let projectiles: Vec<Entity> = world
        .query::<(&Projectile, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, dead))| dead.is_none())
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        // An earlier detonation this tick may already have killed it.
        if world.get::<&Dead>(entity).is_ok() {
            continue;
        }
        let Some(body) = body_of(world, entity) else {
            continue;
        };
        let owner = world.get::<&Owner>(entity).ok().map(|o| o.0);

        if let Some(target) = struck_vehicle(world, &body, owner) {
            detonate(world, entity, Impact::Vehicle(target), params.world, events);
            continue;
        }
        if let Some(planet) = struck_planet(world, &body) {
            detonate(world, entity, Impact::Terrain(planet), params.world, events);
            continue;
        }
        if let Some(mouth) = mouths.iter().find(|m| m.circle.intersects(&body)) {
            if let Ok(mut kin) = world.get::<&mut Kinematics>(entity) {
                kin.position = mouth.exit + (mouth.circle.radius + 1.0) * kin.velocity.normalize_or_zero();
            }
        }
    }

    bounce_drifters(world);
}

fn collect_mouths(world: &World) -> Vec<Mouth> {
    world
        .query::<(&Wormhole, &Kinematics, &Collider, &WormholeLink)>()
        .iter()
        .filter_map(|(_, (_, kin, collider, link))| {
            let exit = world.get::<&Kinematics>(link.0).ok()?.position;
            Some(Mouth {
                circle: Circle::new(kin.position, collider.radius),
                exit,
            })
        })
        .collect()
}

/// First living vehicle other than the owner touching `body`.
fn struck_vehicle(world: &World, body: &Circle, owner: Option<Entity>) -> Option<Entity> {
    world
        .query::<(&Vehicle, &Kinematics, &Collider)>()
        .iter()
        .find(|(entity, (vehicle, kin, collider))| {
            Some(*entity) != owner
                && is_alive(vehicle)
                && body.intersects(&Circle::new(kin.position, collider.radius))
        })
        .map(|(entity, _)| entity)
}

fn struck_planet(world: &World, body: &Circle) -> Option<Entity> {
    world
        .query::<&PlanetSurface>()
        .iter()
        .find(|(_, surface)| surface.intersects(body))
        .map(|(entity, _)| entity)
}

fn body_of(world: &World, entity: Entity) -> Option<Circle> {
    let kin = world.get::<&Kinematics>(entity).ok()?;
    let collider = world.get::<&Collider>(entity).ok()?;
    Some(Circle::new(kin.position, collider.radius))
}

/// Reflect drifters off any surface they sank into.
fn bounce_drifters(world: &mut World) {
    let drifters: Vec<(Entity, Circle)> = world
        .query::<(&Kinematics, &Collider, &Drifter, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, _, _, dead))| dead.is_none())
        .map(|(entity, (kin, collider, _, _))| (entity, Circle::new(kin.position, collider.radius)))
        .collect();

    for (entity, body) in drifters {
        let Some(center) = world
            .query::<&PlanetSurface>()
            .iter()
            .find(|(_, surface)| surface.intersects(&body))
            .map(|(_, surface)| surface.center)
        else {
            continue;
        };
        if let Ok(mut kin) = world.get::<&mut Kinematics>(entity) {
            let normal = (body.center - center).normalize_or_zero();
            kin.position = kin.previous;
            let reflected = kin.velocity - 2.0 * kin.velocity.dot(normal) * normal;
            kin.velocity = reflected;
        }
    }
}
