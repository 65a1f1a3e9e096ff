//! Projectile deaths: blasts, damage, terrain effects and kind specials.
//!
//! Every way a real projectile can end (expiry, terrain, vehicle, world
//! edge) goes through this module so the standard kill is applied exactly
//! once per projectile.

use glam::Vec2;
use hecs::{Entity, World};

use gravwar_ai::scoring::score_landing;
use gravwar_core::components::*;
use gravwar_core::constants::*;
use gravwar_core::enums::{SoundCue, VehicleState};
use gravwar_core::events::{AudioEvent, FxEvent};
use gravwar_core::level::WorldSize;
use gravwar_core::types::{degrees_of, rotate_degrees, unit_from_degrees, Circle};
use gravwar_terrain::PlanetSurface;

use crate::arsenal::{get_profile, ExpiryBehavior, ImpactBehavior, ProjectileProfile, TerrainEffect};
use crate::events::EventLog;
use crate::physics::point_at_world_edge;
use crate::relations::{HomePlanet, Owner};
use crate::roster::{
    is_alive, opponent_positions, vehicle_alive, vehicle_number, wormhole_lifetime,
};
use crate::world_setup::{spawn_child_projectile, spawn_projectile, spawn_wormhole_pair};

/// What ended a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Lifetime ran out.
    Expired,
    /// Touched a planet surface.
    Terrain(Entity),
    /// Touched a vehicle other than its owner.
    Vehicle(Entity),
}

/// Apply damage to a living vehicle. Returns true if this killed it.
pub fn damage_vehicle(world: &mut World, target: Entity, amount: f32, events: &mut EventLog) -> bool {
    if amount <= 0.0 {
        return false;
    }
    let died = {
        let Ok(mut vehicle) = world.get::<&mut Vehicle>(target) else {
            return false;
        };
        if !is_alive(&vehicle) {
            return false;
        }
        let before = vehicle.health;
        vehicle.health -= amount;
        events.audio(AudioEvent::Damage {
            volume: amount / before,
        });
        !is_alive(&vehicle)
    };

    if died {
        if let Ok(mut brain) = world.get::<&mut AiBrain>(target) {
            brain.state = VehicleState::Dead;
        }
        let position = world
            .get::<&Kinematics>(target)
            .map(|kin| kin.position)
            .unwrap_or_default();
        events.fx(FxEvent::DeathPuff { position });
        log::info!(
            "Vehicle {} destroyed",
            vehicle_number(world, target).unwrap_or_default()
        );
        let _ = world.insert_one(target, Dead);
    }
    died
}

/// Blast at `position`: damage every living vehicle the circle touches.
/// Nothing happens for a zero radius.
pub fn explode(
    world: &mut World,
    position: Vec2,
    radius: f32,
    damage: f32,
    sound: SoundCue,
    events: &mut EventLog,
) {
    if radius <= 0.0 {
        return;
    }
    let blast = Circle::new(position, radius);
    let caught: Vec<Entity> = world
        .query::<(&Vehicle, &Kinematics, &Collider)>()
        .iter()
        .filter(|(_, (vehicle, kin, collider))| {
            is_alive(vehicle) && blast.intersects(&Circle::new(kin.position, collider.radius))
        })
        .map(|(entity, _)| entity)
        .collect();
    for entity in caught {
        damage_vehicle(world, entity, damage, events);
    }

    events.fx(FxEvent::Explosion { position, radius });
    events.audio(AudioEvent::Explosion {
        position,
        volume: EXPLOSION_VOLUME,
        cue: sound,
    });
}

/// Tell the owner how close its shot ended to the nearest opponent.
pub fn aim_feedback(world: &mut World, owner: Option<Entity>, landing: Vec2, at_edge: bool) {
    let Some(owner) = owner else {
        return;
    };
    let Ok(shooter) = world.get::<&Kinematics>(owner).map(|kin| kin.position) else {
        return;
    };
    let score = score_landing(landing, shooter, opponent_positions(world, owner), at_edge);
    if let Ok(mut brain) = world.get::<&mut AiBrain>(owner) {
        brain.last_impact_score = Some(score);
    }
}

/// Kill a projectile that left the world: no blast, a ricochet sound.
pub fn ricochet(world: &mut World, entity: Entity, events: &mut EventLog) {
    if world.get::<&Dead>(entity).is_ok() {
        return;
    }
    let Ok(position) = world.get::<&Kinematics>(entity).map(|kin| kin.position) else {
        return;
    };
    let owner = world.get::<&Owner>(entity).ok().map(|o| o.0);
    events.audio(AudioEvent::Ricochet { position });
    aim_feedback(world, owner, position, true);
    let _ = world.insert_one(entity, Dead);
}

/// Kill a projectile: terrain effect and impact special when it hit a
/// planet, the blast, owner feedback, the expiry split, then direct damage
/// to a struck vehicle.
pub fn detonate(
    world: &mut World,
    entity: Entity,
    impact: Impact,
    bounds: WorldSize,
    events: &mut EventLog,
) {
    if world.get::<&Dead>(entity).is_ok() {
        return;
    }
    let Ok(projectile) = world.get::<&Projectile>(entity).map(|p| *p) else {
        return;
    };
    let Ok(kin) = world.get::<&Kinematics>(entity).map(|k| *k) else {
        return;
    };
    let owner = world.get::<&Owner>(entity).ok().map(|o| o.0);
    let profile = get_profile(projectile.kind);
    let position = kin.position;

    if let Impact::Terrain(planet) = impact {
        hit_terrain(world, planet, &projectile, &kin, owner, &profile, events);
    }

    explode(
        world,
        position,
        projectile.explosion_radius,
        projectile.damage,
        profile.sound,
        events,
    );
    aim_feedback(world, owner, position, point_at_world_edge(position, bounds));

    if impact == Impact::Expired && !projectile.split_done {
        if let ExpiryBehavior::Split {
            children,
            spread_deg,
            speed_factor,
        } = profile.expiry
        {
            let offsets = [spread_deg, -spread_deg, 0.0];
            for offset in offsets.iter().take(children as usize) {
                let velocity = rotate_degrees(kin.velocity, *offset) * speed_factor;
                spawn_child_projectile(world, projectile.kind, position, velocity, owner);
            }
            events.audio(AudioEvent::Shoot { position });
        }
    }

    if let Impact::Vehicle(target) = impact {
        damage_vehicle(world, target, projectile.damage, events);
    }

    let _ = world.insert_one(entity, Dead);
}

fn hit_terrain(
    world: &mut World,
    planet: Entity,
    projectile: &Projectile,
    kin: &Kinematics,
    owner: Option<Entity>,
    profile: &ProjectileProfile,
    events: &mut EventLog,
) {
    let position = kin.position;
    let blast = Circle::new(position, projectile.explosion_radius);
    let terminal = match profile.impact {
        ImpactBehavior::Bounce { max_bounces } => projectile.bounces >= max_bounces,
        _ => true,
    };

    let (center, sealevel) = {
        let Ok(mut surface) = world.get::<&mut PlanetSurface>(planet) else {
            return;
        };
        if blast.radius > 0.0 {
            match profile.terrain {
                TerrainEffect::Crater => crater(&mut surface, &blast, events),
                TerrainEffect::CraterOnTerminalBounce if terminal => {
                    crater(&mut surface, &blast, events)
                }
                TerrainEffect::Deposit => surface.deposit(&blast),
                _ => {}
            }
        }
        (surface.center, surface.sealevel_radius)
    };

    match profile.impact {
        ImpactBehavior::Bounce { max_bounces } if projectile.bounces < max_bounces => {
            let normal = (center - position).normalize_or_zero();
            let velocity = kin.velocity - 2.0 * kin.velocity.dot(normal) * normal;
            let child = spawn_projectile(
                world,
                projectile.kind,
                position - normal * BOUNCE_OFFSET,
                velocity,
                owner,
            );
            if let Ok(mut bounced) = world.get::<&mut Projectile>(child) {
                bounced.bounces = projectile.bounces + 1;
            }
        }
        ImpactBehavior::TeleportOwner => {
            if let Some(owner) = owner {
                teleport_vehicle(world, owner, planet, position, center);
            }
        }
        ImpactBehavior::SpawnWormholes => {
            let direction = unit_from_degrees(degrees_of(position - center));
            let reach = sealevel + WORMHOLE_ALTITUDE;
            let turns = wormhole_lifetime(world);
            spawn_wormhole_pair(
                world,
                center + reach * direction,
                center - reach * direction,
                turns,
            );
        }
        _ => {}
    }
}

fn crater(surface: &mut PlanetSurface, blast: &Circle, events: &mut EventLog) {
    for puff in surface.crater(blast) {
        events.fx(FxEvent::Smoke {
            position: puff.position,
            velocity: puff.velocity,
            scale: puff.scale,
        });
    }
}

/// Move a vehicle onto `planet` at the longitude under `point`.
fn teleport_vehicle(world: &mut World, vehicle: Entity, planet: Entity, point: Vec2, center: Vec2) {
    if !vehicle_alive(world, vehicle) {
        return;
    }
    if let Ok(mut home) = world.get::<&mut HomePlanet>(vehicle) {
        home.0 = planet;
    }
    if let Ok(mut state) = world.get::<&mut Vehicle>(vehicle) {
        state.longitude = degrees_of(point - center).rem_euclid(360.0);
    }
    if let Ok(mut kin) = world.get::<&mut Kinematics>(vehicle) {
        kin.position = point;
    }
}
