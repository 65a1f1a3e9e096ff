//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use glam::Vec2;
use hecs::World;

use gravwar_core::components::*;
use gravwar_core::enums::*;
use gravwar_core::events::{AudioEvent, FxEvent};
use gravwar_core::level::WorldSize;
use gravwar_core::state::*;
use gravwar_core::types::{Inventory, SimTime};
use gravwar_terrain::PlanetSurface;

use crate::relations::{HomePlanet, VehicleNumber, WormholeLink};

/// Everything the snapshot carries that does not live in the world.
pub struct SnapshotInputs {
    pub time: SimTime,
    pub phase: GamePhase,
    pub turn_mode: TurnMode,
    pub bounds: WorldSize,
    pub turn: TurnView,
    pub aim_preview: Vec<Vec2>,
    pub audio_events: Vec<AudioEvent>,
    pub fx_events: Vec<FxEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> GameStateSnapshot {
    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        turn_mode: inputs.turn_mode,
        world: inputs.bounds,
        turn: inputs.turn,
        planets: build_planets(world),
        vehicles: build_vehicles(world),
        projectiles: build_projectiles(world),
        wormholes: build_wormholes(world),
        aim_preview: inputs.aim_preview,
        audio_events: inputs.audio_events,
        fx_events: inputs.fx_events,
    }
}

/// Build PlanetView list in level order.
fn build_planets(world: &World) -> Vec<PlanetView> {
    let mut planets: Vec<PlanetView> = world
        .query::<(&PlanetId, &PlanetSurface, Option<&Mass>)>()
        .iter()
        .map(|(_, (id, surface, mass))| PlanetView {
            index: id.index,
            center: surface.center,
            mass: mass.map(|m| m.value).unwrap_or(0.0),
            sealevel_radius: surface.sealevel_radius,
            core_radius: surface.core_radius,
            max_altitude: surface.max_altitude(),
            samples: surface.samples().to_vec(),
        })
        .collect();
    planets.sort_by_key(|p| p.index);
    planets
}

/// Build VehicleView list in vehicle-number order.
fn build_vehicles(world: &World) -> Vec<VehicleView> {
    let mut vehicles: Vec<VehicleView> = world
        .query::<(
            &VehicleNumber,
            &Vehicle,
            &Kinematics,
            &AiBrain,
            &Inventory,
            Option<&HomePlanet>,
        )>()
        .iter()
        .map(|(_, (number, vehicle, kin, brain, inventory, home))| VehicleView {
            number: number.0,
            position: kin.position,
            planet: home.and_then(|h| world.get::<&PlanetId>(h.0).ok().map(|id| id.index)),
            longitude: vehicle.longitude,
            roll: vehicle.roll,
            turret_angle: vehicle.turret_angle,
            power: vehicle.power,
            health: vehicle.health,
            fuel: vehicle.fuel,
            color: vehicle.color,
            is_player: vehicle.is_player,
            in_control: vehicle.in_control,
            state: brain.state,
            animation: vehicle.animation,
            selected_kind: inventory.selected,
        })
        .collect();
    vehicles.sort_by_key(|v| v.number);
    vehicles
}

/// Build ProjectileView list from live projectiles.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Kinematics, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, _, dead))| dead.is_none())
        .map(|(_, (projectile, kin, _))| ProjectileView {
            kind: projectile.kind,
            position: kin.position,
            velocity: kin.velocity,
            roll: kin.velocity.y.atan2(kin.velocity.x),
        })
        .collect()
}

/// Build WormholeView list; each mouth reports where it leads.
fn build_wormholes(world: &World) -> Vec<WormholeView> {
    world
        .query::<(&Wormhole, &Kinematics, &Collider, Option<&WormholeLink>)>()
        .iter()
        .map(|(_, (wormhole, kin, collider, link))| WormholeView {
            position: kin.position,
            radius: collider.radius,
            exit: link.and_then(|l| world.get::<&Kinematics>(l.0).ok().map(|k| k.position)),
            turns_remaining: wormhole.turns_remaining,
        })
        .collect()
}
