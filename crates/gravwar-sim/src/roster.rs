//! Read-only queries over vehicles and projectiles shared by several systems.

use glam::Vec2;
use hecs::{Entity, World};

use gravwar_core::components::{Dead, Kinematics, Projectile, Vehicle};
use gravwar_core::constants::WORMHOLE_TURNS_PER_VEHICLE;

use crate::relations::VehicleNumber;

pub fn is_alive(vehicle: &Vehicle) -> bool {
    vehicle.health > 0.0
}

/// Whether `entity` is a vehicle with health left.
pub fn vehicle_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Vehicle>(entity)
        .map(|vehicle| is_alive(&vehicle))
        .unwrap_or(false)
}

/// Every vehicle in number order, alive or not.
pub fn vehicles_by_number(world: &World) -> Vec<(Entity, u32)> {
    let mut vehicles: Vec<(Entity, u32)> = world
        .query::<(&Vehicle, &VehicleNumber)>()
        .iter()
        .map(|(entity, (_, number))| (entity, number.0))
        .collect();
    vehicles.sort_by_key(|&(_, number)| number);
    vehicles
}

/// Living vehicles in number order.
pub fn living_vehicles(world: &World) -> Vec<(Entity, u32)> {
    vehicles_by_number(world)
        .into_iter()
        .filter(|&(entity, _)| vehicle_alive(world, entity))
        .collect()
}

/// Turns a newly opened wormhole pair stays open: two per surviving vehicle.
pub fn wormhole_lifetime(world: &World) -> u32 {
    WORMHOLE_TURNS_PER_VEHICLE * living_vehicles(world).len() as u32
}

/// Positions of every living vehicle except `shooter`.
pub fn opponent_positions(world: &World, shooter: Entity) -> Vec<Vec2> {
    world
        .query::<(&Vehicle, &Kinematics)>()
        .iter()
        .filter(|(entity, (vehicle, _))| *entity != shooter && is_alive(vehicle))
        .map(|(_, (_, kin))| kin.position)
        .collect()
}

/// Whether any real projectile is still live.
pub fn projectiles_in_flight(world: &World) -> bool {
    world
        .query::<(&Projectile, Option<&Dead>)>()
        .iter()
        .any(|(_, (_, dead))| dead.is_none())
}

/// Number of a vehicle, if it still exists.
pub fn vehicle_number(world: &World, entity: Entity) -> Option<u32> {
    world.get::<&VehicleNumber>(entity).ok().map(|n| n.0)
}
