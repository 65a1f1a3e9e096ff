//! Vehicle motion: strafing, turret, power and settling onto the surface.

use hecs::{Entity, World};

use gravwar_core::components::{Dead, Kinematics, Vehicle};
use gravwar_core::constants::*;
use gravwar_core::enums::{AnimationState, StrafeDirection, TurnMode};
use gravwar_core::types::{barrel_roll, unit_from_degrees};
use gravwar_terrain::PlanetSurface;

use crate::relations::HomePlanet;
use crate::roster::is_alive;

/// Step every living vehicle. Vehicles out of health are marked `Dead`
/// for cleanup.
pub fn run(world: &mut World, turn_mode: TurnMode, dt: f32) {
    let mut wrecked: Vec<Entity> = Vec::new();
    let mut query = world.query::<(&mut Vehicle, &mut Kinematics, &HomePlanet, Option<&Dead>)>();
    for (entity, (vehicle, kin, home, dead)) in query.iter() {
        if !is_alive(vehicle) {
            vehicle.strafe = None;
            if dead.is_none() {
                wrecked.push(entity);
            }
            continue;
        }

        let strafing = strafe(vehicle, turn_mode, dt);

        vehicle.power = (vehicle.power + vehicle.power_speed * dt)
            .clamp(0.0, VEHICLE_BASE_POWER + vehicle.fuel);
        vehicle.turret_angle = (vehicle.turret_angle
            + TURRET_DEGREES_PER_SEC * vehicle.rot_speed * dt)
            .rem_euclid(360.0);
        vehicle.roll = barrel_roll(vehicle.turret_angle, vehicle.longitude);

        let Ok(surface) = world.get::<&PlanetSurface>(home.0) else {
            continue;
        };
        settle(vehicle, kin, &surface, strafing);
    }
    drop(query);

    for entity in wrecked {
        let _ = world.insert_one(entity, Dead);
    }
}

/// Apply this tick's strafe request. Returns whether the vehicle moved.
fn strafe(vehicle: &mut Vehicle, turn_mode: TurnMode, dt: f32) -> bool {
    let Some(direction) = vehicle.strafe.take() else {
        return false;
    };
    let metered = turn_mode == TurnMode::TurnBased && vehicle.is_player;
    if metered {
        if vehicle.fuel <= 0.0 {
            return false;
        }
        vehicle.fuel = (vehicle.fuel - VEHICLE_FUEL_BURN_RATE * dt).max(0.0);
    }
    let step = STRAFE_DEGREES_PER_SEC * dt;
    let delta = match direction {
        StrafeDirection::Left => step,
        StrafeDirection::Right => -step,
    };
    vehicle.longitude = (vehicle.longitude + delta).rem_euclid(360.0);
    true
}

/// Put the vehicle on the surface under its longitude, falling toward it
/// when the ground has dropped away.
fn settle(vehicle: &mut Vehicle, kin: &mut Kinematics, surface: &PlanetSurface, strafing: bool) {
    let up = unit_from_degrees(vehicle.longitude);
    let rest = surface.altitude_at_degrees(vehicle.longitude) + VEHICLE_HALF_HEIGHT;
    let current = (kin.position - surface.center).length();

    if !strafing && current - rest > FALL_THRESHOLD {
        vehicle.animation = AnimationState::Falling;
        kin.position = surface.center + (current - FALL_STEP) * up;
    } else {
        vehicle.animation = AnimationState::Normal;
        kin.position = surface.center + rest * up;
    }
}
