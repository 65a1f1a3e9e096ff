//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior. Handles between
//! entities (owner, home planet, wormhole partner) live in the sim crate,
//! which is the only crate that knows about hecs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::AimParams;

/// Position, velocity and acceleration of anything that moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    /// Position before the last integration step.
    pub previous: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            previous: position,
            ..Default::default()
        }
    }

    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::at(position)
        }
    }
}

/// Bounding-circle radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}

/// Present on every massive body; the body attracts everything gravity-affected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    pub value: f32,
}

/// Marker: the entity is pulled by every massive body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityAffected;

/// Marker: the entity died this tick and is removed by cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dead;

/// Marker: a mobile entity that is neither projectile nor vehicle.
/// Reflects off terrain and is held back at the world edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drifter;

/// Identity of a terrain body within its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetId {
    pub index: usize,
}

/// Projectile state. Static per-kind data comes from the arsenal table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f32,
    pub explosion_radius: f32,
    /// Seconds since launch.
    pub age_secs: f32,
    /// Lifetime in seconds; the projectile detonates when `age_secs` reaches it.
    pub ttl_secs: f32,
    /// Terrain contacts survived so far (Bouncer).
    pub bounces: u32,
    /// Triggered specials used so far (MultiShot, Airburst).
    pub triggers_used: u32,
    /// Children already released; the projectile will not split again.
    pub split_done: bool,
}

/// A ground vehicle bound to its home planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Angle around the home planet (degrees, [0, 360)).
    pub longitude: f32,
    /// Turret angle relative to the local horizon (degrees, [0, 360)).
    pub turret_angle: f32,
    pub power: f32,
    /// Power change per second requested by input or the AI.
    pub power_speed: f32,
    /// Turret rotation request in units of 30°/s.
    pub rot_speed: f32,
    pub health: f32,
    pub fuel: f32,
    /// Strafe request for the current tick, cleared after motion.
    pub strafe: Option<StrafeDirection>,
    pub animation: AnimationState,
    pub color: VehicleColor,
    pub is_player: bool,
    /// Whether this vehicle holds the turn.
    pub in_control: bool,
    /// Simulation time of the last shot (seconds).
    pub last_fired_secs: f64,
    /// Body roll derived from turret and longitude.
    pub roll: f32,
}

impl Vehicle {
    pub fn new(longitude: f32, power: f32, color: VehicleColor, is_player: bool) -> Self {
        Self {
            longitude: longitude.rem_euclid(360.0),
            turret_angle: 0.0,
            power,
            power_speed: 0.0,
            rot_speed: 0.0,
            health: VEHICLE_MAX_HEALTH,
            fuel: VEHICLE_MAX_FUEL,
            strafe: None,
            animation: AnimationState::Normal,
            color,
            is_player,
            in_control: false,
            last_fired_secs: 0.0,
            roll: 0.0,
        }
    }
}

/// Controller state for the aiming state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiBrain {
    pub state: VehicleState,
    /// Aim the controller is steering toward.
    pub desired: AimParams,
    /// Score of `desired` from the last search.
    pub best_score: Option<f32>,
    /// Score of the last real shot's detonation point.
    pub last_impact_score: Option<f32>,
    /// Seconds since the shot settled (turn mode only).
    pub post_fire_timer: Option<f32>,
    /// Difficulty knob scaling every search budget.
    pub accuracy: f32,
}

impl AiBrain {
    pub fn new(desired: AimParams, is_player: bool, accuracy: f32) -> Self {
        Self {
            state: if is_player {
                VehicleState::Manual
            } else {
                VehicleState::Wait
            },
            desired,
            best_score: None,
            last_impact_score: None,
            post_fire_timer: None,
            accuracy,
        }
    }
}

/// One end of a wormhole pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wormhole {
    pub turns_remaining: u32,
}
