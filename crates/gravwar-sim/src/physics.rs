//! Gravity field, energy diagnostics and world bounds.
//!
//! Pure physics computation over a list of massive bodies; the systems and
//! the phantom facility gather that list from their own storage.

use glam::Vec2;
use hecs::{Entity, World};

use gravwar_core::components::{Dead, Kinematics, Mass};
use gravwar_core::constants::*;
use gravwar_core::level::WorldSize;
use gravwar_core::types::Circle;

/// Physical constants for one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub gravitational_constant: f32,
    pub softening: f32,
    /// Seconds per tick.
    pub dt: f32,
    pub world: WorldSize,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            softening: GRAVITY_SOFTENING,
            dt: DT,
            world: WorldSize::default(),
        }
    }
}

/// A body that attracts gravity-affected entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassiveBody {
    pub entity: Option<Entity>,
    pub position: Vec2,
    pub mass: f32,
}

/// Every living entity with positive mass.
pub fn collect_massive(world: &World) -> Vec<MassiveBody> {
    world
        .query::<(&Kinematics, &Mass, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, mass, dead))| dead.is_none() && mass.value > 0.0)
        .map(|(entity, (kin, mass, _))| MassiveBody {
            entity: Some(entity),
            position: kin.position,
            mass: mass.value,
        })
        .collect()
}

/// Gravitational acceleration at `position`, ignoring the body `skip`.
///
/// Each body contributes `G·m·unit(Δ) / (|Δ|² + softening)`.
pub fn gravity_at(
    position: Vec2,
    bodies: &[MassiveBody],
    skip: Option<Entity>,
    params: &PhysicsParams,
) -> Vec2 {
    let mut acceleration = Vec2::ZERO;
    for body in bodies {
        if skip.is_some() && body.entity == skip {
            continue;
        }
        let delta = body.position - position;
        let magnitude =
            params.gravitational_constant * body.mass / (delta.length_squared() + params.softening);
        acceleration += delta.normalize_or_zero() * magnitude;
    }
    acceleration
}

/// Gravitational potential `-G·Σ m/d` at `position`. Coincident bodies are
/// skipped.
pub fn potential_at(position: Vec2, bodies: &[MassiveBody], params: &PhysicsParams) -> f32 {
    let sum: f32 = bodies
        .iter()
        .filter_map(|body| {
            let distance = body.position.distance(position);
            (distance > 0.0).then(|| body.mass / distance)
        })
        .sum();
    -params.gravitational_constant * sum
}

/// Kinetic plus potential energy per unit mass.
pub fn specific_energy(
    position: Vec2,
    velocity: Vec2,
    bodies: &[MassiveBody],
    params: &PhysicsParams,
) -> f32 {
    0.5 * velocity.length_squared() + potential_at(position, bodies, params)
}

/// Whether a bounding circle pokes out of the world rectangle.
pub fn at_world_edge(circle: &Circle, world: WorldSize) -> bool {
    let c = circle.center;
    let r = circle.radius;
    c.x - r < 0.0 || c.x + r > world.width || c.y - r < 0.0 || c.y + r > world.height
}

/// Whether a point lies outside the world rectangle.
pub fn point_at_world_edge(point: Vec2, world: WorldSize) -> bool {
    at_world_edge(&Circle::new(point, 0.0), world)
}
