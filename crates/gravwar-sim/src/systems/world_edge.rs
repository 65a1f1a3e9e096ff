//! World edge: projectiles that leave the world die, everything else that
//! moves is held back.

use hecs::{Entity, World};

use gravwar_core::components::{Collider, Dead, GravityAffected, Kinematics, Projectile};
use gravwar_core::types::Circle;

use crate::detonation::ricochet;
use crate::events::EventLog;
use crate::physics::{at_world_edge, PhysicsParams};

pub fn run(world: &mut World, params: &PhysicsParams, events: &mut EventLog) {
    let mut escaped: Vec<Entity> = Vec::new();
    for (entity, (kin, collider, _affected, projectile, dead)) in world.query_mut::<(
        &mut Kinematics,
        &Collider,
        &GravityAffected,
        Option<&Projectile>,
        Option<&Dead>,
    )>() {
        if dead.is_some() {
            continue;
        }
        if !at_world_edge(&Circle::new(kin.position, collider.radius), params.world) {
            continue;
        }
        if projectile.is_some() {
            escaped.push(entity);
        } else {
            kin.position = kin.previous;
        }
    }

    for entity in escaped {
        ricochet(world, entity, events);
    }
}
