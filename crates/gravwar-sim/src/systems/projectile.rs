//! Projectile lifetime: ageing and expiry.

use hecs::{Entity, World};

use gravwar_core::components::{Dead, Projectile};

use crate::detonation::{detonate, Impact};
use crate::events::EventLog;
use crate::physics::PhysicsParams;

/// Age every live projectile and detonate those whose lifetime ran out.
pub fn run(world: &mut World, params: &PhysicsParams, events: &mut EventLog) {
    let mut expired: Vec<Entity> = Vec::new();
    for (entity, (projectile, dead)) in world.query_mut::<(&mut Projectile, Option<&Dead>)>() {
        if dead.is_some() {
            continue;
        }
        projectile.age_secs += params.dt;
        if projectile.age_secs >= projectile.ttl_secs {
            expired.push(entity);
        }
    }

    for entity in expired {
        detonate(world, entity, Impact::Expired, params.world, events);
    }
}
