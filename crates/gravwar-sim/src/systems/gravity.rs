//! Gravity system: sets the acceleration of every gravity-affected entity.

use hecs::World;

use gravwar_core::components::{Dead, GravityAffected, Kinematics, Projectile};

use crate::arsenal::get_profile;
use crate::physics::{collect_massive, gravity_at, PhysicsParams};

/// Acceleration = pull of every other massive body, plus thrust along the
/// velocity for projectiles whose kind has it.
pub fn run(world: &mut World, params: &PhysicsParams) {
    let bodies = collect_massive(world);

    for (entity, (kin, _affected, projectile, dead)) in world.query_mut::<(
        &mut Kinematics,
        &GravityAffected,
        Option<&Projectile>,
        Option<&Dead>,
    )>() {
        if dead.is_some() {
            continue;
        }
        let thrust = projectile
            .map(|p| get_profile(p.kind).thrust_gain)
            .unwrap_or(0.0);
        kin.acceleration =
            gravity_at(kin.position, &bodies, Some(entity), params) + thrust * kin.velocity;
    }
}
