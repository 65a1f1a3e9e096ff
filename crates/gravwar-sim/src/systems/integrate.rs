//! Semi-implicit Euler integration.
//!
//! All velocities are updated first, then all positions from the new
//! velocities. Mobile planets carry their surface along.

use hecs::World;

use gravwar_core::components::{Dead, GravityAffected, Kinematics};
use gravwar_terrain::PlanetSurface;

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (kin, _affected, dead)) in
        world.query_mut::<(&mut Kinematics, &GravityAffected, Option<&Dead>)>()
    {
        if dead.is_none() {
            kin.previous = kin.position;
            kin.velocity += kin.acceleration * dt;
        }
    }

    for (_entity, (kin, _affected, dead)) in
        world.query_mut::<(&mut Kinematics, &GravityAffected, Option<&Dead>)>()
    {
        if dead.is_none() {
            kin.position += kin.velocity * dt;
        }
    }

    sync_planet_centers(world);
}

/// Move each planet surface to its body's position.
pub fn sync_planet_centers(world: &mut World) {
    for (_entity, (surface, kin)) in world.query_mut::<(&mut PlanetSurface, &Kinematics)>() {
        if surface.center != kin.position {
            surface.set_center(kin.position);
        }
    }
}
