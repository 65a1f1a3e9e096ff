//! Cleanup system: despawns every entity marked dead this tick.

use hecs::{Entity, World};

use gravwar_core::components::Dead;

/// Remove dead entities.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, _dead) in world.query_mut::<&Dead>() {
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
