//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod collision;
pub mod gravity;
pub mod integrate;
pub mod projectile;
pub mod snapshot;
pub mod vehicle;
pub mod vehicle_ai;
pub mod world_edge;
