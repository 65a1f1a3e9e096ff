//! Simulation engine for gravwar.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod arsenal;
pub mod detonation;
pub mod engine;
pub mod events;
pub mod phantom;
pub mod physics;
pub mod relations;
pub mod roster;
pub mod scenario;
pub mod systems;
pub mod turn;
pub mod weapons;
pub mod world_setup;

pub use gravwar_core as core;
pub use engine::{SimConfig, SimulationEngine};
