//! Aiming AI for GRAVWAR.
//!
//! Implements the vehicle aiming state machine, shot scoring, and the
//! randomized and gradient searches over (angle, power, longitude). No ECS
//! dependency: shots are evaluated through the `ShotEvaluator` trait.

pub mod fsm;
pub mod profiles;
pub mod scoring;
pub mod search;

pub use gravwar_core as core;

pub use search::{run_search, SearchBudget, SearchOutcome, ShotEvaluator};

#[cfg(test)]
mod tests;
