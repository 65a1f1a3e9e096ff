//! Search profiles per strategy and turn mode.
//!
//! Consolidates the budgets and parameter bounds each search uses.

use gravwar_core::constants::*;
use gravwar_core::enums::{SearchStrategy, TurnMode};

/// Budget and bounds for one search strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProfile {
    pub strategy: SearchStrategy,
    /// Phantom evaluations (random) or descent steps (gradient) per unit of accuracy.
    pub base_iterations: u32,
    /// Random longitude perturbation applied once per search (± degrees).
    pub longitude_step: f32,
    /// Turret bounds (degrees).
    pub angle_bounds: (f32, f32),
    pub power_bounds: (f32, f32),
}

impl SearchProfile {
    /// Iteration cap for the given accuracy multiplier. At least one.
    pub fn iterations(&self, accuracy: f32) -> u32 {
        let scaled = (self.base_iterations as f32 * accuracy.max(0.0)).ceil();
        if scaled.is_finite() {
            (scaled as u32).max(1)
        } else {
            1
        }
    }
}

/// Get the search profile for a strategy in a turn mode.
pub fn get_profile(strategy: SearchStrategy, mode: TurnMode) -> SearchProfile {
    match strategy {
        SearchStrategy::Random => SearchProfile {
            strategy,
            base_iterations: RANDOM_SEARCH_SAMPLES,
            longitude_step: 0.0,
            angle_bounds: (
                RANDOM_SEARCH_ANGLE_MIN as f32,
                RANDOM_SEARCH_ANGLE_MAX as f32,
            ),
            power_bounds: (
                RANDOM_SEARCH_POWER_MIN as f32,
                RANDOM_SEARCH_POWER_MAX as f32,
            ),
        },
        SearchStrategy::Gradient => SearchProfile {
            strategy,
            base_iterations: match mode {
                TurnMode::TurnBased => GRADIENT_ITERATIONS_TURN,
                TurnMode::Realtime => GRADIENT_ITERATIONS_REALTIME,
            },
            longitude_step: GRADIENT_MAX_LONGITUDE_STEP,
            angle_bounds: (GRADIENT_ANGLE_MIN, GRADIENT_ANGLE_MAX),
            power_bounds: (GRADIENT_POWER_MIN, GRADIENT_POWER_MAX),
        },
    }
}
