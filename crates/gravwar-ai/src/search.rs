//! Aim search over (angle, power, longitude).
//!
//! Both strategies only ever see shots through a `ShotEvaluator`, so they
//! can be driven by phantom simulation in the engine or by plain functions
//! in tests.

use std::time::{Duration, Instant};

use rand::Rng;

use gravwar_core::constants::*;
use gravwar_core::enums::{SearchStrategy, TurnMode};
use gravwar_core::types::AimParams;

use crate::profiles::{get_profile, SearchProfile};
use crate::scoring::sanitize;

/// Something that can score a candidate aim. Lower is better.
pub trait ShotEvaluator {
    fn evaluate(&mut self, aim: &AimParams) -> f32;
}

impl<F> ShotEvaluator for F
where
    F: FnMut(&AimParams) -> f32,
{
    fn evaluate(&mut self, aim: &AimParams) -> f32 {
        self(aim)
    }
}

/// Iteration cap and optional wall-clock cap for one search call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBudget {
    pub iterations: u32,
    pub time_box: Option<Duration>,
}

impl SearchBudget {
    pub fn iterations(iterations: u32) -> Self {
        Self {
            iterations,
            time_box: None,
        }
    }
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best aim found; the initial aim when nothing improved on it.
    pub best: AimParams,
    pub best_score: f32,
    /// Score of every accepted improvement, in order. Strictly decreasing.
    pub accepted: Vec<f32>,
    /// Total evaluator calls.
    pub evaluations: u32,
}

impl SearchOutcome {
    pub fn improved(&self) -> bool {
        !self.accepted.is_empty()
    }
}

/// Tracks the best aim and counts evaluations.
struct Tracker<'a, E: ShotEvaluator + ?Sized> {
    evaluator: &'a mut E,
    outcome: SearchOutcome,
}

impl<'a, E: ShotEvaluator + ?Sized> Tracker<'a, E> {
    fn new(evaluator: &'a mut E, initial: AimParams) -> Self {
        let mut tracker = Self {
            evaluator,
            outcome: SearchOutcome {
                best: initial,
                best_score: f32::MAX,
                accepted: Vec::new(),
                evaluations: 0,
            },
        };
        tracker.outcome.best_score = tracker.score(&initial);
        tracker
    }

    fn score(&mut self, aim: &AimParams) -> f32 {
        self.outcome.evaluations += 1;
        sanitize(self.evaluator.evaluate(aim))
    }

    /// Keep `aim` if `score` beats the best so far.
    fn offer(&mut self, aim: AimParams, score: f32) -> bool {
        if score < self.outcome.best_score {
            self.outcome.best = aim;
            self.outcome.best_score = score;
            self.outcome.accepted.push(score);
            true
        } else {
            false
        }
    }
}

fn within_time(start: Instant, time_box: Option<Duration>) -> bool {
    time_box.map_or(true, |limit| start.elapsed() < limit)
}

fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Randomized search: uniform integer angle and power samples at the
/// current longitude. An accepted angle gets a small random deflection.
pub fn random_search<E, R>(
    evaluator: &mut E,
    initial: AimParams,
    budget: SearchBudget,
    rng: &mut R,
) -> SearchOutcome
where
    E: ShotEvaluator + ?Sized,
    R: Rng + ?Sized,
{
    let start = Instant::now();
    let mut tracker = Tracker::new(evaluator, initial);

    for _ in 0..budget.iterations {
        if !within_time(start, budget.time_box) {
            break;
        }
        let angle = (rng.gen_range(RANDOM_SEARCH_ANGLE_MIN..=RANDOM_SEARCH_ANGLE_MAX) as f32)
            .rem_euclid(360.0);
        let power = rng.gen_range(RANDOM_SEARCH_POWER_MIN..=RANDOM_SEARCH_POWER_MAX) as f32;
        let sample = AimParams::new(angle, power, initial.longitude);

        let score = tracker.score(&sample);
        if score < tracker.outcome.best_score {
            let deflection =
                rng.gen_range(-RANDOM_SEARCH_DEFLECTION..=RANDOM_SEARCH_DEFLECTION);
            let deflected = AimParams::new(angle + deflection, power, initial.longitude);
            tracker.offer(deflected, score);
        }
    }
    tracker.outcome
}

/// Local gradient descent on angle and power after one random longitude
/// perturbation. Only improvements over the best score are accepted.
pub fn gradient_search<E, R>(
    evaluator: &mut E,
    initial: AimParams,
    profile: &SearchProfile,
    budget: SearchBudget,
    rng: &mut R,
) -> SearchOutcome
where
    E: ShotEvaluator + ?Sized,
    R: Rng + ?Sized,
{
    let start = Instant::now();
    let mut tracker = Tracker::new(evaluator, initial);

    let step = profile.longitude_step;
    let longitude = if step > 0.0 {
        (initial.longitude + rng.gen_range(-step..=step)).rem_euclid(360.0)
    } else {
        initial.longitude
    };

    let (angle_min, angle_max) = profile.angle_bounds;
    let (power_min, power_max) = profile.power_bounds;
    let mut angle = initial.angle;
    let mut power = initial.power;

    for _ in 0..budget.iterations {
        if !within_time(start, budget.time_box) {
            break;
        }
        let here = tracker.score(&AimParams::new(angle, power, longitude));
        let d_angle = (tracker.score(&AimParams::new(
            angle + GRADIENT_ANGLE_EPSILON,
            power,
            longitude,
        )) - here)
            / GRADIENT_ANGLE_EPSILON;
        let d_power = (tracker.score(&AimParams::new(
            angle,
            power + GRADIENT_POWER_EPSILON,
            longitude,
        )) - here)
            / GRADIENT_POWER_EPSILON;

        angle = (angle - finite_or_zero(GRADIENT_ANGLE_RATE * d_angle))
            .rem_euclid(360.0)
            .clamp(angle_min, angle_max);
        power = (power - finite_or_zero(GRADIENT_POWER_RATE * d_power)).clamp(power_min, power_max);

        let candidate = AimParams::new(angle, power, longitude);
        let score = tracker.score(&candidate);
        tracker.offer(candidate, score);
    }
    tracker.outcome
}

/// Run the configured search for a vehicle.
pub fn run_search<E, R>(
    strategy: SearchStrategy,
    mode: TurnMode,
    accuracy: f32,
    time_box: Option<Duration>,
    evaluator: &mut E,
    initial: AimParams,
    rng: &mut R,
) -> SearchOutcome
where
    E: ShotEvaluator + ?Sized,
    R: Rng + ?Sized,
{
    let profile = get_profile(strategy, mode);
    let budget = SearchBudget {
        iterations: profile.iterations(accuracy),
        time_box,
    };
    let outcome = match strategy {
        SearchStrategy::Random => random_search(evaluator, initial, budget, rng),
        SearchStrategy::Gradient => gradient_search(evaluator, initial, &profile, budget, rng),
    };
    log::debug!(
        "{:?} search: {} evaluations, {} accepted, best {:.1} at angle {:.1} power {:.0} longitude {:.1}",
        strategy,
        outcome.evaluations,
        outcome.accepted.len(),
        outcome.best_score,
        outcome.best.angle,
        outcome.best.power,
        outcome.best.longitude
    );
    outcome
}
