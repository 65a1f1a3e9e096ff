//! Shot scoring. Lower is better.

use glam::Vec2;

use gravwar_core::constants::*;

/// Replace non-finite scores with the worst possible score.
pub fn sanitize(score: f32) -> f32 {
    if score.is_finite() {
        score
    } else {
        f32::MAX
    }
}

/// Smooth penalty divisor for landing near the shooter: `1 - exp(-|Δ|²/k)`.
/// Approaches 0 at the shooter and 1 far away.
pub fn self_penalty(landing: Vec2, shooter: Vec2) -> f32 {
    1.0 - (-landing.distance_squared(shooter) / SCORE_SELF_PENALTY_K).exp()
}

/// Score a detonation point against the living opponents of the shooter.
///
/// The score is the distance to the nearest opponent divided by the
/// self-proximity penalty, multiplied when the shot ended at the world edge.
/// With no opponent the score is `f32::MAX`.
pub fn score_landing<I>(landing: Vec2, shooter: Vec2, targets: I, at_edge: bool) -> f32
where
    I: IntoIterator<Item = Vec2>,
{
    let penalty = self_penalty(landing, shooter);
    let nearest = targets
        .into_iter()
        .map(|target| sanitize(landing.distance(target) / penalty))
        .fold(f32::MAX, f32::min);

    if nearest == f32::MAX {
        return f32::MAX;
    }
    let score = if at_edge {
        nearest * SCORE_EDGE_MULTIPLIER
    } else {
        nearest
    };
    sanitize(score)
}
