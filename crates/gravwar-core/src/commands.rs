//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Vehicle
//! commands act on the player vehicle currently in control.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::level::LevelDescription;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Load a level (the default level when `None`) and start playing.
    StartMatch { level: Option<LevelDescription> },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Vehicle movement ---
    /// Move the controlled vehicle toward increasing longitude this tick.
    StrafeLeft,
    /// Move the controlled vehicle toward decreasing longitude this tick.
    StrafeRight,
    /// Cancel any strafe requested this tick.
    StrafeBack,

    // --- Turret ---
    /// Turret rotation in units of 30°/s (negative turns clockwise).
    SetRotSpeed { speed: f32 },
    /// Power change per second.
    SetPowerSpeed { speed: f32 },
    /// Set power directly (clamped to the vehicle's ceiling).
    SetPower { power: f32 },

    // --- Weapons ---
    /// Fire the given kind, or the selected kind when `None`.
    FireGun { kind: Option<ProjectileKind> },
    /// Cycle to the next kind with rounds left.
    NextBulletType,
    /// Trigger the special of every live MultiShot/Airburst the player owns.
    TriggerSpecial,
}
