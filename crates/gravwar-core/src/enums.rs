//! Enumerations shared across the simulation.

use serde::{Deserialize, Serialize};

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level loaded yet.
    #[default]
    Setup,
    Active,
    Paused,
    /// At most one vehicle is left alive.
    GameOver,
}

/// How control passes between vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnMode {
    /// One vehicle acts at a time; shots must settle before the turn passes.
    #[default]
    TurnBased,
    /// Every vehicle acts every tick.
    Realtime,
}

/// Projectile kinds, in inventory order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Standard,
    Dirt,
    Splitter,
    BigBlast,
    Bouncer,
    Timed,
    Teleport,
    MultiShot,
    Accelerating,
    Airburst,
    Fatman,
    Wormhole,
    Mine,
}

impl ProjectileKind {
    pub const COUNT: usize = 13;

    pub const ALL: [ProjectileKind; Self::COUNT] = [
        ProjectileKind::Standard,
        ProjectileKind::Dirt,
        ProjectileKind::Splitter,
        ProjectileKind::BigBlast,
        ProjectileKind::Bouncer,
        ProjectileKind::Timed,
        ProjectileKind::Teleport,
        ProjectileKind::MultiShot,
        ProjectileKind::Accelerating,
        ProjectileKind::Airburst,
        ProjectileKind::Fatman,
        ProjectileKind::Wormhole,
        ProjectileKind::Mine,
    ];

    /// Position in `ALL` and in inventory count arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Standard and Dirt rounds never run out.
    pub fn is_infinite(self) -> bool {
        matches!(self, ProjectileKind::Standard | ProjectileKind::Dirt)
    }
}

/// Per-vehicle controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleState {
    /// Input-driven; the AI does nothing.
    Manual,
    #[default]
    Wait,
    /// Run the aim search this tick.
    Think,
    /// Strafe toward the desired longitude.
    Move,
    /// Rotate the turret toward the desired angle.
    Aim,
    /// Adjust power toward the desired power.
    Power,
    /// Fire once the gun is ready.
    Fire,
    /// Wait for the shot to settle.
    PostFire,
    Dead,
}

/// Strafe intent set by input or the AI for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrafeDirection {
    /// Longitude increases.
    Left,
    /// Longitude decreases.
    Right,
}

/// Vehicle render animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Normal,
    /// Settling down onto the surface after terrain below was removed.
    Falling,
}

/// Aim search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Uniform sampling of angle and power.
    Random,
    /// Finite-difference descent on angle and power.
    #[default]
    Gradient,
}

/// Vehicle tint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleColor {
    #[default]
    Red,
    Blue,
    White,
    LimeGreen,
    Gold,
    Green,
    Purple,
    Orange,
}

/// Sound identifiers for the audio collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    #[default]
    Explosion,
    BigExplosion,
}
