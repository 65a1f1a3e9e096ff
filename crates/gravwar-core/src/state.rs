//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, FxEvent};
use crate::level::WorldSize;
use crate::types::SimTime;

/// Complete game state after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub turn_mode: TurnMode,
    pub world: WorldSize,
    pub turn: TurnView,
    pub planets: Vec<PlanetView>,
    pub vehicles: Vec<VehicleView>,
    pub projectiles: Vec<ProjectileView>,
    pub wormholes: Vec<WormholeView>,
    /// Predicted path of the controlled player's next shot.
    pub aim_preview: Vec<Vec2>,
    pub audio_events: Vec<AudioEvent>,
    pub fx_events: Vec<FxEvent>,
}

/// Turn bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnView {
    /// Turns completed so far.
    pub total_turns: u32,
    /// Vehicle number currently in control (turn mode).
    pub current_vehicle: Option<u32>,
    /// Surviving vehicle once the game is over.
    pub winner: Option<u32>,
}

/// A terrain body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetView {
    pub index: usize,
    pub center: Vec2,
    pub mass: f32,
    pub sealevel_radius: f32,
    pub core_radius: f32,
    pub max_altitude: f32,
    /// Radius from the center per angular bucket.
    pub samples: Vec<f32>,
}

/// A vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    /// Stable number assigned at level load (order of the level records).
    pub number: u32,
    pub position: Vec2,
    pub planet: Option<usize>,
    pub longitude: f32,
    /// Body roll (radians).
    pub roll: f32,
    pub turret_angle: f32,
    pub power: f32,
    pub health: f32,
    pub fuel: f32,
    pub color: VehicleColor,
    pub is_player: bool,
    pub in_control: bool,
    pub state: VehicleState,
    pub animation: AnimationState,
    pub selected_kind: ProjectileKind,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Sprite roll along the velocity (radians).
    pub roll: f32,
}

/// One end of a wormhole pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormholeView {
    pub position: Vec2,
    pub radius: f32,
    pub exit: Option<Vec2>,
    pub turns_remaining: u32,
}
