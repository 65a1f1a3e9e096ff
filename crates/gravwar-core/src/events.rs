//! Events emitted by the simulation for audio and visual feedback.
//!
//! Fire-and-forget: the simulation never waits for a consumer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio events for the sound collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A vehicle or a splitting projectile fired.
    Shoot { position: Vec2 },
    /// A projectile exploded.
    Explosion {
        position: Vec2,
        volume: f32,
        cue: SoundCue,
    },
    /// A vehicle took damage. Volume is damage relative to prior health.
    Damage { volume: f32 },
    /// A projectile left the world.
    Ricochet { position: Vec2 },
}

/// Particle effects for the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    /// Blast flash scaled to the explosion radius.
    Explosion { position: Vec2, radius: f32 },
    /// One puff of crater smoke drifting toward the planet center.
    Smoke {
        position: Vec2,
        velocity: Vec2,
        scale: f32,
    },
    /// Muzzle spark.
    Spark { position: Vec2 },
    /// Vehicle destroyed.
    DeathPuff { position: Vec2 },
}
