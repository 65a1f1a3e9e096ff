//! Parsed level records.
//!
//! The simulation never reads level files itself; a loader hands it a
//! `LevelDescription`. The same type serializes back for editors and tools.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use crate::enums::VehicleColor;

/// Everything needed to build a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub world: WorldSize,
    pub planets: Vec<PlanetRecord>,
    pub vehicles: Vec<VehicleRecord>,
}

/// Playable rectangle; the origin is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl WorldSize {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// One terrain body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub position: Vec2,
    /// Zero for a body that does not attract.
    pub mass: f32,
    /// Sea-level radius.
    pub radius: f32,
    /// Whether the body itself falls under gravity.
    #[serde(default)]
    pub mobile: bool,
}

/// One vehicle and where it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Starting longitude on the home planet (degrees).
    pub longitude: f32,
    /// Index into `LevelDescription::planets`.
    pub planet: usize,
    #[serde(default)]
    pub color: VehicleColor,
    #[serde(default)]
    pub is_player: bool,
}

/// Reasons a level cannot be played as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LevelError {
    #[error("level has no planets")]
    NoPlanets,
    #[error("level has fewer than two vehicles ({0})")]
    TooFewVehicles(usize),
    #[error("invalid world size {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },
    #[error("planet {index} has invalid radius {radius}")]
    InvalidPlanetRadius { index: usize, radius: f32 },
    #[error("planet {index} has invalid mass {mass}")]
    InvalidPlanetMass { index: usize, mass: f32 },
}

impl LevelDescription {
    /// Check the records that cannot be repaired locally.
    pub fn validate(&self) -> Result<(), LevelError> {
        let world = self.world;
        if !(world.width.is_finite() && world.height.is_finite())
            || world.width <= 0.0
            || world.height <= 0.0
        {
            return Err(LevelError::InvalidWorld {
                width: world.width,
                height: world.height,
            });
        }
        if self.planets.is_empty() {
            return Err(LevelError::NoPlanets);
        }
        for (index, planet) in self.planets.iter().enumerate() {
            if !planet.radius.is_finite() || planet.radius <= 0.0 {
                return Err(LevelError::InvalidPlanetRadius {
                    index,
                    radius: planet.radius,
                });
            }
            if !planet.mass.is_finite() || planet.mass < 0.0 {
                return Err(LevelError::InvalidPlanetMass {
                    index,
                    mass: planet.mass,
                });
            }
        }
        if self.vehicles.len() < 2 {
            return Err(LevelError::TooFewVehicles(self.vehicles.len()));
        }
        Ok(())
    }

    /// Point vehicles at planet 0 when their planet index is out of range.
    /// Returns how many records were repaired.
    pub fn normalize(&mut self) -> usize {
        let planet_count = self.planets.len();
        let mut repaired = 0;
        for vehicle in &mut self.vehicles {
            if vehicle.planet >= planet_count {
                vehicle.planet = 0;
                repaired += 1;
            }
            vehicle.longitude = vehicle.longitude.rem_euclid(360.0);
        }
        repaired
    }

    /// Number of vehicles that start under player control.
    pub fn player_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_player).count()
    }
}
