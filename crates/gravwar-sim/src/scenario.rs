//! Built-in levels.
//!
//! Used when no level is supplied and as the fallback for levels that fail
//! validation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use gravwar_core::enums::VehicleColor;
use gravwar_core::level::{LevelDescription, PlanetRecord, VehicleRecord, WorldSize};

/// Built-in level identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// A heavy home world with a light moon.
    #[default]
    Classic,
    /// Three equal planets.
    Trinary,
}

impl ScenarioId {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(ScenarioId::Classic),
            "trinary" => Some(ScenarioId::Trinary),
            _ => None,
        }
    }
}

/// Build the level for a scenario.
pub fn build_level(scenario: ScenarioId) -> LevelDescription {
    match scenario {
        ScenarioId::Classic => build_classic(),
        ScenarioId::Trinary => build_trinary(),
    }
}

/// The level loaded when none is given.
pub fn default_level() -> LevelDescription {
    build_level(ScenarioId::default())
}

fn vehicle(longitude: f32, planet: usize, color: VehicleColor) -> VehicleRecord {
    VehicleRecord {
        longitude,
        planet,
        color,
        is_player: false,
    }
}

fn planet(position: Vec2, mass: f32, radius: f32) -> PlanetRecord {
    PlanetRecord {
        position,
        mass,
        radius,
        mobile: false,
    }
}

/// Classic: eight vehicles split between a home world and a moon.
/// Red is the player.
fn build_classic() -> LevelDescription {
    let world = WorldSize::default();
    let center = world.as_vec2() / 2.0;

    LevelDescription {
        name: "classic".into(),
        world,
        planets: vec![
            planet(center, 100.0, 900.0),
            planet(center + Vec2::new(1500.0, 1500.0), 10.0, 500.0),
        ],
        vehicles: vec![
            VehicleRecord {
                is_player: true,
                ..vehicle(90.0, 0, VehicleColor::Red)
            },
            vehicle(270.0, 1, VehicleColor::Blue),
            vehicle(180.0, 1, VehicleColor::White),
            vehicle(90.0, 1, VehicleColor::LimeGreen),
            vehicle(0.0, 1, VehicleColor::Gold),
            vehicle(180.0, 0, VehicleColor::Green),
            vehicle(270.0, 0, VehicleColor::Purple),
            vehicle(0.0, 0, VehicleColor::Orange),
        ],
    }
}

/// Trinary: three equal planets in a triangle. Red is the player.
fn build_trinary() -> LevelDescription {
    let world = WorldSize::default();
    let center = world.as_vec2() / 2.0;

    LevelDescription {
        name: "trinary".into(),
        world,
        planets: vec![
            planet(center, 100.0, 700.0),
            planet(center + Vec2::new(1200.0, 1200.0), 100.0, 700.0),
            planet(center + Vec2::new(-1200.0, 1200.0), 100.0, 700.0),
        ],
        vehicles: vec![
            VehicleRecord {
                is_player: true,
                ..vehicle(90.0, 0, VehicleColor::Red)
            },
            vehicle(270.0, 1, VehicleColor::Blue),
            vehicle(180.0, 2, VehicleColor::White),
            vehicle(90.0, 1, VehicleColor::LimeGreen),
            vehicle(0.0, 1, VehicleColor::Gold),
            vehicle(180.0, 0, VehicleColor::Green),
            vehicle(270.0, 0, VehicleColor::Purple),
            vehicle(0.0, 2, VehicleColor::Orange),
        ],
    }
}
