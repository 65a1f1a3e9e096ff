//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectileKind;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// A bounding circle in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether two circles overlap or touch.
    pub fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn translated(&self, offset: Vec2) -> Circle {
        Circle::new(self.center + offset, self.radius)
    }
}

/// Aiming parameters searched by the AI and held by every vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimParams {
    /// Turret angle relative to the local horizon (degrees, 90 = straight up).
    pub angle: f32,
    /// Muzzle speed.
    pub power: f32,
    /// Firing position around the home planet (degrees).
    pub longitude: f32,
}

impl AimParams {
    pub fn new(angle: f32, power: f32, longitude: f32) -> Self {
        Self {
            angle,
            power,
            longitude,
        }
    }

    /// Barrel direction in world space.
    pub fn view(&self) -> Vec2 {
        view_vector(barrel_roll(self.angle, self.longitude))
    }
}

/// Per-kind ammunition counts and the currently selected kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub counts: [u32; ProjectileKind::COUNT],
    pub selected: ProjectileKind,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            counts: [9999, 9999, 5, 5, 5, 5, 5, 5, 5, 5, 1, 2, 2],
            selected: ProjectileKind::Standard,
        }
    }
}

impl Inventory {
    /// Whether at least one round of `kind` remains.
    pub fn has(&self, kind: ProjectileKind) -> bool {
        kind.is_infinite() || self.counts[kind.index()] > 0
    }

    /// Remove one round of `kind`. Infinite kinds are never decremented.
    pub fn consume(&mut self, kind: ProjectileKind) {
        if !kind.is_infinite() {
            let count = &mut self.counts[kind.index()];
            *count = count.saturating_sub(1);
        }
        if !self.has(self.selected) {
            self.advance();
        }
    }

    /// Select the next kind with rounds left, wrapping around.
    pub fn advance(&mut self) -> ProjectileKind {
        let start = self.selected.index();
        for step in 1..=ProjectileKind::COUNT {
            let kind = ProjectileKind::ALL[(start + step) % ProjectileKind::COUNT];
            if self.has(kind) {
                self.selected = kind;
                break;
            }
        }
        self.selected
    }

    /// Select `kind`, or the next available kind after it if it is exhausted.
    pub fn select(&mut self, kind: ProjectileKind) -> ProjectileKind {
        self.selected = kind;
        if !self.has(kind) {
            self.advance();
        }
        self.selected
    }
}

/// Unit vector at `degrees` from the +x axis.
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Angle of `v` from the +x axis in degrees, in (-180, 180].
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Signed shortest difference `to - from` in degrees, in [-180, 180).
pub fn shortest_delta_degrees(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Sprite roll of a barrel at `turret_angle` on a vehicle at `longitude`.
pub fn barrel_roll(turret_angle: f32, longitude: f32) -> f32 {
    std::f32::consts::PI + (turret_angle + longitude).to_radians()
}

/// Direction a sprite with the given roll is facing.
pub fn view_vector(roll: f32) -> Vec2 {
    Vec2::new(-roll.sin(), roll.cos())
}
