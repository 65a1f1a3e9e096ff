//! Handle components linking entities to each other.
//!
//! These hold `hecs::Entity` values, so they live here rather than in the
//! core crate. A handle may outlive its target; check it with
//! `world.contains` or a fallible `world.get` before use.

use hecs::Entity;

/// Vehicle that fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Entity);

/// Planet a vehicle stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomePlanet(pub Entity);

/// The other end of a wormhole pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WormholeLink(pub Entity);

/// Stable vehicle number, the order of the level's vehicle records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VehicleNumber(pub u32);
