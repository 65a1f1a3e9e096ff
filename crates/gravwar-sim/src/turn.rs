//! Turn rotation: who holds control, wormhole ageing and the win check.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use gravwar_core::components::{AiBrain, Vehicle, Wormhole};
use gravwar_core::constants::*;
use gravwar_core::enums::{TurnMode, VehicleState};
use gravwar_core::state::TurnView;
use gravwar_core::types::unit_from_degrees;
use gravwar_terrain::PlanetSurface;

use crate::roster::{living_vehicles, vehicle_alive, wormhole_lifetime};
use crate::world_setup::spawn_wormhole_pair;

/// Result of a turn change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// At most one vehicle is left.
    GameOver,
}

/// Turn bookkeeping for one match.
#[derive(Debug, Clone, Default)]
pub struct TurnTracker {
    pub total_turns: u32,
    /// Vehicle holding the turn.
    pub current: Option<Entity>,
    /// Its number, kept after the entity itself is gone.
    pub current_number: Option<u32>,
    pub winner: Option<u32>,
}

impl TurnTracker {
    /// Reset for a new match. In turn mode the first living vehicle gets
    /// control.
    pub fn start(world: &mut World, mode: TurnMode) -> Self {
        let mut tracker = Self::default();
        if mode == TurnMode::TurnBased {
            if let Some(&(entity, number)) = living_vehicles(world).first() {
                give_control(world, entity);
                tracker.current = Some(entity);
                tracker.current_number = Some(number);
            }
        }
        tracker
    }

    /// Whether the current holder still exists.
    pub fn holder_missing(&self, world: &World) -> bool {
        match self.current {
            Some(entity) => !world.contains(entity),
            None => true,
        }
    }

    /// Pass control to the next living vehicle in number order.
    pub fn next_turn<R: Rng + ?Sized>(&mut self, world: &mut World, rng: &mut R) -> TurnOutcome {
        self.total_turns += 1;

        let living = living_vehicles(world);
        if living.len() <= 1 {
            self.winner = living.first().map(|&(_, number)| number);
            if let Some(entity) = self.current.take() {
                take_control(world, entity);
            }
            log::info!(
                "Game over after {} turns, winner {:?}",
                self.total_turns,
                self.winner
            );
            return TurnOutcome::GameOver;
        }

        maybe_open_wormholes(world, rng);
        age_wormholes(world);

        if let Some(entity) = self.current {
            take_control(world, entity);
        }

        let after = self.current_number;
        let next = living
            .iter()
            .find(|&&(_, number)| after.map_or(true, |current| number > current))
            .or_else(|| living.first())
            .copied();

        if let Some((entity, number)) = next {
            give_control(world, entity);
            self.current = Some(entity);
            self.current_number = Some(number);
            log::info!("Turn {}: vehicle {} in control", self.total_turns, number);
        }
        TurnOutcome::Continue
    }

    /// Declare the game over without rotating (real-time mode).
    pub fn finish(&mut self, world: &World) {
        self.winner = living_vehicles(world).first().map(|&(_, number)| number);
        log::info!("Game over, winner {:?}", self.winner);
    }

    pub fn view(&self) -> TurnView {
        TurnView {
            total_turns: self.total_turns,
            current_vehicle: self.current_number,
            winner: self.winner,
        }
    }
}

fn take_control(world: &mut World, entity: Entity) {
    if let Ok(mut vehicle) = world.get::<&mut Vehicle>(entity) {
        vehicle.in_control = false;
        vehicle.strafe = None;
        vehicle.rot_speed = 0.0;
        vehicle.power_speed = 0.0;
    }
}

/// Hand the turn to a vehicle: fresh fuel, controller back to its idle state.
fn give_control(world: &mut World, entity: Entity) {
    if !vehicle_alive(world, entity) {
        return;
    }
    let is_player = match world.get::<&mut Vehicle>(entity) {
        Ok(mut vehicle) => {
            vehicle.in_control = true;
            vehicle.fuel = VEHICLE_MAX_FUEL;
            vehicle.is_player
        }
        Err(_) => return,
    };
    if let Ok(mut brain) = world.get::<&mut AiBrain>(entity) {
        brain.state = if is_player {
            VehicleState::Manual
        } else {
            VehicleState::Wait
        };
        brain.post_fire_timer = None;
    }
}

/// With no wormholes open, roll to open a pair above random planets.
fn maybe_open_wormholes<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    if world.query::<&Wormhole>().iter().next().is_some() {
        return;
    }
    if rng.gen_range(0..6) >= WORMHOLE_SPAWN_ROLL {
        return;
    }

    let planets: Vec<(Vec2, f32)> = world
        .query::<&PlanetSurface>()
        .iter()
        .map(|(_, surface)| (surface.center, surface.sealevel_radius))
        .collect();
    if planets.is_empty() {
        return;
    }

    let first = rng.gen_range(0..planets.len());
    let second = rng.gen_range(0..planets.len());
    let angle_a: f32 = rng.gen_range(0.0..360.0);
    let angle_b = if first == second {
        angle_a + rng.gen_range(WORMHOLE_MIN_SEPARATION_DEG..=360.0 - WORMHOLE_MIN_SEPARATION_DEG)
    } else {
        rng.gen_range(0.0..360.0)
    };

    let place = |(center, sealevel): (Vec2, f32), angle: f32| {
        center + (sealevel + WORMHOLE_ALTITUDE) * unit_from_degrees(angle)
    };
    let turns = wormhole_lifetime(world);
    spawn_wormhole_pair(
        world,
        place(planets[first], angle_a),
        place(planets[second], angle_b),
        turns,
    );
    log::debug!("Wormholes opened for {} turns", turns);
}

/// Count every wormhole down one turn; close all of them once any runs out.
fn age_wormholes(world: &mut World) {
    let mut expired = false;
    for (_entity, wormhole) in world.query_mut::<&mut Wormhole>() {
        wormhole.turns_remaining = wormhole.turns_remaining.saturating_sub(1);
        expired |= wormhole.turns_remaining == 0;
    }
    if !expired {
        return;
    }
    let holes: Vec<Entity> = world
        .query::<&Wormhole>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in holes {
        let _ = world.despawn(entity);
    }
    log::debug!("Wormholes closed");
}
