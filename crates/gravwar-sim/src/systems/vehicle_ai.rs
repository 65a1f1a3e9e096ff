//! Vehicle controller system: runs the aiming state machine for every
//! vehicle and carries out the searches and shots it asks for.

use std::time::Duration;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use gravwar_ai::fsm::{evaluate, VehicleContext};
use gravwar_ai::run_search;
use gravwar_core::components::{AiBrain, Vehicle};
use gravwar_core::constants::*;
use gravwar_core::enums::{ProjectileKind, SearchStrategy, TurnMode};
use gravwar_core::types::{AimParams, Inventory};

use crate::events::EventLog;
use crate::phantom::{PhantomEvaluator, PhantomWorld};
use crate::physics::PhysicsParams;
use crate::relations::HomePlanet;
use crate::roster::{is_alive, opponent_positions, projectiles_in_flight, vehicles_by_number};
use crate::weapons::{fire, random_available_kind};

/// Match-wide inputs the controllers need.
pub struct AiContext {
    pub turn_mode: TurnMode,
    pub strategy: SearchStrategy,
    pub time_box: Option<Duration>,
    pub now_secs: f64,
    pub params: PhysicsParams,
}

/// Step every controller once. Returns true when the vehicle holding the
/// turn asked to hand it on.
pub fn run(world: &mut World, ctx: &AiContext, rng: &mut ChaCha8Rng, events: &mut EventLog) -> bool {
    let turns_enabled = ctx.turn_mode == TurnMode::TurnBased;
    let mut in_flight = projectiles_in_flight(world);
    let mut end_turn = false;
    // Captured on the first search of the tick.
    let mut phantom: Option<PhantomWorld> = None;

    for (entity, number) in vehicles_by_number(world) {
        let input = {
            let Ok(vehicle) = world.get::<&Vehicle>(entity) else {
                continue;
            };
            let Ok(brain) = world.get::<&AiBrain>(entity) else {
                continue;
            };
            VehicleContext {
                state: brain.state,
                is_player: vehicle.is_player,
                is_dead: !is_alive(&vehicle),
                in_control: vehicle.in_control,
                turns_enabled,
                longitude: vehicle.longitude,
                turret_angle: vehicle.turret_angle,
                power: vehicle.power,
                desired: brain.desired,
                gun_ready: ctx.now_secs - vehicle.last_fired_secs >= GUN_COOLDOWN_SECS as f64,
                projectiles_in_flight: in_flight,
                post_fire_timer: brain.post_fire_timer,
                dt: ctx.params.dt,
            }
        };
        let update = evaluate(&input);

        if update.state_changed {
            log::debug!(
                "Vehicle {}: {:?} -> {:?}",
                number,
                input.state,
                update.new_state
            );
        }
        if let Ok(mut brain) = world.get::<&mut AiBrain>(entity) {
            brain.state = update.new_state;
            brain.post_fire_timer = update.post_fire_timer;
        }
        if let Ok(mut vehicle) = world.get::<&mut Vehicle>(entity) {
            if update.strafe.is_some() {
                vehicle.strafe = update.strafe;
            }
            if let Some(speed) = update.rot_speed {
                vehicle.rot_speed = speed;
            }
            if let Some(speed) = update.power_speed {
                vehicle.power_speed = speed;
            }
        }

        if update.begin_search {
            let phantom = phantom.get_or_insert_with(|| PhantomWorld::capture(world, &ctx.params));
            search(world, phantom, entity, ctx, rng);
        }

        if update.fire {
            let kind = world
                .get::<&Inventory>(entity)
                .map(|inventory| random_available_kind(&inventory, rng))
                .unwrap_or(ProjectileKind::Standard);
            if fire(world, entity, kind, ctx.now_secs, events).is_some() {
                in_flight = true;
                log::debug!("Vehicle {} fired {:?}", number, kind);
            }
        }

        if update.end_turn && input.in_control {
            end_turn = true;
        }
    }

    end_turn
}

/// Search for a better aim from the vehicle's current longitude and store
/// it as the controller's target.
fn search(
    world: &mut World,
    phantom: &PhantomWorld,
    entity: Entity,
    ctx: &AiContext,
    rng: &mut ChaCha8Rng,
) {
    let Ok(home) = world.get::<&HomePlanet>(entity).map(|h| h.0) else {
        return;
    };
    let Some(surface) = phantom.surface(home) else {
        return;
    };
    let (initial, accuracy, fuel) = {
        let (Ok(vehicle), Ok(brain)) = (world.get::<&Vehicle>(entity), world.get::<&AiBrain>(entity))
        else {
            return;
        };
        (
            AimParams::new(brain.desired.angle, brain.desired.power, vehicle.longitude),
            brain.accuracy,
            vehicle.fuel,
        )
    };

    let targets = opponent_positions(world, entity);
    let mut evaluator = PhantomEvaluator::new(phantom, surface, ProjectileKind::Standard, targets);
    let outcome = run_search(
        ctx.strategy,
        ctx.turn_mode,
        accuracy,
        ctx.time_box,
        &mut evaluator,
        initial,
        rng,
    );

    let best = AimParams::new(
        outcome.best.angle.rem_euclid(360.0),
        outcome.best.power.clamp(0.0, VEHICLE_BASE_POWER + fuel),
        outcome.best.longitude.rem_euclid(360.0),
    );
    if let Ok(mut brain) = world.get::<&mut AiBrain>(entity) {
        brain.desired = best;
        brain.best_score = Some(outcome.best_score);
    }
}
