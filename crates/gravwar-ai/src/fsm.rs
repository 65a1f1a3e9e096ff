//! Vehicle aiming finite state machine.
//!
//! Pure functions that compute state transitions and control requests for
//! one vehicle from its current situation. No ECS dependency; the engine
//! applies the returned requests and runs the aim search when asked to.

use gravwar_core::constants::*;
use gravwar_core::enums::{StrafeDirection, VehicleState};
use gravwar_core::types::{shortest_delta_degrees, AimParams};

/// Input to the FSM for a single vehicle.
pub struct VehicleContext {
    pub state: VehicleState,
    pub is_player: bool,
    pub is_dead: bool,
    pub in_control: bool,
    pub turns_enabled: bool,
    pub longitude: f32,
    pub turret_angle: f32,
    pub power: f32,
    pub desired: AimParams,
    /// Enough time has passed since the last shot.
    pub gun_ready: bool,
    /// Any real projectile is still live.
    pub projectiles_in_flight: bool,
    /// Seconds since the last projectile settled, once counting.
    pub post_fire_timer: Option<f32>,
    pub dt: f32,
}

/// Output from the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUpdate {
    pub new_state: VehicleState,
    /// Strafe request for this tick.
    pub strafe: Option<StrafeDirection>,
    /// New turret rotation speed, when the FSM sets one.
    pub rot_speed: Option<f32>,
    /// New power speed, when the FSM sets one.
    pub power_speed: Option<f32>,
    /// Run the aim search this tick.
    pub begin_search: bool,
    /// Fire a random available kind this tick.
    pub fire: bool,
    /// Hand the turn to the next vehicle.
    pub end_turn: bool,
    pub post_fire_timer: Option<f32>,
    pub state_changed: bool,
}

impl VehicleUpdate {
    fn unchanged(ctx: &VehicleContext) -> Self {
        Self {
            new_state: ctx.state,
            strafe: None,
            rot_speed: None,
            power_speed: None,
            begin_search: false,
            fire: false,
            end_turn: false,
            post_fire_timer: ctx.post_fire_timer,
            state_changed: false,
        }
    }

    fn transition(ctx: &VehicleContext, state: VehicleState) -> Self {
        Self {
            new_state: state,
            state_changed: state != ctx.state,
            ..Self::unchanged(ctx)
        }
    }
}

/// State a vehicle returns to after its shot.
fn idle_state(ctx: &VehicleContext) -> VehicleState {
    if ctx.is_player {
        VehicleState::Manual
    } else {
        VehicleState::Wait
    }
}

/// Evaluate the FSM for one vehicle.
pub fn evaluate(ctx: &VehicleContext) -> VehicleUpdate {
    if ctx.is_dead && ctx.state != VehicleState::Dead {
        return VehicleUpdate::transition(ctx, VehicleState::Dead);
    }

    match ctx.state {
        VehicleState::Manual => VehicleUpdate::unchanged(ctx),
        VehicleState::Wait => evaluate_wait(ctx),
        VehicleState::Think => VehicleUpdate {
            begin_search: true,
            ..VehicleUpdate::transition(ctx, VehicleState::Move)
        },
        VehicleState::Move => evaluate_move(ctx),
        VehicleState::Aim => evaluate_aim(ctx),
        VehicleState::Power => evaluate_power(ctx),
        VehicleState::Fire => evaluate_fire(ctx),
        VehicleState::PostFire => evaluate_post_fire(ctx),
        VehicleState::Dead => VehicleUpdate {
            end_turn: ctx.turns_enabled && ctx.in_control,
            ..VehicleUpdate::unchanged(ctx)
        },
    }
}

fn evaluate_wait(ctx: &VehicleContext) -> VehicleUpdate {
    if ctx.is_player {
        return VehicleUpdate::transition(ctx, VehicleState::Manual);
    }
    if ctx.in_control || !ctx.turns_enabled {
        return VehicleUpdate::transition(ctx, VehicleState::Think);
    }
    VehicleUpdate::unchanged(ctx)
}

fn evaluate_move(ctx: &VehicleContext) -> VehicleUpdate {
    let delta = shortest_delta_degrees(ctx.longitude, ctx.desired.longitude);
    if delta.abs() > AI_LONGITUDE_TOLERANCE {
        // Left increases longitude.
        let direction = if delta > 0.0 {
            StrafeDirection::Left
        } else {
            StrafeDirection::Right
        };
        return VehicleUpdate {
            strafe: Some(direction),
            ..VehicleUpdate::unchanged(ctx)
        };
    }
    VehicleUpdate::transition(ctx, VehicleState::Aim)
}

fn evaluate_aim(ctx: &VehicleContext) -> VehicleUpdate {
    let delta = shortest_delta_degrees(ctx.turret_angle, ctx.desired.angle);
    if delta.abs() > AI_ANGLE_TOLERANCE {
        return VehicleUpdate {
            rot_speed: Some(delta.signum()),
            ..VehicleUpdate::unchanged(ctx)
        };
    }
    VehicleUpdate {
        rot_speed: Some(0.0),
        ..VehicleUpdate::transition(ctx, VehicleState::Power)
    }
}

fn evaluate_power(ctx: &VehicleContext) -> VehicleUpdate {
    let delta = ctx.desired.power - ctx.power;
    if delta > AI_POWER_TOLERANCE {
        return VehicleUpdate {
            power_speed: Some(AI_POWER_SPEED),
            ..VehicleUpdate::unchanged(ctx)
        };
    }
    if delta < -AI_POWER_TOLERANCE {
        return VehicleUpdate {
            power_speed: Some(-AI_POWER_SPEED),
            ..VehicleUpdate::unchanged(ctx)
        };
    }
    VehicleUpdate {
        power_speed: Some(0.0),
        ..VehicleUpdate::transition(ctx, VehicleState::Fire)
    }
}

fn evaluate_fire(ctx: &VehicleContext) -> VehicleUpdate {
    let blocked = ctx.turns_enabled && ctx.projectiles_in_flight;
    if ctx.gun_ready && !blocked {
        return VehicleUpdate {
            fire: true,
            ..VehicleUpdate::transition(ctx, VehicleState::PostFire)
        };
    }
    VehicleUpdate::unchanged(ctx)
}

fn evaluate_post_fire(ctx: &VehicleContext) -> VehicleUpdate {
    if !ctx.turns_enabled {
        return VehicleUpdate {
            post_fire_timer: None,
            ..VehicleUpdate::transition(ctx, idle_state(ctx))
        };
    }
    if ctx.projectiles_in_flight {
        return VehicleUpdate::unchanged(ctx);
    }

    let elapsed = match ctx.post_fire_timer {
        None => {
            // The last projectile just settled; start the pause.
            return VehicleUpdate {
                post_fire_timer: Some(0.0),
                ..VehicleUpdate::unchanged(ctx)
            };
        }
        Some(t) => t + ctx.dt,
    };

    if elapsed >= POST_FIRE_PAUSE_SECS + POST_FIRE_TRANSITION_SECS {
        return VehicleUpdate {
            end_turn: true,
            post_fire_timer: None,
            ..VehicleUpdate::transition(ctx, idle_state(ctx))
        };
    }
    VehicleUpdate {
        post_fire_timer: Some(elapsed),
        ..VehicleUpdate::unchanged(ctx)
    }
}
