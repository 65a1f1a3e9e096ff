//! Simulation engine: owns the world and advances it one tick at a time.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use gravwar_core::commands::PlayerCommand;
use gravwar_core::components::{AiBrain, Kinematics, Vehicle};
use gravwar_core::constants::*;
use gravwar_core::enums::{GamePhase, SearchStrategy, StrafeDirection, TurnMode, VehicleState};
use gravwar_core::state::{GameStateSnapshot, TurnView};
use gravwar_core::types::{barrel_roll, view_vector, Inventory, SimTime};

use crate::events::EventLog;
use crate::phantom::PhantomWorld;
use crate::physics::{collect_massive, specific_energy, PhysicsParams};
use crate::roster::{living_vehicles, projectiles_in_flight, vehicle_alive};
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::vehicle_ai::AiContext;
use crate::turn::{TurnOutcome, TurnTracker};
use crate::weapons;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub turn_mode: TurnMode,
    /// Difficulty knob scaling every AI search budget.
    pub accuracy_multiplier: f32,
    pub search_strategy: SearchStrategy,
    /// Wall-clock cap on one AI search. `None` makes searches depend only
    /// on the seed.
    pub search_time_box_ms: Option<u64>,
    pub gravitational_constant: f32,
    pub softening: f32,
    /// Ticks per simulated second.
    pub tick_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            turn_mode: TurnMode::TurnBased,
            accuracy_multiplier: DEFAULT_ACCURACY_MULTIPLIER,
            search_strategy: SearchStrategy::Gradient,
            search_time_box_ms: Some(SEARCH_TIME_BOX_MS),
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            softening: GRAVITY_SOFTENING,
            tick_rate: TICK_RATE,
        }
    }
}

impl SimConfig {
    pub fn search_time_box(&self) -> Option<Duration> {
        self.search_time_box_ms.map(Duration::from_millis)
    }

    fn physics(&self) -> PhysicsParams {
        PhysicsParams {
            gravitational_constant: self.gravitational_constant,
            softening: self.softening,
            dt: 1.0 / self.tick_rate.max(1) as f32,
            ..PhysicsParams::default()
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    physics: PhysicsParams,
    rng: ChaCha8Rng,
    turns: TurnTracker,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: EventLog,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            physics: config.physics(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            turns: TurnTracker::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: EventLog::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(self.physics.dt);
        }

        let aim_preview = self.aim_preview();
        let (audio_events, fx_events) = self.events.take();
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                turn_mode: self.config.turn_mode,
                bounds: self.physics.world,
                turn: self.turns.view(),
                aim_preview,
                audio_events,
                fx_events,
            },
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn turn(&self) -> TurnView {
        self.turns.view()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Kinetic plus potential energy per unit mass of one entity, counting
    /// every other massive body.
    pub fn specific_energy(&self, entity: Entity) -> Option<f32> {
        let kin = *self.world.get::<&Kinematics>(entity).ok()?;
        let bodies: Vec<_> = collect_massive(&self.world)
            .into_iter()
            .filter(|body| body.entity != Some(entity))
            .collect();
        Some(specific_energy(
            kin.position,
            kin.velocity,
            &bodies,
            &self.physics,
        ))
    }

    /// Add a free-flying body that bounces off terrain.
    pub fn spawn_drifter(&mut self, position: Vec2, velocity: Vec2, radius: f32) -> Entity {
        world_setup::spawn_drifter(&mut self.world, position, velocity, radius)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch { level } => {
                if matches!(self.phase, GamePhase::Setup | GamePhase::GameOver) {
                    self.start_match(level);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::StrafeLeft => {
                self.with_player(|vehicle| vehicle.strafe = Some(StrafeDirection::Left));
            }
            PlayerCommand::StrafeRight => {
                self.with_player(|vehicle| vehicle.strafe = Some(StrafeDirection::Right));
            }
            PlayerCommand::StrafeBack => {
                self.with_player(|vehicle| vehicle.strafe = None);
            }
            PlayerCommand::SetRotSpeed { speed } => {
                self.with_player(|vehicle| vehicle.rot_speed = speed);
            }
            PlayerCommand::SetPowerSpeed { speed } => {
                self.with_player(|vehicle| vehicle.power_speed = speed);
            }
            PlayerCommand::SetPower { power } => {
                self.with_player(|vehicle| {
                    vehicle.power =
                        power.clamp(PLAYER_MIN_POWER, VEHICLE_BASE_POWER + vehicle.fuel);
                });
            }
            PlayerCommand::FireGun { kind } => {
                if let Some(player) = self.commandable_player() {
                    self.player_fire(player, kind);
                }
            }
            PlayerCommand::NextBulletType => {
                if let Some(player) = self.commandable_player() {
                    if let Ok(mut inventory) = self.world.get::<&mut Inventory>(player) {
                        inventory.advance();
                    }
                }
            }
            PlayerCommand::TriggerSpecial => {
                if let Some(player) = self.commandable_player() {
                    weapons::trigger_specials(&mut self.world, player, &mut self.events);
                }
            }
        }
    }

    fn start_match(&mut self, level: Option<gravwar_core::level::LevelDescription>) {
        let level = world_setup::resolve_level(level);

        self.world.clear();
        self.time = SimTime::default();
        self.physics = PhysicsParams {
            world: level.world,
            ..self.config.physics()
        };
        let loaded = world_setup::load_level(
            &mut self.world,
            &level,
            self.physics.gravitational_constant,
            self.config.accuracy_multiplier,
            &mut self.rng,
        );
        self.turns = TurnTracker::start(&mut self.world, self.config.turn_mode);
        self.phase = GamePhase::Active;

        log::info!(
            "Match started on '{}': {} planets, {} vehicles, {:?}",
            level.name,
            loaded.planets.len(),
            loaded.vehicles.len(),
            self.config.turn_mode
        );
    }

    /// The living player vehicle input acts on: the turn holder in turn
    /// mode, the first player in real-time mode.
    fn controlled_player(&self) -> Option<Entity> {
        let is_player = |entity: Entity| {
            self.world
                .get::<&Vehicle>(entity)
                .map(|vehicle| vehicle.is_player)
                .unwrap_or(false)
        };
        match self.config.turn_mode {
            TurnMode::TurnBased => self
                .turns
                .current
                .filter(|&entity| vehicle_alive(&self.world, entity) && is_player(entity)),
            TurnMode::Realtime => living_vehicles(&self.world)
                .into_iter()
                .map(|(entity, _)| entity)
                .find(|&entity| is_player(entity)),
        }
    }

    /// The controlled player, unless it is waiting for its shot to settle.
    fn commandable_player(&self) -> Option<Entity> {
        if self.phase != GamePhase::Active {
            return None;
        }
        let player = self.controlled_player()?;
        let busy = self
            .world
            .get::<&AiBrain>(player)
            .map(|brain| brain.state == VehicleState::PostFire)
            .unwrap_or(false);
        (!busy).then_some(player)
    }

    fn with_player(&mut self, apply: impl FnOnce(&mut Vehicle)) {
        let Some(player) = self.commandable_player() else {
            return;
        };
        if let Ok(mut vehicle) = self.world.get::<&mut Vehicle>(player) {
            apply(&mut vehicle);
        }
    }

    fn player_fire(&mut self, player: Entity, kind: Option<gravwar_core::enums::ProjectileKind>) {
        let now = self.time.elapsed_secs;
        let selected = {
            let Ok(mut inventory) = self.world.get::<&mut Inventory>(player) else {
                return;
            };
            match kind {
                Some(kind) => inventory.select(kind),
                None => inventory.selected,
            }
        };

        let allowed = match self.config.turn_mode {
            TurnMode::Realtime => self
                .world
                .get::<&Vehicle>(player)
                .map(|vehicle| now - vehicle.last_fired_secs >= PLAYER_FIRE_COOLDOWN_SECS as f64)
                .unwrap_or(false),
            TurnMode::TurnBased => !projectiles_in_flight(&self.world),
        };
        if !allowed {
            return;
        }

        if weapons::fire(&mut self.world, player, selected, now, &mut self.events).is_none() {
            return;
        }
        if self.config.turn_mode == TurnMode::TurnBased {
            if let Ok(mut brain) = self.world.get::<&mut AiBrain>(player) {
                brain.state = VehicleState::PostFire;
                brain.post_fire_timer = None;
            }
        }
    }

    /// Predicted path of the controlled player's selected kind.
    fn aim_preview(&self) -> Vec<Vec2> {
        if self.phase == GamePhase::Setup {
            return Vec::new();
        }
        let Some(player) = self.controlled_player() else {
            return Vec::new();
        };
        let (muzzle, velocity, kind) = {
            let (Ok(vehicle), Ok(kin), Ok(inventory)) = (
                self.world.get::<&Vehicle>(player),
                self.world.get::<&Kinematics>(player),
                self.world.get::<&Inventory>(player),
            ) else {
                return Vec::new();
            };
            let view = view_vector(barrel_roll(vehicle.turret_angle, vehicle.longitude));
            (
                kin.position + MUZZLE_OFFSET * view,
                vehicle.power * view,
                inventory.selected,
            )
        };
        PhantomWorld::capture(&self.world, &self.physics).predict_trajectory(kind, muzzle, velocity)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.physics.dt;

        // 1. Projectile ageing and expiry
        systems::projectile::run(&mut self.world, &self.physics, &mut self.events);
        // 2. World edge
        systems::world_edge::run(&mut self.world, &self.physics, &mut self.events);
        // 3. Gravity
        systems::gravity::run(&mut self.world, &self.physics);
        // 4. Integration
        systems::integrate::run(&mut self.world, dt);
        // 5. Vehicle controllers (state machine, aim search, AI fire)
        let end_turn = systems::vehicle_ai::run(
            &mut self.world,
            &AiContext {
                turn_mode: self.config.turn_mode,
                strategy: self.config.search_strategy,
                time_box: self.config.search_time_box(),
                now_secs: self.time.elapsed_secs,
                params: self.physics,
            },
            &mut self.rng,
            &mut self.events,
        );
        // 6. Vehicle motion
        systems::vehicle::run(&mut self.world, self.config.turn_mode, dt);
        // 7. Collisions
        systems::collision::run(&mut self.world, &self.physics, &mut self.events);
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 9. Turn bookkeeping
        self.update_turns(end_turn);
    }

    fn update_turns(&mut self, end_turn: bool) {
        match self.config.turn_mode {
            TurnMode::TurnBased => {
                if end_turn || self.turns.holder_missing(&self.world) {
                    let outcome = self.turns.next_turn(&mut self.world, &mut self.rng);
                    if outcome == TurnOutcome::GameOver {
                        self.phase = GamePhase::GameOver;
                    }
                }
            }
            TurnMode::Realtime => {
                if living_vehicles(&self.world).len() <= 1 {
                    self.turns.finish(&self.world);
                    self.phase = GamePhase::GameOver;
                }
            }
        }
    }
}
