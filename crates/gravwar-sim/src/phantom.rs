//! Phantom shots: projectiles flown to completion outside the world.
//!
//! A `PhantomWorld` captures the static parts of the match (planet
//! surfaces, massive bodies, wormholes) once, then flies hypothetical
//! projectiles through them at full tick rate. Phantoms never enter the
//! ECS world and never emit events.

use glam::Vec2;
use hecs::{Entity, World};

use gravwar_ai::scoring::{sanitize, score_landing};
use gravwar_ai::ShotEvaluator;
use gravwar_core::components::{Collider, Dead, Kinematics, Wormhole};
use gravwar_core::constants::*;
use gravwar_core::enums::ProjectileKind;
use gravwar_core::types::{unit_from_degrees, AimParams, Circle};
use gravwar_terrain::PlanetSurface;

use crate::arsenal::get_profile;
use crate::physics::{at_world_edge, collect_massive, gravity_at, MassiveBody, PhysicsParams};
use crate::relations::WormholeLink;

/// Where a phantom shot ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhantomLanding {
    pub position: Vec2,
    pub at_edge: bool,
    /// Steps flown.
    pub steps: u32,
}

/// Capture-side view of one wormhole.
#[derive(Debug, Clone, Copy)]
struct PhantomWormhole {
    mouth: Circle,
    exit: Vec2,
}

/// One projectile in flight.
struct Flight {
    position: Vec2,
    velocity: Vec2,
    age: f32,
    radius: f32,
    thrust_gain: f32,
}

enum Step {
    Flying,
    Landed { at_edge: bool },
}

/// Frozen copy of everything a projectile can interact with.
#[derive(Debug, Clone)]
pub struct PhantomWorld {
    planets: Vec<(Entity, PlanetSurface)>,
    bodies: Vec<MassiveBody>,
    wormholes: Vec<PhantomWormhole>,
    params: PhysicsParams,
}

impl PhantomWorld {
    /// Snapshot the live world.
    pub fn capture(world: &World, params: &PhysicsParams) -> Self {
        let planets = world
            .query::<(&PlanetSurface, Option<&Dead>)>()
            .iter()
            .filter(|(_, (_, dead))| dead.is_none())
            .map(|(entity, (surface, _))| (entity, surface.clone()))
            .collect();

        let wormholes = world
            .query::<(&Wormhole, &Kinematics, &Collider, &WormholeLink)>()
            .iter()
            .filter_map(|(_, (_, kin, collider, link))| {
                let exit = world.get::<&Kinematics>(link.0).ok()?.position;
                Some(PhantomWormhole {
                    mouth: Circle::new(kin.position, collider.radius),
                    exit,
                })
            })
            .collect();

        Self {
            planets,
            bodies: collect_massive(world),
            wormholes,
            params: *params,
        }
    }

    pub fn surface(&self, planet: Entity) -> Option<&PlanetSurface> {
        self.planets
            .iter()
            .find(|(entity, _)| *entity == planet)
            .map(|(_, surface)| surface)
    }

    /// Vehicle resting position at `longitude` on `surface`.
    pub fn firing_position(surface: &PlanetSurface, longitude: f32) -> Vec2 {
        surface.center
            + (surface.altitude_at_degrees(longitude) + VEHICLE_HALF_HEIGHT)
                * unit_from_degrees(longitude)
    }

    fn launch(&self, kind: ProjectileKind, muzzle: Vec2, velocity: Vec2) -> Flight {
        let profile = get_profile(kind);
        Flight {
            position: muzzle,
            velocity,
            age: 0.0,
            radius: profile.collider_radius,
            thrust_gain: profile.thrust_gain,
        }
    }

    fn step(&self, flight: &mut Flight) -> Step {
        let dt = self.params.dt;
        let acceleration = gravity_at(flight.position, &self.bodies, None, &self.params)
            + flight.thrust_gain * flight.velocity;
        flight.velocity += acceleration * dt;
        flight.position += flight.velocity * dt;
        flight.age += dt;

        let body = Circle::new(flight.position, flight.radius);
        if self.planets.iter().any(|(_, surface)| surface.intersects(&body)) {
            return Step::Landed { at_edge: false };
        }
        if at_world_edge(&body, self.params.world) {
            return Step::Landed { at_edge: true };
        }
        if let Some(hole) = self.wormholes.iter().find(|w| w.mouth.intersects(&body)) {
            flight.position = hole.exit
                + (hole.mouth.radius + 1.0) * flight.velocity.normalize_or_zero();
        }
        if flight.age >= PHANTOM_TTL_SECS {
            return Step::Landed { at_edge: false };
        }
        Step::Flying
    }

    /// Fly a projectile until it hits something, leaves the world or expires.
    pub fn simulate(&self, kind: ProjectileKind, muzzle: Vec2, velocity: Vec2) -> PhantomLanding {
        let mut flight = self.launch(kind, muzzle, velocity);
        let mut steps = 0;
        loop {
            steps += 1;
            if let Step::Landed { at_edge } = self.step(&mut flight) {
                return PhantomLanding {
                    position: flight.position,
                    at_edge,
                    steps,
                };
            }
        }
    }

    /// Preview points along a shot: every `PREVIEW_STRIDE`-th step of the
    /// first `PREVIEW_STEPS`, stopping where the shot would end.
    pub fn predict_trajectory(
        &self,
        kind: ProjectileKind,
        muzzle: Vec2,
        velocity: Vec2,
    ) -> Vec<Vec2> {
        let mut flight = self.launch(kind, muzzle, velocity);
        let mut points = Vec::with_capacity(PREVIEW_STEPS / PREVIEW_STRIDE);
        for i in 0..PREVIEW_STEPS {
            if let Step::Landed { .. } = self.step(&mut flight) {
                break;
            }
            if i % PREVIEW_STRIDE == 0 {
                points.push(flight.position);
            }
        }
        points
    }
}

/// Scores candidate aims for one vehicle by averaging phantom shots.
pub struct PhantomEvaluator<'a> {
    world: &'a PhantomWorld,
    home: &'a PlanetSurface,
    kind: ProjectileKind,
    targets: Vec<Vec2>,
}

impl<'a> PhantomEvaluator<'a> {
    pub fn new(
        world: &'a PhantomWorld,
        home: &'a PlanetSurface,
        kind: ProjectileKind,
        targets: Vec<Vec2>,
    ) -> Self {
        Self {
            world,
            home,
            kind,
            targets,
        }
    }
}

impl ShotEvaluator for PhantomEvaluator<'_> {
    fn evaluate(&mut self, aim: &AimParams) -> f32 {
        let base = PhantomWorld::firing_position(self.home, aim.longitude);
        let view = aim.view();
        let muzzle = base + MUZZLE_OFFSET * view;

        let mut power = aim.power;
        let mut total = 0.0;
        for i in 0..PHANTOM_SAMPLES {
            if i > 0 {
                power /= PHANTOM_POWER_FALLOFF;
            }
            let landing = self.world.simulate(self.kind, muzzle, power * view);
            total += score_landing(
                landing.position,
                base,
                self.targets.iter().copied(),
                landing.at_edge,
            );
        }
        sanitize(total / PHANTOM_SAMPLES as f32)
    }
}
