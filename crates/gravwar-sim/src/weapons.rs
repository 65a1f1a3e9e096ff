//! Firing and triggered specials.

use hecs::{Entity, World};
use rand::Rng;

use gravwar_core::components::{Dead, Kinematics, Projectile, Vehicle};
use gravwar_core::constants::*;
use gravwar_core::enums::ProjectileKind;
use gravwar_core::events::{AudioEvent, FxEvent};
use gravwar_core::types::{barrel_roll, rotate_degrees, view_vector, Inventory};

use crate::arsenal::{get_profile, Trigger};
use crate::detonation::explode;
use crate::events::EventLog;
use crate::relations::Owner;
use crate::roster::is_alive;
use crate::world_setup::{spawn_child_projectile, spawn_projectile};

/// Fire one round of `kind` from a vehicle's muzzle.
///
/// The round leaves `MUZZLE_OFFSET` out along the barrel at `power` along
/// the barrel. Dead vehicles and exhausted kinds do not fire.
pub fn fire(
    world: &mut World,
    shooter: Entity,
    kind: ProjectileKind,
    now_secs: f64,
    events: &mut EventLog,
) -> Option<Entity> {
    let (muzzle, velocity) = {
        let vehicle = world.get::<&Vehicle>(shooter).ok()?;
        if !is_alive(&vehicle) {
            return None;
        }
        let inventory = world.get::<&Inventory>(shooter).ok()?;
        if !inventory.has(kind) {
            return None;
        }
        let position = world.get::<&Kinematics>(shooter).ok()?.position;
        let view = view_vector(barrel_roll(vehicle.turret_angle, vehicle.longitude));
        (position + MUZZLE_OFFSET * view, vehicle.power * view)
    };

    let projectile = spawn_projectile(world, kind, muzzle, velocity, Some(shooter));

    if let Ok(mut inventory) = world.get::<&mut Inventory>(shooter) {
        inventory.consume(kind);
    }
    if let Ok(mut vehicle) = world.get::<&mut Vehicle>(shooter) {
        vehicle.last_fired_secs = now_secs;
    }

    events.audio(AudioEvent::Shoot { position: muzzle });
    events.fx(FxEvent::Spark { position: muzzle });
    Some(projectile)
}

/// A random kind the vehicle still has rounds of.
pub fn random_available_kind<R: Rng + ?Sized>(inventory: &Inventory, rng: &mut R) -> ProjectileKind {
    let available: Vec<ProjectileKind> = ProjectileKind::ALL
        .iter()
        .copied()
        .filter(|kind| inventory.has(*kind))
        .collect();
    if available.is_empty() {
        return ProjectileKind::Standard;
    }
    available[rng.gen_range(0..available.len())]
}

/// Set off the trigger of every live projectile `owner` fired that still
/// has uses left. Returns how many fired.
pub fn trigger_specials(world: &mut World, owner: Entity, events: &mut EventLog) -> usize {
    let armed: Vec<(Entity, Projectile, Kinematics)> = world
        .query::<(&Projectile, &Kinematics, &Owner, Option<&Dead>)>()
        .iter()
        .filter(|(_, (projectile, _, own, dead))| {
            let profile = get_profile(projectile.kind);
            dead.is_none()
                && own.0 == owner
                && profile.trigger != Trigger::None
                && projectile.triggers_used < profile.max_triggers
        })
        .map(|(entity, (projectile, kin, _, _))| (entity, *projectile, *kin))
        .collect();

    for (entity, projectile, kin) in &armed {
        let profile = get_profile(projectile.kind);
        match profile.trigger {
            Trigger::Split { spread_deg } => {
                for offset in [spread_deg, -spread_deg] {
                    spawn_child_projectile(
                        world,
                        ProjectileKind::Splitter,
                        kin.position,
                        rotate_degrees(kin.velocity, offset),
                        Some(owner),
                    );
                }
                events.audio(AudioEvent::Shoot {
                    position: kin.position,
                });
            }
            Trigger::Explode => explode(
                world,
                kin.position,
                projectile.explosion_radius,
                projectile.damage,
                profile.sound,
                events,
            ),
            Trigger::None => {}
        }
        if let Ok(mut live) = world.get::<&mut Projectile>(*entity) {
            live.triggers_used += 1;
        }
    }
    armed.len()
}
