//! Per-kind projectile behaviour.
//!
//! Consolidates the damage, blast, lifetime and special behaviour of every
//! projectile kind in one table.

use gravwar_core::constants::*;
use gravwar_core::enums::{ProjectileKind, SoundCue};

/// What a terrain hit does to the planet surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainEffect {
    Crater,
    Deposit,
    /// Crater only when the contact ends the projectile's bounces.
    CraterOnTerminalBounce,
    None,
}

/// Extra behaviour on a terrain hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactBehavior {
    None,
    /// Spawn a reflected copy while fewer than `max_bounces` contacts happened.
    Bounce { max_bounces: u32 },
    /// Move the owner to the impact point.
    TeleportOwner,
    /// Open a wormhole pair on opposite sides of the planet.
    SpawnWormholes,
}

/// What happens when the lifetime runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpiryBehavior {
    Detonate,
    /// Detonate and release `children` copies fanned `spread_deg` apart.
    Split {
        children: u32,
        spread_deg: f32,
        speed_factor: f32,
    },
}

/// Special the owner can set off while the projectile is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    None,
    /// Release two Splitter children at ±`spread_deg`.
    Split { spread_deg: f32 },
    /// Explode in place without dying.
    Explode,
}

/// Static data for one projectile kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    pub damage: f32,
    pub explosion_radius: f32,
    pub collider_radius: f32,
    pub ttl_secs: f32,
    pub terrain: TerrainEffect,
    pub impact: ImpactBehavior,
    pub expiry: ExpiryBehavior,
    pub trigger: Trigger,
    /// Trigger uses allowed per projectile.
    pub max_triggers: u32,
    /// Acceleration added along the velocity, per unit of speed.
    pub thrust_gain: f32,
    pub sound: SoundCue,
}

const BASE: ProjectileProfile = ProjectileProfile {
    damage: 10.0,
    explosion_radius: 50.0,
    collider_radius: 4.0,
    ttl_secs: DEFAULT_PROJECTILE_TTL_SECS,
    terrain: TerrainEffect::Crater,
    impact: ImpactBehavior::None,
    expiry: ExpiryBehavior::Detonate,
    trigger: Trigger::None,
    max_triggers: 0,
    thrust_gain: 0.0,
    sound: SoundCue::Explosion,
};

/// Get the profile for a projectile kind.
pub fn get_profile(kind: ProjectileKind) -> ProjectileProfile {
    match kind {
        ProjectileKind::Standard => BASE,
        ProjectileKind::Dirt => ProjectileProfile {
            terrain: TerrainEffect::Deposit,
            ..BASE
        },
        ProjectileKind::Splitter => ProjectileProfile {
            damage: 7.5,
            ttl_secs: 1.25,
            expiry: ExpiryBehavior::Split {
                children: 3,
                spread_deg: 20.0,
                speed_factor: 1.25,
            },
            ..BASE
        },
        ProjectileKind::BigBlast => ProjectileProfile {
            damage: 12.5,
            explosion_radius: 160.0,
            collider_radius: 6.0,
            ..BASE
        },
        ProjectileKind::Bouncer => ProjectileProfile {
            damage: 7.5,
            terrain: TerrainEffect::CraterOnTerminalBounce,
            impact: ImpactBehavior::Bounce { max_bounces: 2 },
            ..BASE
        },
        ProjectileKind::Timed => ProjectileProfile {
            explosion_radius: 100.0,
            ttl_secs: 6.0,
            ..BASE
        },
        ProjectileKind::Teleport => ProjectileProfile {
            damage: 0.0,
            explosion_radius: 0.0,
            terrain: TerrainEffect::None,
            impact: ImpactBehavior::TeleportOwner,
            ..BASE
        },
        ProjectileKind::MultiShot => ProjectileProfile {
            damage: 7.5,
            trigger: Trigger::Split { spread_deg: 45.0 },
            max_triggers: 3,
            ..BASE
        },
        ProjectileKind::Accelerating => ProjectileProfile {
            damage: 28.0,
            explosion_radius: 25.0,
            collider_radius: 3.0,
            thrust_gain: 1.0,
            ..BASE
        },
        ProjectileKind::Airburst => ProjectileProfile {
            damage: 7.5,
            explosion_radius: 100.0,
            trigger: Trigger::Explode,
            max_triggers: 3,
            ..BASE
        },
        ProjectileKind::Fatman => ProjectileProfile {
            damage: 35.0,
            explosion_radius: 225.0,
            collider_radius: 8.0,
            sound: SoundCue::BigExplosion,
            ..BASE
        },
        ProjectileKind::Wormhole => ProjectileProfile {
            damage: 2.5,
            explosion_radius: 5.0,
            impact: ImpactBehavior::SpawnWormholes,
            ..BASE
        },
        ProjectileKind::Mine => ProjectileProfile {
            damage: 12.5,
            explosion_radius: 120.0,
            collider_radius: 6.0,
            ..BASE
        },
    }
}
