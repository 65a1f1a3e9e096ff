//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Gravity ---

/// Gravitational constant in game units. Tuned for feel, not SI.
pub const GRAVITATIONAL_CONSTANT: f32 = 5_000_000.0;

/// Added to |Δ|² in the gravity denominator.
pub const GRAVITY_SOFTENING: f32 = 1.0;

// --- World ---

/// Default world width when a level does not specify one.
pub const DEFAULT_WORLD_WIDTH: f32 = 15_000.0;

/// Default world height when a level does not specify one.
pub const DEFAULT_WORLD_HEIGHT: f32 = 15_000.0;

// --- Terrain ---

/// Number of altitude samples around each planet.
pub const TERRAIN_SAMPLES: usize = 720;

/// Core radius as a fraction of the sea-level radius.
pub const CORE_RADIUS_FRACTION: f32 = 0.3;

/// Samples never drop below core radius + this margin.
pub const CORE_MARGIN: f32 = 5.0;

/// Buckets checked on each side of the bucket under a query point.
pub const TERRAIN_TRIANGLE_WINDOW: isize = 2;

/// Iterations of the planetary generation method.
pub const PLANETARY_ITERATIONS: u32 = 2000;

/// Height added or removed per planetary iteration.
pub const PLANETARY_HEIGHT_STEP: f32 = 2.0;

/// Peak-to-trough span of generated terrain as a fraction of sea level.
pub const TALLEST_PEAK_FRACTION: f32 = 0.12;

// --- Vehicles ---

/// Starting and maximum health.
pub const VEHICLE_MAX_HEALTH: f32 = 100.0;

/// Fuel restored at the start of every turn.
pub const VEHICLE_MAX_FUEL: f32 = 500.0;

/// Fuel burnt per second of strafing (turn mode, players only).
pub const VEHICLE_FUEL_BURN_RATE: f32 = 5.0;

/// Shot power ceiling before leftover fuel is added.
pub const VEHICLE_BASE_POWER: f32 = 700.0;

/// Half the vehicle body height; vehicles sit this far above the surface.
pub const VEHICLE_HALF_HEIGHT: f32 = 16.0;

/// Vehicle bounding-circle radius.
pub const VEHICLE_COLLIDER_RADIUS: f32 = 16.0;

/// Projectiles leave the barrel this far from the vehicle center.
pub const MUZZLE_OFFSET: f32 = 16.0;

/// Longitude change per second while strafing (degrees).
pub const STRAFE_DEGREES_PER_SEC: f32 = 40.0;

/// Turret rotation per second at rot speed 1 (degrees).
pub const TURRET_DEGREES_PER_SEC: f32 = 30.0;

/// Distance above the resting altitude that starts the falling animation.
pub const FALL_THRESHOLD: f32 = 10.0;

/// Units descended per tick while falling.
pub const FALL_STEP: f32 = 3.0;

/// Minimum seconds between two shots of the same vehicle.
pub const GUN_COOLDOWN_SECS: f32 = 3.0;

/// Minimum seconds between two player shots in real-time mode.
pub const PLAYER_FIRE_COOLDOWN_SECS: f32 = 1.5;

/// Lowest power a player can dial in.
pub const PLAYER_MIN_POWER: f32 = 1.0;

/// Pause after the last projectile of a turn settles.
pub const POST_FIRE_PAUSE_SECS: f32 = 1.0;

/// Camera transition time before control passes on.
pub const POST_FIRE_TRANSITION_SECS: f32 = 1.5;

// --- AI ---

/// Default difficulty knob scaling every search budget.
pub const DEFAULT_ACCURACY_MULTIPLIER: f32 = 15.0;

/// Default turret angle the search starts from (degrees).
pub const AI_INITIAL_TURRET_ANGLE: f32 = 45.0;

/// Longitude tolerance before the AI stops strafing (degrees).
pub const AI_LONGITUDE_TOLERANCE: f32 = 2.0;

/// Turret tolerance before the AI stops rotating (degrees).
pub const AI_ANGLE_TOLERANCE: f32 = 1.0;

/// Power tolerance before the AI stops adjusting power.
pub const AI_POWER_TOLERANCE: f32 = 50.0;

/// Power change per second while the AI adjusts power.
pub const AI_POWER_SPEED: f32 = 50.0;

/// Self-proximity penalty scale k in 1 - exp(-|Δ|²/k).
pub const SCORE_SELF_PENALTY_K: f32 = 250.0;

/// Score multiplier for shots ending at the world edge.
pub const SCORE_EDGE_MULTIPLIER: f32 = 5.0;

/// Phantom shots averaged per evaluation.
pub const PHANTOM_SAMPLES: u32 = 3;

/// Each extra phantom sample divides power by this factor.
pub const PHANTOM_POWER_FALLOFF: f32 = 1.01;

/// Lifetime of a phantom projectile (seconds).
pub const PHANTOM_TTL_SECS: f32 = 30.0;

/// Randomized search: samples per unit of accuracy.
pub const RANDOM_SEARCH_SAMPLES: u32 = 1000;

/// Randomized search turret range (degrees, before wrapping).
pub const RANDOM_SEARCH_ANGLE_MIN: i32 = -15;
pub const RANDOM_SEARCH_ANGLE_MAX: i32 = 195;

/// Randomized search power range.
pub const RANDOM_SEARCH_POWER_MIN: i32 = 50;
pub const RANDOM_SEARCH_POWER_MAX: i32 = 1000;

/// Random deflection applied to an accepted randomized angle (± degrees).
pub const RANDOM_SEARCH_DEFLECTION: f32 = 2.5;

/// Gradient search iterations per unit of accuracy (turn mode).
pub const GRADIENT_ITERATIONS_TURN: u32 = 100;

/// Gradient search iterations per unit of accuracy (real-time mode).
pub const GRADIENT_ITERATIONS_REALTIME: u32 = 5;

/// Maximum longitude perturbation per gradient search (± degrees).
pub const GRADIENT_MAX_LONGITUDE_STEP: f32 = 20.0;

/// Finite-difference step for the turret angle (degrees).
pub const GRADIENT_ANGLE_EPSILON: f32 = 1.0;

/// Finite-difference step for power.
pub const GRADIENT_POWER_EPSILON: f32 = 10.0;

/// Descent step for the turret angle.
pub const GRADIENT_ANGLE_RATE: f32 = 5.0;

/// Descent step for power.
pub const GRADIENT_POWER_RATE: f32 = 50.0;

/// Turret clamp used by the gradient search (degrees).
pub const GRADIENT_ANGLE_MIN: f32 = 5.0;
pub const GRADIENT_ANGLE_MAX: f32 = 175.0;

/// Power clamp used by the gradient search.
pub const GRADIENT_POWER_MIN: f32 = 50.0;
pub const GRADIENT_POWER_MAX: f32 = 1000.0;

/// Default wall-clock budget for one search call (milliseconds).
pub const SEARCH_TIME_BOX_MS: u64 = 500;

// --- Projectiles ---

/// Lifetime of a projectile whose kind sets no shorter one (seconds).
pub const DEFAULT_PROJECTILE_TTL_SECS: f32 = 30.0;

/// Lifetime of split and triggered children (seconds).
pub const CHILD_PROJECTILE_TTL_SECS: f32 = 15.0;

/// Collider radius of split and triggered children.
pub const CHILD_PROJECTILE_RADIUS: f32 = 0.4;

/// Explosion volume passed to the audio collaborator.
pub const EXPLOSION_VOLUME: f32 = 3.0;

/// Offset of a bounced projectile from the impact point.
pub const BOUNCE_OFFSET: f32 = 10.0;

// --- Wormholes ---

/// Wormhole capture radius.
pub const WORMHOLE_RADIUS: f32 = 80.0;

/// Distance from the sea-level surface at which wormholes open.
pub const WORMHOLE_ALTITUDE: f32 = 350.0;

/// Wormhole lifetime per participating vehicle (turns).
pub const WORMHOLE_TURNS_PER_VEHICLE: u32 = 2;

/// Minimum separation of a same-planet wormhole pair (degrees).
pub const WORMHOLE_MIN_SEPARATION_DEG: f32 = 120.0;

/// Wormholes open at turn change when a d6 roll is below this value.
pub const WORMHOLE_SPAWN_ROLL: u32 = 2;

// --- Trajectory preview ---

/// Steps simulated for the aiming preview.
pub const PREVIEW_STEPS: usize = 200;

/// Every n-th preview step is reported.
pub const PREVIEW_STRIDE: usize = 10;
