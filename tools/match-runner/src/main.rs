//! match-runner: headless gravwar matches and planet profile dumps.
//!
//! Usage:
//!   match-runner run --scenario trinary --seed 7 --ticks 20000
//!   match-runner run --level duel.json --config sim.json --realtime
//!   match-runner planet --seed 3 --radius 900 --method fractal

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use gravwar_core::commands::PlayerCommand;
use gravwar_core::enums::{GamePhase, TurnMode};
use gravwar_core::level::LevelDescription;
use gravwar_procgen::{generate_surface_with, FractalParams, PlanetaryParams, ProfileMethod};
use gravwar_sim::scenario::{build_level, ScenarioId};
use gravwar_sim::{SimConfig, SimulationEngine};

/// Tick cap when `--ticks` is not given: ten simulated minutes.
const DEFAULT_TICKS: u64 = 36_000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "planet" => cmd_planet(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "match-runner: gravwar headless match tool\n\
         \n\
         Commands:\n\
         \n\
         run       Play an AI-only match and print a JSON summary\n\
         \n\
           --level <path>     Level description JSON (default: built-in scenario)\n\
           --scenario <name>  Built-in scenario: classic, trinary (default: classic)\n\
           --config <path>    SimConfig JSON (missing fields use defaults)\n\
           --seed <N>         Override the config seed\n\
           --ticks <N>        Tick cap (default: {DEFAULT_TICKS})\n\
           --realtime         Every vehicle acts every tick\n\
         \n\
         planet    Print a generated planet profile as JSON\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --radius <R>       Sea-level radius (default: 900)\n\
           --method <name>    planetary or fractal (default: planetary)\n\
         \n\
         Set RUST_LOG=debug for per-search and state-machine logging.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {flag}: {raw}")),
        None => Ok(None),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// --- Run command ---

fn cmd_run(args: &[String]) -> Result<()> {
    let mut config: SimConfig = match flag_value(args, "--config") {
        Some(path) => read_json(&PathBuf::from(path))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_flag(args, "--seed")? {
        config.seed = seed;
    }
    if has_flag(args, "--realtime") {
        config.turn_mode = TurnMode::Realtime;
    }
    let ticks: u64 = parse_flag(args, "--ticks")?.unwrap_or(DEFAULT_TICKS);

    let mut level: LevelDescription = match flag_value(args, "--level") {
        Some(path) => read_json(&PathBuf::from(path))?,
        None => {
            let name = flag_value(args, "--scenario").unwrap_or("classic");
            let Some(scenario) = ScenarioId::parse(name) else {
                bail!("unknown scenario: {name}");
            };
            build_level(scenario)
        }
    };
    for vehicle in &mut level.vehicles {
        vehicle.is_player = false;
    }
    let level_name = level.name.clone();

    log::info!(
        "Running '{}' with seed {} for at most {} ticks ({:?})",
        level_name,
        config.seed,
        ticks,
        config.turn_mode
    );

    let mut engine = SimulationEngine::new(config.clone());
    engine.queue_command(PlayerCommand::StartMatch { level: Some(level) });

    let mut snapshot = engine.tick();
    let mut shots = 0usize;
    while engine.phase() != GamePhase::GameOver && snapshot.time.tick < ticks {
        snapshot = engine.tick();
        shots += snapshot
            .audio_events
            .iter()
            .filter(|e| matches!(e, gravwar_core::events::AudioEvent::Shoot { .. }))
            .count();
    }

    let survivors: Vec<_> = snapshot
        .vehicles
        .iter()
        .filter(|v| v.health > 0.0)
        .map(|v| {
            json!({
                "number": v.number,
                "color": v.color,
                "health": v.health,
                "planet": v.planet,
            })
        })
        .collect();

    let summary = json!({
        "level": level_name,
        "seed": config.seed,
        "turn_mode": config.turn_mode,
        "phase": snapshot.phase,
        "ticks": snapshot.time.tick,
        "elapsed_secs": snapshot.time.elapsed_secs,
        "total_turns": snapshot.turn.total_turns,
        "winner": snapshot.turn.winner,
        "shots": shots,
        "survivors": survivors,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serializing summary")?
    );
    Ok(())
}

// --- Planet command ---

fn cmd_planet(args: &[String]) -> Result<()> {
    let seed: u64 = parse_flag(args, "--seed")?.unwrap_or(42);
    let radius: f32 = parse_flag(args, "--radius")?.unwrap_or(900.0);
    if !(radius.is_finite() && radius > 0.0) {
        bail!("--radius must be a positive number, got {radius}");
    }
    let method = match flag_value(args, "--method").unwrap_or("planetary") {
        "planetary" => ProfileMethod::Planetary(PlanetaryParams::default()),
        "fractal" => ProfileMethod::Fractal(FractalParams::default()),
        other => bail!("unknown method: {other}"),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let surface = generate_surface_with(method, Vec2::ZERO, radius, &mut rng);

    let profile = json!({
        "seed": seed,
        "sealevel_radius": surface.sealevel_radius,
        "core_radius": surface.core_radius,
        "min_altitude": surface.min_altitude(),
        "max_altitude": surface.max_altitude(),
        "samples": surface.samples(),
    });
    println!(
        "{}",
        serde_json::to_string(&profile).context("serializing profile")?
    );
    Ok(())
}
