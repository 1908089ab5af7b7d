#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a Delve level and optionally walks it.

mod map;
mod stats;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use delve_core::{ActionState, Command, DungeonRng, Event, TileCoord};
use delve_system_bootstrap::Bootstrap;
use delve_world::{apply, query, World};
use log::{info, warn};

use crate::stats::LevelStats;

/// Simulated frame length used while walking.
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames spent draining a single walk.
const MAX_FRAMES_PER_WALK: usize = 1_000;

/// Offsets the seed used to place roamers so it differs from the level seed.
const ROAMER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Arguments accepted by the `delve` binary.
#[derive(Debug, Parser)]
#[command(name = "delve", about = "Generate and explore a Delve dungeon level")]
struct CliArgs {
    /// Seed for the level generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Tile to walk the player to, as `x,y`. May be repeated.
    #[arg(long = "walk", value_name = "X,Y", value_parser = parse_tile)]
    walks: Vec<TileCoord>,

    /// Number of roamers to scatter across the level.
    #[arg(long, default_value_t = 0)]
    roamers: usize,

    /// Print the statistics without the map.
    #[arg(long)]
    stats_only: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_tile(value: &str) -> Result<TileCoord, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid x in `{value}`: {error}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid y in `{value}`: {error}"))?;
    Ok(TileCoord::new(x, y))
}

/// Entry point for the Delve command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let bootstrap = Bootstrap::default();
    let mut world = bootstrap
        .start_session(args.seed)
        .with_context(|| format!("failed to start a session for seed {}", args.seed))?;

    scatter_roamers(&mut world, args.seed, args.roamers)?;

    for &tile in &args.walks {
        walk_to(&mut world, tile);
    }

    println!("{}", LevelStats::from_grid(args.seed, query::grid(&world)));
    if !args.stats_only {
        println!();
        println!("{}", map::render(&world));
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Places roamers on randomly chosen free floors.
fn scatter_roamers(world: &mut World, seed: u64, count: usize) -> Result<()> {
    let mut rng = DungeonRng::new(seed ^ ROAMER_SEED_SALT);

    for _ in 0..count {
        let free: Vec<TileCoord> = query::grid(world)
            .floors()
            .map(|tile| tile.coord())
            .filter(|&coord| query::occupant(world, coord).is_none())
            .collect();
        let tile = *rng
            .choose_random(&free)
            .map_err(|error| anyhow!("no free floor for a roamer: {error}"))?;

        let mut events = Vec::new();
        apply(world, Command::SpawnRoamer { tile }, &mut events);
        for event in events {
            if let Event::RoamerSpawned { entity, tile } = event {
                info!("roamer {} spawned at {tile:?}", entity.get());
            }
        }
    }

    Ok(())
}

/// Requests a walk and runs frames until the pacing machine idles.
fn walk_to(world: &mut World, tile: TileCoord) {
    let mut events = Vec::new();
    apply(world, Command::SetPlayerDestination { tile }, &mut events);

    let mut steps = 0usize;
    for event in &events {
        if let Event::DestinationRejected { reason, .. } = event {
            println!("walk to ({}, {}) rejected: {reason:?}", tile.x(), tile.y());
            return;
        }
    }

    for _ in 0..MAX_FRAMES_PER_WALK {
        events.clear();
        apply(world, Command::FrameTick { dt: FRAME }, &mut events);
        steps += events
            .iter()
            .filter(|event| matches!(event, Event::EntityStepped { .. }))
            .count();
        if query::action_state(world) == ActionState::Stopped {
            break;
        }
    }

    if query::action_state(world) != ActionState::Stopped {
        warn!("walk to {tile:?} did not settle within {MAX_FRAMES_PER_WALK} frames");
    }

    let end = query::player_tile(world);
    println!(
        "walked to ({}, {}) in {steps} entity steps; player now at ({}, {})",
        tile.x(),
        tile.y(),
        end.x(),
        end.y()
    );
}
