use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use delve_core::{ActionState, Command, DungeonRng, Event, TileCoord};
use delve_system_generation::LevelGenerator;
use delve_system_pathfinding::{Dijkstra, PathFinding};
use delve_world::{self as world, query, World, MAX_TILES_PER_PATHFIND};

const SEED: u64 = 0x0dd_ba11;
const LEGS: usize = 6;
const FRAME: Duration = Duration::from_millis(16);

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(SEED);
    let second = replay(SEED);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first.steps > 0, "player never moved");
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<String>,
    player: TileCoord,
    steps: usize,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.hash(&mut hasher);
        self.player.hash(&mut hasher);
        hasher.finish()
    }
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut rng = DungeonRng::new(seed);
    let level = LevelGenerator::default()
        .generate(&mut rng)
        .expect("default tuning always generates");
    let (grid, start) = level.into_parts();
    let mut world = World::new(grid, start).expect("start is a floor");

    let roamer_tile = farthest_visible_floor(&world);
    let mut log = Vec::new();
    let mut steps = 0;

    if let Some(tile) = roamer_tile {
        let spawn = Command::SpawnRoamer { tile };
        run(&mut world, spawn, &mut log, &mut steps);
    }

    for _ in 0..LEGS {
        let Some(target) = farthest_visible_floor(&world) else {
            break;
        };
        let walk = Command::SetPlayerDestination { tile: target };
        run(&mut world, walk, &mut log, &mut steps);

        for _ in 0..600 {
            let tick = Command::FrameTick { dt: FRAME };
            run(&mut world, tick, &mut log, &mut steps);
            if query::action_state(&world) == ActionState::Stopped {
                break;
            }
        }
        assert_eq!(query::action_state(&world), ActionState::Stopped);
    }

    ReplayOutcome {
        events: log,
        player: query::player_tile(&world),
        steps,
    }
}

fn run(world: &mut World, command: Command, log: &mut Vec<String>, steps: &mut usize) {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    for event in events {
        if matches!(event, Event::EntityStepped { .. }) {
            *steps += 1;
        }
        log.push(format!("{event:?}"));
    }
}

fn is_open(world: &World, coord: TileCoord) -> bool {
    query::is_visible(world, coord) && query::occupant(world, coord).is_none()
}

/// Visible, unoccupied floor with the longest acceptable path from the player.
fn farthest_visible_floor(world: &World) -> Option<TileCoord> {
    let grid = query::grid(world);
    let origin = query::player_tile(world);

    grid.floors()
        .map(|tile| tile.coord())
        .filter(|&coord| is_open(world, coord))
        .map(|coord| (Dijkstra.find_shortest_path(grid, origin, coord).len(), coord))
        .filter(|&(length, _)| length > 0 && length <= MAX_TILES_PER_PATHFIND)
        .max()
        .map(|(_, coord)| coord)
}
