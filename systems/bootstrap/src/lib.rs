#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session bootstrap: generate a level, then build the world around it.

use delve_core::DungeonRng;
use delve_system_generation::{GenerationError, GenerationTuning, Level, LevelGenerator};
use delve_world::{World, WorldError};
use log::info;
use thiserror::Error;

/// Errors raised while preparing a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The generator could not produce a level.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The world rejected the generated level.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Prepares play sessions from a seed.
#[derive(Debug, Default)]
pub struct Bootstrap {
    generator: LevelGenerator,
}

impl Bootstrap {
    /// Creates a bootstrap that generates levels with `tuning`.
    #[must_use]
    pub fn new(tuning: GenerationTuning) -> Self {
        Self {
            generator: LevelGenerator::new(tuning),
        }
    }

    /// Generates the floors, walls and starting tile for `seed`.
    pub fn generate_level(&self, seed: u64) -> Result<Level, GenerationError> {
        let mut rng = DungeonRng::new(seed);
        self.generator.generate(&mut rng)
    }

    /// Creates the world and its player on the level's starting tile.
    pub fn create_entity_manager(&self, level: Level) -> Result<World, WorldError> {
        let (grid, start) = level.into_parts();
        World::new(grid, start)
    }

    /// Runs both bootstrap steps in order.
    pub fn start_session(&self, seed: u64) -> Result<World, BootstrapError> {
        let level = self.generate_level(seed)?;
        info!("starting session for seed {seed}");
        Ok(self.create_entity_manager(level)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_world::query;

    #[test]
    fn session_starts_on_level_start() {
        let bootstrap = Bootstrap::default();
        let level = bootstrap.generate_level(21).expect("level generates");
        let start = level.starting_tile();
        let floors = level.grid().floor_count();

        let world = bootstrap
            .create_entity_manager(level)
            .expect("world accepts level");

        assert_eq!(query::player_tile(&world), start);
        assert_eq!(query::grid(&world).floor_count(), floors);
        assert_eq!(query::entities(&world).len(), 1);
    }

    #[test]
    fn sessions_are_reproducible_per_seed() {
        let bootstrap = Bootstrap::default();
        let a = bootstrap.start_session(99).expect("session starts");
        let b = bootstrap.start_session(99).expect("session starts");

        assert_eq!(query::grid(&a), query::grid(&b));
    }
}
