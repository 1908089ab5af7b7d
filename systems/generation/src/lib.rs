#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random-walk dungeon generator.
//!
//! A main corridor is walked from the starting tile, turning 90 degrees after a
//! Gaussian-distributed number of steps. Turns may sprout short branches and
//! rooms, and the walk occasionally sidesteps to vary corridor width. Once the
//! floors are laid, every floor is autotiled, walls are raised around them and
//! the walls are autotiled in turn.

use delve_core::{ChoiceError, Direction, DungeonRng, Grid, TileCoord, TileKind};
use delve_system_autotile::{assign_variants, BitMaskMode};
use log::{debug, info};
use thiserror::Error;

mod weights;

pub use weights::DirectionWeights;

/// Errors raised while generating a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A random choice was requested over an unusable set, typically because
    /// the tuning assigned zero weight to every option.
    #[error("invalid random choice during generation: {0}")]
    Choice(#[from] ChoiceError),
}

/// Aggregated tuning knobs for the generator.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationTuning {
    /// Tile the walk starts from; becomes the level's starting tile.
    pub start: TileCoord,
    /// Length limits for the main corridor and its branches.
    pub paths: PathTuning,
    /// Size limits for carved rooms.
    pub rooms: RoomTuning,
    /// Percent chances of the optional walk features.
    pub chances: ChanceTuning,
    /// Distribution of steps between direction changes.
    pub turns: TurnTuning,
    /// Weights used to bias direction choices.
    pub weights: WeightTuning,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            start: TileCoord::new(0, 0),
            paths: PathTuning::default(),
            rooms: RoomTuning::default(),
            chances: ChanceTuning::default(),
            turns: TurnTuning::default(),
            weights: WeightTuning::default(),
        }
    }
}

/// Corridor length limits, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathTuning {
    /// Fewest steps in the main corridor.
    pub main_min: i32,
    /// Most steps in the main corridor.
    pub main_max: i32,
    /// Fewest steps in a branch.
    pub branch_min: i32,
    /// Most steps in a branch.
    pub branch_max: i32,
}

impl Default for PathTuning {
    fn default() -> Self {
        Self {
            main_min: 65,
            main_max: 80,
            branch_min: 4,
            branch_max: 6,
        }
    }
}

/// Room dimension limits, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomTuning {
    /// Narrowest room.
    pub min_width: i32,
    /// Widest room.
    pub max_width: i32,
    /// Shortest room.
    pub min_height: i32,
    /// Tallest room.
    pub max_height: i32,
}

impl Default for RoomTuning {
    fn default() -> Self {
        Self {
            min_width: 3,
            max_width: 5,
            min_height: 3,
            max_height: 5,
        }
    }
}

impl RoomTuning {
    /// Largest number of tiles a single room can add.
    #[must_use]
    pub fn max_area(&self) -> i32 {
        self.max_width.max(0) * self.max_height.max(0)
    }
}

/// Percent chances, each in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChanceTuning {
    /// Chance of a branch at each direction change.
    pub branch_at_turn: u32,
    /// Chance of a room at each direction change.
    pub room_at_turn: u32,
    /// Chance of a sideways step before each advance.
    pub shift: u32,
    /// Chance of dropping each room corner.
    pub remove_room_corner: u32,
}

impl Default for ChanceTuning {
    fn default() -> Self {
        Self {
            branch_at_turn: 50,
            room_at_turn: 10,
            shift: 20,
            remove_room_corner: 30,
        }
    }
}

/// Gaussian parameters for the steps between direction changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnTuning {
    /// Mean number of steps.
    pub mean: f64,
    /// Standard deviation in steps.
    pub std_dev: f64,
    /// Lower clamp.
    pub min: i32,
    /// Upper clamp.
    pub max: i32,
}

impl Default for TurnTuning {
    fn default() -> Self {
        Self {
            mean: 6.0,
            std_dev: 1.0,
            min: 2,
            max: 999,
        }
    }
}

/// Direction weights written into the choice tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightTuning {
    /// Weight of an unbiased direction.
    pub default: u32,
    /// Weight of a favoured direction.
    pub priority: u32,
}

impl Default for WeightTuning {
    fn default() -> Self {
        Self {
            default: 1,
            priority: 3,
        }
    }
}

/// A fully generated and autotiled level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    starting_tile: TileCoord,
}

impl Level {
    /// Tile model containing every floor and wall.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Floor the player starts on.
    #[must_use]
    pub const fn starting_tile(&self) -> TileCoord {
        self.starting_tile
    }

    /// Decomposes the level into its grid and starting tile.
    #[must_use]
    pub fn into_parts(self) -> (Grid, TileCoord) {
        (self.grid, self.starting_tile)
    }
}

/// Random-walk level generator.
#[derive(Clone, Debug, Default)]
pub struct LevelGenerator {
    tuning: GenerationTuning,
}

impl LevelGenerator {
    /// Creates a generator with the provided tuning.
    #[must_use]
    pub fn new(tuning: GenerationTuning) -> Self {
        Self { tuning }
    }

    /// Generates a complete level, drawing every random decision from `rng`.
    pub fn generate(&self, rng: &mut DungeonRng) -> Result<Level, GenerationError> {
        let mut walk = Walk::new(&self.tuning, rng);
        walk.lay_floors()?;
        let mut grid = walk.grid;

        assign_variants(&mut grid, TileKind::Floor, BitMaskMode::EightBit);
        raise_walls(&mut grid);
        assign_variants(&mut grid, TileKind::Wall, BitMaskMode::FourBit);
        grid.recompute_bounds();

        if let Some(bounds) = grid.bounds() {
            info!(
                "generated level: {} floors, {} walls, rows {}..={}",
                grid.floor_count(),
                grid.wall_count(),
                bounds.min_y(),
                bounds.max_y()
            );
        }

        Ok(Level {
            grid,
            starting_tile: self.tuning.start,
        })
    }
}

/// Surrounds every floor with walls on all eight sides where nothing stands yet.
fn raise_walls(grid: &mut Grid) {
    for floor in grid.coords(TileKind::Floor) {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let _ = grid.insert_wall(floor.offset(dx, dy));
            }
        }
    }
}

/// Mutable state of a single generation run.
struct Walk<'a> {
    tuning: &'a GenerationTuning,
    rng: &'a mut DungeonRng,
    grid: Grid,
    change_weights: DirectionWeights,
    branch_weights: DirectionWeights,
    steps_until_turn: i32,
}

impl<'a> Walk<'a> {
    fn new(tuning: &'a GenerationTuning, rng: &'a mut DungeonRng) -> Self {
        Self {
            tuning,
            rng,
            grid: Grid::new(),
            change_weights: DirectionWeights::uniform(tuning.weights.default),
            branch_weights: DirectionWeights::uniform(tuning.weights.default),
            steps_until_turn: 0,
        }
    }

    fn lay_floors(&mut self) -> Result<(), GenerationError> {
        let start = self.tuning.start;
        let _ = self.grid.insert_floor(start);
        self.carve_room(start);

        let mut direction = self.rng.random_direction();
        self.bias_weights(direction)?;

        let paths = self.tuning.paths;
        let length = self.rng.range_inclusive(paths.main_min, paths.main_max);
        self.steps_until_turn = self.next_turn_distance();
        debug!("main path of {length} steps heading {direction:?}");

        let mut current = start;
        for _ in 0..length {
            if self.steps_until_turn == 0 {
                direction = self.change_direction(current, direction)?;
            }
            if self.rng.percent_chance(self.tuning.chances.shift) {
                let side = *self.rng.choose_random(&direction.perpendicular())?;
                current = self.advance(current, side);
            }
            current = self.advance(current, direction);
            self.steps_until_turn -= 1;
        }

        self.carve_room(current);
        Ok(())
    }

    /// Favours the heading and one perpendicular for turns, and their
    /// opposites for branches.
    fn bias_weights(&mut self, heading: Direction) -> Result<(), GenerationError> {
        let side = *self.rng.choose_random(&heading.perpendicular())?;
        let priority = self.tuning.weights.priority;
        for favoured in [heading, side] {
            self.change_weights.set(favoured, priority);
            self.branch_weights.set(favoured.opposite(), priority);
        }
        Ok(())
    }

    fn change_direction(
        &mut self,
        current: TileCoord,
        previous: Direction,
    ) -> Result<Direction, GenerationError> {
        let turn_options = self.change_weights.options(previous.perpendicular());
        let heading = *self.rng.choose_weighted(&turn_options)?;
        self.steps_until_turn = self.next_turn_distance();

        if self.rng.percent_chance(self.tuning.chances.branch_at_turn) {
            let branch_options = self.branch_weights.options([previous, heading.opposite()]);
            let branch = *self.rng.choose_weighted(&branch_options)?;
            self.branch(current, branch);
        }
        if self.rng.percent_chance(self.tuning.chances.room_at_turn) {
            self.carve_room(current);
        }

        debug!("turned from {previous:?} to {heading:?} at {current:?}");
        Ok(heading)
    }

    fn branch(&mut self, from: TileCoord, direction: Direction) {
        let paths = self.tuning.paths;
        let length = self.rng.range_inclusive(paths.branch_min, paths.branch_max);
        let mut current = from;
        for _ in 0..length {
            current = self.advance(current, direction);
        }
        self.carve_room(current);
    }

    /// Carves a rectangle around `center`, biased toward the top-left when a
    /// dimension is even. Corners may be dropped for a ragged outline.
    fn carve_room(&mut self, center: TileCoord) {
        let rooms = self.tuning.rooms;
        let corner_chance = self.tuning.chances.remove_room_corner;
        let height = self.rng.range_inclusive(rooms.min_height, rooms.max_height);
        let width = self.rng.range_inclusive(rooms.min_width, rooms.max_width);

        let origin = center.offset(1 - (width + 1) / 2, 1 - (height + 1) / 2);
        for x in 0..width {
            for y in 0..height {
                let corner = (x == 0 || x == width - 1) && (y == 0 || y == height - 1);
                if corner && self.rng.percent_chance(corner_chance) {
                    continue;
                }
                let _ = self.grid.insert_floor(origin.offset(x, y));
            }
        }
    }

    fn advance(&mut self, from: TileCoord, direction: Direction) -> TileCoord {
        let next = from.step(direction);
        let _ = self.grid.insert_floor(next);
        next
    }

    fn next_turn_distance(&mut self) -> i32 {
        let turns = self.tuning.turns;
        self.rng
            .gaussian(turns.mean, turns.std_dev, turns.min, turns.max)
    }
}
