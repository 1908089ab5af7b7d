#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Delve dungeon crawler.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. The tile model ([`Grid`]) and the seeded random source
//! ([`DungeonRng`]) live here as well because every system consults them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod grid;
mod rng;

pub use grid::{Grid, Tile, VerticalBounds};
pub use rng::{ChoiceError, DungeonRng};

/// Side length of a single square tile expressed in world units.
pub const TILE_SIZE: f32 = 16.0;

/// Lower edge of the depth band handed to renderers for foreground content.
pub const DEPTH_BOTTOM: f32 = 0.2;

/// Upper edge of the depth band handed to renderers for foreground content.
pub const DEPTH_TOP: f32 = 0.8;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock by the provided frame delta.
    FrameTick {
        /// Duration of time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Requests that the player walk toward the provided tile.
    SetPlayerDestination {
        /// Tile the player clicked on.
        tile: TileCoord,
    },
    /// Requests that a roaming actor be placed on the provided floor tile.
    SpawnRoamer {
        /// Floor tile the roamer starts on.
        tile: TileCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the frame.
        dt: Duration,
    },
    /// Announces that the shared pacing machine changed state.
    ActionStateChanged {
        /// State before the transition.
        from: ActionState,
        /// State after the transition.
        to: ActionState,
    },
    /// Confirms that an entity committed to a path.
    DestinationQueued {
        /// Entity whose queue was filled.
        entity: EntityId,
        /// Number of tiles appended to the queue.
        tiles: usize,
    },
    /// Reports that a destination request was refused without mutating state.
    DestinationRejected {
        /// Entity the request targeted.
        entity: EntityId,
        /// Tile that was requested.
        tile: TileCoord,
        /// Specific reason the request was refused.
        reason: RejectionReason,
    },
    /// Confirms that an entity moved onto a new tile during an action tick.
    EntityStepped {
        /// Entity that moved.
        entity: EntityId,
        /// Tile the entity occupied before the step.
        from: TileCoord,
        /// Tile the entity occupies after the step.
        to: TileCoord,
    },
    /// Confirms that two entities traded tiles.
    EntitiesSwapped {
        /// Entity that initiated the swap.
        initiator: EntityId,
        /// Entity that was displaced.
        displaced: EntityId,
    },
    /// Reports that an entity gave up on its queue because its next tile was taken.
    PathBlocked {
        /// Entity whose queue was cleared.
        entity: EntityId,
        /// Tile that was occupied.
        tile: TileCoord,
    },
    /// Confirms that a roamer was placed into the world.
    RoamerSpawned {
        /// Identifier assigned to the roamer.
        entity: EntityId,
        /// Tile the roamer occupies.
        tile: TileCoord,
    },
    /// Reports that a roamer could not be placed.
    SpawnRejected {
        /// Tile that was requested.
        tile: TileCoord,
        /// Specific reason the placement failed.
        reason: RejectionReason,
    },
}

/// Reasons a destination or spawn request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The pacing machine is still draining a previous path.
    ActionsInProgress,
    /// No floor exists at the requested tile.
    NotAFloor,
    /// The requested tile lies outside the player's view.
    NotVisible,
    /// The entity already has a committed path.
    AlreadyQueued,
    /// The path exceeds the per-request tile limit.
    TooFar,
    /// No path connects the entity to the requested tile.
    Unreachable,
    /// Another entity already stands on the requested tile.
    Occupied,
}

/// Integer coordinate of a tile on the unbounded dungeon grid.
///
/// `x` grows to the right and `y` grows downward, matching screen space.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileCoord {
    x: i32,
    y: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal index of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical index of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate shifted by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the orthogonal neighbour in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Reports whether the two coordinates share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: TileCoord) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Largest per-axis distance between two coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// World-space position of the tile's top-left corner.
    #[must_use]
    pub fn position(self) -> WorldPosition {
        WorldPosition::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    x: f32,
    y: f32,
}

impl WorldPosition {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Linearly interpolates toward `target` by `fraction`, clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: WorldPosition, fraction: f32) -> Self {
        let t = fraction.clamp(0.0, 1.0);
        Self::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

/// Cardinal directions used by the generator and the greedy mover.
///
/// Variant order is significant: random direction draws index into [`Direction::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing `y`.
    Up,
    /// Toward increasing `y`.
    Down,
    /// Toward decreasing `x`.
    Left,
    /// Toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Tile delta for a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions at 90 degrees, in canonical order.
    #[must_use]
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Stable index of the direction inside [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Distinguishes walkable floors from the walls that border them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable tile that may carry one entity.
    Floor,
    /// Non-walkable tile bordering the floors.
    Wall,
}

/// Sprite-sheet variant derived from a tile's neighbours.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VariantId(u8);

impl VariantId {
    /// Creates a variant identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the variant.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Behavioural archetype of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The user-controlled character.
    Player,
    /// Ambient actor that greedily closes in on a nearby player.
    Roamer,
}

/// Lifecycle of the shared action pacing machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionState {
    /// Idle; no action is being paced.
    #[default]
    Stopped,
    /// A stop was requested and will finalize on the next frame.
    Stopping,
    /// A fresh run was started; entities tick on the next frame.
    Starting,
    /// An action is being interpolated.
    InProgress,
    /// The current action completed; entities tick again on the next frame.
    Restarting,
}
