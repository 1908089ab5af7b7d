#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the Delve dungeon crawler.
//!
//! The world owns the generated grid, every entity, the tile occupancy
//! relation and the shared [`ActionManager`]. Adapters mutate it exclusively
//! through [`apply`], and read it through the [`query`] module.

use std::{collections::BTreeMap, time::Duration};

use delve_core::{
    ActionState, Command, EntityId, EntityKind, Event, Grid, RejectionReason, TileCoord,
};
use delve_system_pathfinding::{Dijkstra, PathFinding, SimpleMove};
use log::{debug, warn};
use thiserror::Error;

mod action;
mod entity;

pub use action::{ActionManager, SECONDS_PER_ACTION};
pub use entity::{DestinationError, Entity, MAX_TILES_PER_PATHFIND};

/// Tiles strictly closer than this on both axes are visible to the player.
pub const VIEW_RANGE: u32 = 6;

/// Roamers chase a player within this many tiles on each axis.
pub const ROAMER_CHASE_RANGE: u32 = 4;

const PLAYER_INDEX: usize = 0;

/// Errors raised while creating a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The starting tile is not a floor of the provided grid.
    #[error("starting tile {0:?} is not a floor")]
    StartNotFloor(TileCoord),
}

/// Represents the state of a single play session.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    entities: Vec<Entity>,
    occupancy: BTreeMap<TileCoord, EntityId>,
    actions: ActionManager,
    next_entity: u32,
}

impl World {
    /// Creates a session over `grid` with the player standing on `starting_tile`.
    pub fn new(grid: Grid, starting_tile: TileCoord) -> Result<Self, WorldError> {
        if grid.find_floor(starting_tile).is_none() {
            return Err(WorldError::StartNotFloor(starting_tile));
        }

        let player = Entity::new(EntityId::new(0), EntityKind::Player, starting_tile);
        let mut occupancy = BTreeMap::new();
        let _ = occupancy.insert(starting_tile, player.id());

        Ok(Self {
            grid,
            entities: vec![player],
            occupancy,
            actions: ActionManager::new(),
            next_entity: 1,
        })
    }

    fn player(&self) -> &Entity {
        &self.entities[PLAYER_INDEX]
    }

    fn entity_index(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }

    fn frame_tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        if self.actions.ticks_entities() {
            for index in 0..self.entities.len() {
                self.action_tick(index, out_events);
            }
        }

        let state = self.actions.state();
        if !matches!(state, ActionState::Stopped | ActionState::Stopping)
            && !self.player().is_partaking()
        {
            self.actions.stop(out_events);
        }

        self.actions.tick(dt, out_events);

        let fraction = self.actions.decimal_complete();
        for entity in &mut self.entities {
            entity.interpolate(fraction);
        }
    }

    /// Performs one discrete step for the entity at `index`.
    fn action_tick(&mut self, index: usize, out_events: &mut Vec<Event>) {
        if self.entities[index].take_displaced() {
            return;
        }
        if self.entities[index].kind() == EntityKind::Roamer {
            self.chase_player(index, out_events);
        }

        let entity = &mut self.entities[index];
        let Some(next) = entity.pop_next() else {
            entity.rest();
            return;
        };
        let id = entity.id();
        let from = entity.tile();

        match self.occupancy.get(&next).copied() {
            Some(other) if other != id => {
                let final_step = entity.queued_len() == 0;
                if entity.kind() == EntityKind::Player && final_step && from.is_adjacent(next) {
                    self.swap(index, other, out_events);
                } else {
                    entity.abandon_path();
                    debug!("entity {} blocked at {next:?}", id.get());
                    out_events.push(Event::PathBlocked {
                        entity: id,
                        tile: next,
                    });
                }
            }
            _ => {
                entity.step_to(next);
                let _ = self.occupancy.remove(&from);
                let _ = self.occupancy.insert(next, id);
                out_events.push(Event::EntityStepped {
                    entity: id,
                    from,
                    to: next,
                });
            }
        }
    }

    /// Trades tiles between the entity at `index` and `displaced`.
    fn swap(&mut self, index: usize, displaced: EntityId, out_events: &mut Vec<Event>) {
        let Some(other_index) = self.entity_index(displaced) else {
            self.entities[index].abandon_path();
            return;
        };
        let initiator = self.entities[index].id();
        let here = self.entities[index].tile();
        let there = self.entities[other_index].tile();

        self.entities[index].step_to(there);
        self.entities[other_index].displace_to(here);
        let _ = self.occupancy.insert(there, initiator);
        let _ = self.occupancy.insert(here, displaced);

        out_events.push(Event::EntitiesSwapped {
            initiator,
            displaced,
        });
    }

    /// Queues a greedy step toward a nearby player.
    fn chase_player(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let target = self.player().tile();
        let roamer = &self.entities[index];
        let origin = roamer.tile();
        if roamer.queued_len() > 0
            || origin.is_adjacent(target)
            || origin.chebyshev_distance(target) > ROAMER_CHASE_RANGE
        {
            return;
        }

        let path = SimpleMove.find_shortest_path(&self.grid, origin, target);
        let id = roamer.id();
        match self.entities[index].set_destination(path) {
            Ok(tiles) => out_events.push(Event::DestinationQueued { entity: id, tiles }),
            Err(error) => debug!("roamer {} cannot chase: {error}", id.get()),
        }
    }

    fn set_player_destination(&mut self, tile: TileCoord, out_events: &mut Vec<Event>) {
        let player = self.player();
        let id = player.id();
        let origin = player.tile();

        let rejection = if self.actions.state() != ActionState::Stopped {
            Some(RejectionReason::ActionsInProgress)
        } else if self.grid.find_floor(tile).is_none() {
            Some(RejectionReason::NotAFloor)
        } else if !within_view(origin, tile) {
            Some(RejectionReason::NotVisible)
        } else {
            None
        };

        let outcome = match rejection {
            Some(reason) => Err(reason),
            None => {
                let path = Dijkstra.find_shortest_path(&self.grid, origin, tile);
                self.entities[PLAYER_INDEX]
                    .set_destination(path)
                    .map_err(|error| match error {
                        DestinationError::AlreadyQueued => RejectionReason::AlreadyQueued,
                        DestinationError::TooFar { .. } => RejectionReason::TooFar,
                        DestinationError::Unreachable => RejectionReason::Unreachable,
                    })
            }
        };

        match outcome {
            Ok(tiles) => {
                out_events.push(Event::DestinationQueued { entity: id, tiles });
                self.actions.start(out_events);
            }
            Err(reason) => {
                warn!("player destination {tile:?} rejected: {reason:?}");
                out_events.push(Event::DestinationRejected {
                    entity: id,
                    tile,
                    reason,
                });
            }
        }
    }

    fn spawn_roamer(&mut self, tile: TileCoord, out_events: &mut Vec<Event>) {
        let rejection = if self.grid.find_floor(tile).is_none() {
            Some(RejectionReason::NotAFloor)
        } else if self.occupancy.contains_key(&tile) {
            Some(RejectionReason::Occupied)
        } else {
            None
        };

        if let Some(reason) = rejection {
            warn!("roamer spawn at {tile:?} rejected: {reason:?}");
            out_events.push(Event::SpawnRejected { tile, reason });
            return;
        }

        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.saturating_add(1);
        self.entities.push(Entity::new(id, EntityKind::Roamer, tile));
        let _ = self.occupancy.insert(tile, id);
        out_events.push(Event::RoamerSpawned { entity: id, tile });
    }
}

fn within_view(viewer: TileCoord, tile: TileCoord) -> bool {
    viewer.x().abs_diff(tile.x()) < VIEW_RANGE && viewer.y().abs_diff(tile.y()) < VIEW_RANGE
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::FrameTick { dt } => world.frame_tick(dt, out_events),
        Command::SetPlayerDestination { tile } => world.set_player_destination(tile, out_events),
        Command::SpawnRoamer { tile } => world.spawn_roamer(tile, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use delve_core::{
        ActionState, EntityId, EntityKind, Grid, TileCoord, TileKind, VariantId, WorldPosition,
    };

    use super::{within_view, Entity, World, PLAYER_INDEX};

    /// Everything a renderer needs to draw one tile.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TileView {
        /// Grid coordinate of the tile.
        pub coord: TileCoord,
        /// Floor or wall.
        pub kind: TileKind,
        /// Sprite variant selected by the autotiler.
        pub variant: VariantId,
        /// World-space position.
        pub position: WorldPosition,
        /// Draw depth within the foreground band.
        pub depth: f32,
    }

    /// Everything a renderer needs to draw one entity.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EntityView {
        /// Identifier of the entity.
        pub id: EntityId,
        /// Archetype of the entity.
        pub kind: EntityKind,
        /// Tile the entity occupies.
        pub tile: TileCoord,
        /// Interpolated world-space position.
        pub position: WorldPosition,
        /// Draw depth within the foreground band.
        pub depth: f32,
        /// Number of tiles still queued.
        pub queued: usize,
    }

    /// Provides read-only access to the generated grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures every floor followed by every wall.
    #[must_use]
    pub fn tiles(world: &World) -> Vec<TileView> {
        world
            .grid
            .floors()
            .chain(world.grid.walls())
            .map(|tile| {
                let position = tile.position();
                TileView {
                    coord: tile.coord(),
                    kind: tile.kind(),
                    variant: tile.variant(),
                    position,
                    depth: world.grid.depth_at(position.y()),
                }
            })
            .collect()
    }

    /// Captures every entity, player first.
    #[must_use]
    pub fn entities(world: &World) -> Vec<EntityView> {
        world
            .entities
            .iter()
            .map(|entity| EntityView {
                id: entity.id(),
                kind: entity.kind(),
                tile: entity.tile(),
                position: entity.position(),
                depth: world.grid.depth_at(entity.position().y()),
                queued: entity.queued_len(),
            })
            .collect()
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<&Entity> {
        world.entities.iter().find(|entity| entity.id() == id)
    }

    /// The player entity.
    #[must_use]
    pub fn player(world: &World) -> &Entity {
        &world.entities[PLAYER_INDEX]
    }

    /// Tile the player occupies.
    #[must_use]
    pub fn player_tile(world: &World) -> TileCoord {
        player(world).tile()
    }

    /// Entity standing on `tile`, if any.
    #[must_use]
    pub fn occupant(world: &World, tile: TileCoord) -> Option<EntityId> {
        world.occupancy.get(&tile).copied()
    }

    /// Current state of the shared pacing machine.
    #[must_use]
    pub fn action_state(world: &World) -> ActionState {
        world.actions.state()
    }

    /// Fraction of the current action completed.
    #[must_use]
    pub fn decimal_complete(world: &World) -> f32 {
        world.actions.decimal_complete()
    }

    /// Reports whether `tile` lies within the player's view.
    #[must_use]
    pub fn is_visible(world: &World, tile: TileCoord) -> bool {
        within_view(player(world).tile(), tile)
    }
}
