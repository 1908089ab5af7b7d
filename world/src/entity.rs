use std::collections::VecDeque;

use delve_core::{EntityId, EntityKind, TileCoord, WorldPosition};
use thiserror::Error;

/// Longest path an entity accepts in one destination request.
pub const MAX_TILES_PER_PATHFIND: usize = 15;

/// Reasons an entity refuses a planned path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DestinationError {
    /// The entity is still draining a previous path.
    #[error("entity already has a queued path")]
    AlreadyQueued,
    /// The planned path exceeds the per-request limit.
    #[error("path of {length} tiles exceeds the limit of {limit}")]
    TooFar {
        /// Length of the rejected path.
        length: usize,
        /// Largest accepted length.
        limit: usize,
    },
    /// No route was found.
    #[error("destination is unreachable")]
    Unreachable,
}

/// An actor standing on a floor tile with a queue of committed steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    tile: TileCoord,
    origin: TileCoord,
    queue: VecDeque<TileCoord>,
    position: WorldPosition,
    partaking: bool,
    displaced: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, kind: EntityKind, tile: TileCoord) -> Self {
        Self {
            id,
            kind,
            tile,
            origin: tile,
            queue: VecDeque::new(),
            position: tile.position(),
            partaking: false,
            displaced: false,
        }
    }

    /// Identifier of the entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Archetype of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Tile the entity occupies.
    #[must_use]
    pub const fn tile(&self) -> TileCoord {
        self.tile
    }

    /// Interpolated world-space position.
    #[must_use]
    pub const fn position(&self) -> WorldPosition {
        self.position
    }

    /// Number of tiles still queued.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the entity moved during the latest action tick.
    #[must_use]
    pub const fn is_partaking(&self) -> bool {
        self.partaking
    }

    /// Commits to `path`, all or nothing.
    pub(crate) fn set_destination(
        &mut self,
        path: Vec<TileCoord>,
    ) -> Result<usize, DestinationError> {
        if !self.queue.is_empty() {
            return Err(DestinationError::AlreadyQueued);
        }
        if path.is_empty() {
            return Err(DestinationError::Unreachable);
        }
        if path.len() > MAX_TILES_PER_PATHFIND {
            return Err(DestinationError::TooFar {
                length: path.len(),
                limit: MAX_TILES_PER_PATHFIND,
            });
        }
        let length = path.len();
        self.queue.extend(path);
        Ok(length)
    }

    pub(crate) fn pop_next(&mut self) -> Option<TileCoord> {
        self.queue.pop_front()
    }

    /// Begins interpolating from the current tile onto `next`.
    pub(crate) fn step_to(&mut self, next: TileCoord) {
        self.origin = self.tile;
        self.tile = next;
        self.partaking = true;
    }

    /// Ends participation; the entity rests on its tile.
    pub(crate) fn rest(&mut self) {
        self.origin = self.tile;
        self.partaking = false;
    }

    /// Moves the entity aside for a swap; its own tick this frame is skipped.
    pub(crate) fn displace_to(&mut self, tile: TileCoord) {
        self.step_to(tile);
        self.queue.clear();
        self.displaced = true;
    }

    /// Consumes the displacement marker left by [`Entity::displace_to`].
    pub(crate) fn take_displaced(&mut self) -> bool {
        std::mem::take(&mut self.displaced)
    }

    pub(crate) fn abandon_path(&mut self) {
        self.queue.clear();
        self.rest();
    }

    pub(crate) fn interpolate(&mut self, fraction: f32) {
        self.position = self.origin.position().lerp(self.tile.position(), fraction);
    }
}
