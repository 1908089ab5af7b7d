//! Sparse tile model keyed by integer coordinates.

use std::collections::BTreeMap;

use crate::{TileCoord, TileKind, VariantId, WorldPosition, DEPTH_BOTTOM, DEPTH_TOP, TILE_SIZE};

/// Read-only snapshot of a single generated tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    coord: TileCoord,
    kind: TileKind,
    variant: VariantId,
}

impl Tile {
    /// Coordinate that identifies the tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Whether the tile is a floor or a wall.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Sprite variant assigned by the autotiler.
    #[must_use]
    pub const fn variant(&self) -> VariantId {
        self.variant
    }

    /// World-space position of the tile.
    #[must_use]
    pub fn position(&self) -> WorldPosition {
        self.coord.position()
    }
}

/// Inclusive vertical extent of every generated tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalBounds {
    min_y: i32,
    max_y: i32,
}

impl VerticalBounds {
    /// Smallest tile `y` index in the grid.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Largest tile `y` index in the grid.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }
}

/// Owns every floor and wall tile of a generated level.
///
/// Floors and walls live in two disjoint maps, so a coordinate holds at most one
/// tile. Insertion is idempotent by coordinate: asking for a tile where one
/// already exists leaves the grid untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    floors: BTreeMap<TileCoord, VariantId>,
    walls: BTreeMap<TileCoord, VariantId>,
    bounds: Option<VerticalBounds>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid containing floors at the provided coordinates.
    #[must_use]
    pub fn with_floors<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = TileCoord>,
    {
        let mut grid = Self::new();
        for coord in coords {
            let _ = grid.insert_floor(coord);
        }
        grid.recompute_bounds();
        grid
    }

    /// Creates a floor unless any tile already occupies the coordinate.
    ///
    /// Returns `true` when a new floor was inserted.
    pub fn insert_floor(&mut self, coord: TileCoord) -> bool {
        if self.tile_exists_at(coord) {
            return false;
        }
        let _ = self.floors.insert(coord, VariantId::default());
        true
    }

    /// Creates a wall unless any tile already occupies the coordinate.
    ///
    /// Returns `true` when a new wall was inserted.
    pub fn insert_wall(&mut self, coord: TileCoord) -> bool {
        if self.tile_exists_at(coord) {
            return false;
        }
        let _ = self.walls.insert(coord, VariantId::default());
        true
    }

    /// Reports whether a floor or a wall occupies the coordinate.
    #[must_use]
    pub fn tile_exists_at(&self, coord: TileCoord) -> bool {
        self.floors.contains_key(&coord) || self.walls.contains_key(&coord)
    }

    /// Returns the floor at the coordinate, if any.
    #[must_use]
    pub fn find_floor(&self, coord: TileCoord) -> Option<Tile> {
        self.floors.get(&coord).map(|&variant| Tile {
            coord,
            kind: TileKind::Floor,
            variant,
        })
    }

    /// Returns the wall at the coordinate, if any.
    #[must_use]
    pub fn find_wall(&self, coord: TileCoord) -> Option<Tile> {
        self.walls.get(&coord).map(|&variant| Tile {
            coord,
            kind: TileKind::Wall,
            variant,
        })
    }

    /// Returns whichever tile occupies the coordinate.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<Tile> {
        self.find_floor(coord).or_else(|| self.find_wall(coord))
    }

    /// Reports whether a tile of the given kind occupies the coordinate.
    #[must_use]
    pub fn contains(&self, kind: TileKind, coord: TileCoord) -> bool {
        match kind {
            TileKind::Floor => self.floors.contains_key(&coord),
            TileKind::Wall => self.walls.contains_key(&coord),
        }
    }

    /// Iterates over every floor in coordinate order.
    pub fn floors(&self) -> impl Iterator<Item = Tile> + '_ {
        self.floors.iter().map(|(&coord, &variant)| Tile {
            coord,
            kind: TileKind::Floor,
            variant,
        })
    }

    /// Iterates over every wall in coordinate order.
    pub fn walls(&self) -> impl Iterator<Item = Tile> + '_ {
        self.walls.iter().map(|(&coord, &variant)| Tile {
            coord,
            kind: TileKind::Wall,
            variant,
        })
    }

    /// Coordinates of every tile of the provided kind.
    #[must_use]
    pub fn coords(&self, kind: TileKind) -> Vec<TileCoord> {
        match kind {
            TileKind::Floor => self.floors.keys().copied().collect(),
            TileKind::Wall => self.walls.keys().copied().collect(),
        }
    }

    /// Number of floor tiles.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Number of wall tiles.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Overwrites the variant of an existing tile of the given kind.
    ///
    /// Returns `false` when no such tile exists.
    pub fn set_variant(&mut self, kind: TileKind, coord: TileCoord, variant: VariantId) -> bool {
        let slot = match kind {
            TileKind::Floor => self.floors.get_mut(&coord),
            TileKind::Wall => self.walls.get_mut(&coord),
        };
        match slot {
            Some(current) => {
                *current = variant;
                true
            }
            None => false,
        }
    }

    /// Recomputes the cached vertical bounds across floors and walls.
    pub fn recompute_bounds(&mut self) {
        self.bounds = self
            .floors
            .keys()
            .chain(self.walls.keys())
            .map(TileCoord::y)
            .fold(None, |bounds, y| match bounds {
                None => Some(VerticalBounds { min_y: y, max_y: y }),
                Some(VerticalBounds { min_y, max_y }) => Some(VerticalBounds {
                    min_y: min_y.min(y),
                    max_y: max_y.max(y),
                }),
            });
    }

    /// Cached vertical bounds, available after [`Grid::recompute_bounds`].
    #[must_use]
    pub const fn bounds(&self) -> Option<VerticalBounds> {
        self.bounds
    }

    /// Maps a world-space `y` into the foreground depth band.
    ///
    /// Content at the top of the level draws at [`DEPTH_BOTTOM`] and content at
    /// the bottom at [`DEPTH_TOP`]. A level that is a single row tall, or whose
    /// bounds were never computed, maps everything to [`DEPTH_BOTTOM`].
    #[must_use]
    pub fn depth_at(&self, world_y: f32) -> f32 {
        let Some(bounds) = self.bounds else {
            return DEPTH_BOTTOM;
        };
        let min = bounds.min_y as f32 * TILE_SIZE;
        let max = bounds.max_y as f32 * TILE_SIZE;
        if max <= min {
            return DEPTH_BOTTOM;
        }
        DEPTH_BOTTOM + (world_y - min) / (max - min) * (DEPTH_TOP - DEPTH_BOTTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_is_idempotent_across_kinds() {
        let mut grid = Grid::new();
        let coord = TileCoord::new(1, 1);

        assert!(grid.insert_floor(coord));
        assert!(!grid.insert_floor(coord));
        assert!(!grid.insert_wall(coord));

        assert_eq!(grid.floor_count(), 1);
        assert_eq!(grid.wall_count(), 0);
        assert!(grid.tile_exists_at(coord));
        assert!(grid.find_wall(coord).is_none());
    }

    #[test]
    fn find_floor_ignores_walls() {
        let mut grid = Grid::new();
        let wall = TileCoord::new(0, -1);
        assert!(grid.insert_wall(wall));

        assert!(grid.tile_exists_at(wall));
        assert!(grid.find_floor(wall).is_none());
        let kind = grid.tile(wall).map(|tile| tile.kind());
        assert_eq!(kind, Some(TileKind::Wall));
    }

    #[test]
    fn depth_spans_band_between_bounds() {
        let grid = Grid::with_floors([TileCoord::new(0, -2), TileCoord::new(0, 2)]);

        let bounds = grid.bounds().expect("bounds computed");
        assert_eq!((bounds.min_y(), bounds.max_y()), (-2, 2));

        let top = TileCoord::new(0, -2).position().y();
        let middle = TileCoord::new(0, 0).position().y();
        let bottom = TileCoord::new(0, 2).position().y();
        assert!((grid.depth_at(top) - DEPTH_BOTTOM).abs() < 1e-6);
        assert!((grid.depth_at(middle) - 0.5).abs() < 1e-6);
        assert!((grid.depth_at(bottom) - DEPTH_TOP).abs() < 1e-6);
    }

    #[test]
    fn flat_level_uses_bottom_depth() {
        let grid = Grid::with_floors([TileCoord::new(0, 0), TileCoord::new(1, 0)]);
        assert_eq!(grid.depth_at(0.0), DEPTH_BOTTOM);
    }
}
