use std::{collections::BTreeMap, fmt};

use delve_core::{Grid, VariantId};

/// Summary figures for a generated level.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelStats {
    pub(crate) seed: u64,
    pub(crate) floors: usize,
    pub(crate) walls: usize,
    pub(crate) min: (i32, i32),
    pub(crate) max: (i32, i32),
    pub(crate) floor_variants: BTreeMap<VariantId, usize>,
}

impl LevelStats {
    pub(crate) fn from_grid(seed: u64, grid: &Grid) -> Self {
        let mut min = (i32::MAX, i32::MAX);
        let mut max = (i32::MIN, i32::MIN);
        for tile in grid.floors().chain(grid.walls()) {
            let coord = tile.coord();
            min = (min.0.min(coord.x()), min.1.min(coord.y()));
            max = (max.0.max(coord.x()), max.1.max(coord.y()));
        }
        if grid.floor_count() + grid.wall_count() == 0 {
            min = (0, 0);
            max = (0, 0);
        }

        let mut floor_variants = BTreeMap::new();
        for floor in grid.floors() {
            *floor_variants.entry(floor.variant()).or_insert(0) += 1;
        }

        Self {
            seed,
            floors: grid.floor_count(),
            walls: grid.wall_count(),
            min,
            max,
            floor_variants,
        }
    }

    /// Width and height of the bounding box in tiles.
    pub(crate) fn extent(&self) -> (i64, i64) {
        (
            i64::from(self.max.0) - i64::from(self.min.0) + 1,
            i64::from(self.max.1) - i64::from(self.min.1) + 1,
        )
    }

    /// Share of the bounding box covered by floors.
    pub(crate) fn floor_density(&self) -> f64 {
        let (width, height) = self.extent();
        let area = width * height;
        if area <= 0 {
            return 0.0;
        }
        self.floors as f64 / area as f64
    }
}

impl fmt::Display for LevelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.extent();
        writeln!(f, "seed:    {}", self.seed)?;
        writeln!(f, "floors:  {}", self.floors)?;
        writeln!(f, "walls:   {}", self.walls)?;
        writeln!(
            f,
            "bounds:  x {}..={}, y {}..={} ({width}x{height}, area {})",
            self.min.0,
            self.max.0,
            self.min.1,
            self.max.1,
            width * height
        )?;
        writeln!(f, "density: {:.3}", self.floor_density())?;
        write!(f, "floor variants:")?;
        for (variant, count) in &self.floor_variants {
            write!(f, " {}x{count}", variant.get())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::TileCoord;

    #[test]
    fn stats_cover_floors_and_walls() {
        let mut grid = Grid::with_floors([TileCoord::new(0, 0), TileCoord::new(1, 0)]);
        assert!(grid.insert_wall(TileCoord::new(-1, -1)));

        let stats = LevelStats::from_grid(4, &grid);
        assert_eq!(stats.floors, 2);
        assert_eq!(stats.walls, 1);
        assert_eq!(stats.min, (-1, -1));
        assert_eq!(stats.max, (1, 0));
        assert_eq!(stats.extent(), (3, 2));
        assert!((stats.floor_density() - 2.0 / 6.0).abs() < 1e-9);
        assert_eq!(stats.floor_variants.get(&VariantId::default()), Some(&2));
    }

    #[test]
    fn display_lists_headline_figures() {
        let grid = Grid::with_floors([TileCoord::new(0, 0)]);
        let text = LevelStats::from_grid(9, &grid).to_string();

        assert!(text.contains("seed:    9"));
        assert!(text.contains("floors:  1"));
        assert!(text.contains("floor variants: 0x1"));
    }
}
