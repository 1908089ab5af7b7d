use delve_core::{Grid, TileCoord};

use crate::PathFinding;

/// Greedy single-step mover for ambient actors.
///
/// Tries one step along the axis with the larger gap (ties favour `x`), then
/// one step along the other axis. Never looks further than the adjacent floor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleMove;

impl PathFinding for SimpleMove {
    fn find_shortest_path(
        &self,
        grid: &Grid,
        origin: TileCoord,
        destination: TileCoord,
    ) -> Vec<TileCoord> {
        let dx = destination.x() - origin.x();
        let dy = destination.y() - origin.y();
        let along_x = (dx != 0).then(|| origin.offset(dx.signum(), 0));
        let along_y = (dy != 0).then(|| origin.offset(0, dy.signum()));

        let (first, second) = if dx.abs() >= dy.abs() {
            (along_x, along_y)
        } else {
            (along_y, along_x)
        };
        [first, second]
            .into_iter()
            .flatten()
            .find(|&step| grid.find_floor(step).is_some())
            .into_iter()
            .collect()
    }
}
