use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use delve_core::{Direction, Grid, TileCoord};
use log::debug;

use crate::PathFinding;

/// Neighbour expansion order: up, right, down, left.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// Uniform-cost shortest path over 4-connected floors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

/// Outcome of a single search, including the examined-tile diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Search {
    /// Tiles from the step after the origin through the destination.
    pub path: Vec<TileCoord>,
    /// Number of floors settled before the search ended.
    pub examined: usize,
    /// Number of floors in the searched grid.
    pub total: usize,
}

impl Dijkstra {
    /// Runs the search and reports how much of the grid it touched.
    ///
    /// The search stops as soon as `destination` is settled. Non-floor
    /// endpoints and identical endpoints yield an empty path.
    #[must_use]
    pub fn search(&self, grid: &Grid, origin: TileCoord, destination: TileCoord) -> Search {
        let total = grid.floor_count();
        if origin == destination
            || grid.find_floor(origin).is_none()
            || grid.find_floor(destination).is_none()
        {
            return Search {
                path: Vec::new(),
                examined: 0,
                total,
            };
        }

        let mut distances: HashMap<TileCoord, u32> = HashMap::new();
        let mut previous: HashMap<TileCoord, TileCoord> = HashMap::new();
        let mut settled: HashSet<TileCoord> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        let _ = distances.insert(origin, 0);
        frontier.push(Reverse((0u32, origin)));

        let mut reached = false;
        while let Some(Reverse((distance, current))) = frontier.pop() {
            if !settled.insert(current) {
                continue;
            }
            if current == destination {
                reached = true;
                break;
            }

            for direction in EXPANSION_ORDER {
                let next = current.step(direction);
                if settled.contains(&next) || grid.find_floor(next).is_none() {
                    continue;
                }
                let candidate = distance + 1;
                let best = distances.get(&next).copied().unwrap_or(u32::MAX);
                if candidate < best {
                    let _ = distances.insert(next, candidate);
                    let _ = previous.insert(next, current);
                    frontier.push(Reverse((candidate, next)));
                }
            }
        }

        let examined = settled.len();
        debug!("dijkstra examined {examined}/{total} tiles");

        let path = if reached {
            reconstruct_path(&previous, origin, destination)
        } else {
            Vec::new()
        };

        Search {
            path,
            examined,
            total,
        }
    }
}

impl PathFinding for Dijkstra {
    fn find_shortest_path(
        &self,
        grid: &Grid,
        origin: TileCoord,
        destination: TileCoord,
    ) -> Vec<TileCoord> {
        self.search(grid, origin, destination).path
    }
}

/// Walks predecessor links back from `destination`, excluding `origin`.
fn reconstruct_path(
    previous: &HashMap<TileCoord, TileCoord>,
    origin: TileCoord,
    destination: TileCoord,
) -> Vec<TileCoord> {
    let mut path = Vec::new();
    let mut current = destination;
    while current != origin {
        path.push(current);
        match previous.get(&current) {
            Some(&step) => current = step,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
