#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path search over the floors of a generated level.
//!
//! Both strategies share the [`PathFinding`] contract: the returned sequence
//! starts with the step after `origin` and ends at `destination`. It is empty
//! when the two coincide or when no route exists.

use delve_core::{Grid, TileCoord};

mod dijkstra;
mod simple_move;

pub use dijkstra::{Dijkstra, Search};
pub use simple_move::SimpleMove;

/// Strategy that plans a walk between two floors.
pub trait PathFinding {
    /// Plans a route from `origin` to `destination`, excluding `origin`.
    fn find_shortest_path(
        &self,
        grid: &Grid,
        origin: TileCoord,
        destination: TileCoord,
    ) -> Vec<TileCoord>;
}
