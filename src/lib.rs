//! Shortest paths on fixed-size grids with obstacles.
//!
//! Two engines share one contract: [`Dijkstra`] (uniform-cost search) and
//! [`AStar`] (Manhattan-guided search). Both take a read-only [`Grid`] and two
//! endpoints and return a [`SearchOutcome`], or a [`SearchError`] when an
//! endpoint is out of bounds or on an obstacle. The remaining modules are the
//! terminal front end: endpoint parsing, the reveal session and batch runs.

pub mod algorithms;
pub mod batch;
pub mod config;
pub mod grid;
pub mod input;
pub mod session;
pub mod statistics;

pub use algorithms::a_star::AStar;
pub use algorithms::common::{
    Endpoint, Path, SearchError, SearchOutcome, SearchReport, ShortestPath,
};
pub use algorithms::dijkstra::Dijkstra;
pub use algorithms::reconstruct::Reconstruction;
pub use grid::{Cell, Grid, GridError, Position};

/// Uniform-cost shortest path from `start` to `goal`.
pub fn shortest_path_uniform_cost(
    grid: &Grid,
    start: Position,
    goal: Position,
) -> Result<SearchOutcome, SearchError> {
    Dijkstra::new()
        .search(grid, start, goal)
        .map(|report| report.outcome)
}

/// Heuristic (A*) shortest path from `start` to `goal`.
pub fn shortest_path_heuristic(
    grid: &Grid,
    start: Position,
    goal: Position,
) -> Result<SearchOutcome, SearchError> {
    AStar::new()
        .search(grid, start, goal)
        .map(|report| report.outcome)
}
