pub mod a_star;
pub mod common;
pub mod dijkstra;
pub mod distance;
pub mod frontier;
pub mod reconstruct;
