use crate::algorithms::reconstruct::Reconstruction;
use crate::grid::DEFAULT_GRID_SIZE;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Both,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionArg {
    Predecessors,
    Descent,
}

impl From<ReconstructionArg> for Reconstruction {
    fn from(arg: ReconstructionArg) -> Self {
        match arg {
            ReconstructionArg::Predecessors => Reconstruction::Predecessors,
            ReconstructionArg::Descent => Reconstruction::DistanceDescent,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub rows: usize,

    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub cols: usize,

    /// Obstacles scattered on a generated grid.
    #[arg(long, default_value_t = 60)]
    pub obstacles: usize,

    /// Seed for grid generation; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load the grid from a text file instead of generating one.
    #[arg(long)]
    pub grid_file: Option<PathBuf>,

    /// Start cell as "row,col".
    #[arg(long)]
    pub start: Option<String>,

    /// Goal cell as "row,col".
    #[arg(long)]
    pub goal: Option<String>,

    #[arg(long, value_enum, default_value_t = Algorithm::Both)]
    pub algorithm: Algorithm,

    #[arg(long, value_enum, default_value_t = ReconstructionArg::Predecessors)]
    pub reconstruction: ReconstructionArg,

    /// Delay between revealed path cells.
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Pause between the first and second path reveal.
    #[arg(long, default_value_t = 2000)]
    pub pause_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Run many random grids and compare both algorithms.
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    #[arg(long, default_value_t = 100)]
    pub num_simulations: usize,

    /// CSV file for batch results.
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

impl Config {
    pub fn cell_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn reveal_pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn visualize(&self) -> bool {
        !self.no_visualization && !self.quiet
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["grid_shortest_path"])
    }
}
