use crate::algorithms::a_star::AStar;
use crate::algorithms::common::{SearchError, ShortestPath};
use crate::algorithms::dijkstra::Dijkstra;
use crate::config::Config;
use crate::grid::{Grid, GridError, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path as FsPath;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),
}

/// One random grid solved by both engines.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub simulation_id: usize,
    pub seed: u64,
    pub obstacles: usize,
    pub start: Position,
    pub goal: Position,
    pub dijkstra_len: Option<usize>,
    pub a_star_len: Option<usize>,
    pub dijkstra_expanded: usize,
    pub a_star_expanded: usize,
    pub dijkstra_time: Duration,
    pub a_star_time: Duration,
}

impl BatchResult {
    pub fn lengths_agree(&self) -> bool {
        self.dijkstra_len == self.a_star_len
    }

    pub fn found(&self) -> bool {
        self.dijkstra_len.is_some()
    }
}

/// Runs both engines over many seeded random grids and checks that they
/// agree on every shortest path length.
pub struct BatchSimulation {
    config: Config,
    base_seed: u64,
    results: Vec<BatchResult>,
    start_time: Instant,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        BatchSimulation {
            config,
            base_seed,
            results: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn results(&self) -> &[BatchResult] {
        &self.results
    }

    pub fn run(&mut self) -> Result<(), BatchError> {
        info!(
            simulations = self.config.num_simulations,
            rows = self.config.rows,
            cols = self.config.cols,
            obstacles = self.config.obstacles,
            seed = self.base_seed,
            "batch started"
        );
        self.start_time = Instant::now();

        let a_star = AStar::with_reconstruction(self.config.reconstruction.into());
        let dijkstra = Dijkstra::new();

        for sim_id in 0..self.config.num_simulations {
            let seed = self.base_seed.wrapping_add(sim_id as u64);
            let result = self.run_one(sim_id, seed, &dijkstra, &a_star)?;
            if !result.lengths_agree() {
                warn!(
                    simulation = sim_id,
                    seed,
                    dijkstra = ?result.dijkstra_len,
                    a_star = ?result.a_star_len,
                    "path lengths differ"
                );
            }
            self.results.push(result);
        }

        if let Some(path) = self.config.output_file.clone() {
            self.write_csv(&path)?;
            info!(file = %path.display(), rows = self.results.len(), "results written");
        }
        info!(elapsed = ?self.start_time.elapsed(), "batch completed");
        Ok(())
    }

    fn run_one(
        &self,
        simulation_id: usize,
        seed: u64,
        dijkstra: &Dijkstra,
        a_star: &AStar,
    ) -> Result<BatchResult, BatchError> {
        let (rows, cols) = (self.config.rows, self.config.cols);
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols }.into());
        }
        let mut rng = StdRng::seed_from_u64(seed);

        // start in the top-left quadrant, goal in the bottom-right one
        let start = Position {
            row: rng.gen_range(0..rows.div_ceil(2)),
            col: rng.gen_range(0..cols.div_ceil(2)),
        };
        let goal = Position {
            row: rng.gen_range(rows / 2..rows),
            col: rng.gen_range(cols / 2..cols),
        };
        let grid = Grid::random(rows, cols, self.config.obstacles, &[start, goal], &mut rng)?;

        let begin = Instant::now();
        let d = dijkstra.search(&grid, start, goal)?;
        let dijkstra_time = begin.elapsed();

        let begin = Instant::now();
        let a = a_star.search(&grid, start, goal)?;
        let a_star_time = begin.elapsed();

        Ok(BatchResult {
            simulation_id,
            seed,
            obstacles: grid.obstacle_count(),
            start,
            goal,
            dijkstra_len: d.stats.path_len,
            a_star_len: a.stats.path_len,
            dijkstra_expanded: d.stats.expanded,
            a_star_expanded: a.stats.expanded,
            dijkstra_time,
            a_star_time,
        })
    }

    pub fn write_csv(&self, path: &FsPath) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_rows(&mut file)?;
        file.flush()
    }

    pub fn write_rows<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "simulation_id,seed,obstacles,start_row,start_col,goal_row,goal_col,dijkstra_len,a_star_len,dijkstra_expanded,a_star_expanded,dijkstra_time_ns,a_star_time_ns"
        )?;
        let len = |l: Option<usize>| l.map_or_else(String::new, |l| l.to_string());
        for r in &self.results {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                r.simulation_id,
                r.seed,
                r.obstacles,
                r.start.row,
                r.start.col,
                r.goal.row,
                r.goal.col,
                len(r.dijkstra_len),
                len(r.a_star_len),
                r.dijkstra_expanded,
                r.a_star_expanded,
                r.dijkstra_time.as_nanos(),
                r.a_star_time.as_nanos()
            )?;
        }
        Ok(())
    }

    pub fn mismatches(&self) -> usize {
        self.results.iter().filter(|r| !r.lengths_agree()).count()
    }

    pub fn print_summary(&self) {
        if self.results.is_empty() {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SUMMARY ===");
        let total = self.results.len();
        let solved: Vec<_> = self.results.iter().filter(|r| r.found()).collect();
        println!(
            "Solvable grids: {}/{} ({:.1}%)",
            solved.len(),
            total,
            (solved.len() as f64 / total as f64) * 100.0
        );
        println!("Length mismatches: {}", self.mismatches());

        if !solved.is_empty() {
            let n = solved.len() as f64;
            let avg_steps = solved
                .iter()
                .filter_map(|r| r.dijkstra_len)
                .map(|l| (l - 1) as f64)
                .sum::<f64>()
                / n;
            let avg_d = solved.iter().map(|r| r.dijkstra_expanded as f64).sum::<f64>() / n;
            let avg_a = solved.iter().map(|r| r.a_star_expanded as f64).sum::<f64>() / n;
            let d_time: Duration = solved.iter().map(|r| r.dijkstra_time).sum();
            let a_time: Duration = solved.iter().map(|r| r.a_star_time).sum();

            println!("Average path steps: {:.1}", avg_steps);
            println!("Average expansions: dijkstra {:.1}, a_star {:.1}", avg_d, avg_a);
            println!(
                "Average search time: dijkstra {:.2?}, a_star {:.2?}",
                d_time / solved.len() as u32,
                a_time / solved.len() as u32
            );
        }
        println!("Total time: {:.2?}", self.start_time.elapsed());
    }
}
