use crate::algorithms::a_star::AStar;
use crate::algorithms::common::{validate_endpoints, Path, SearchError, SearchOutcome, ShortestPath};
use crate::algorithms::dijkstra::Dijkstra;
use crate::config::{Algorithm, Config};
use crate::grid::{Cell, Grid, Position};
use crate::statistics::{Comparison, EngineRun};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A search engine paired with the marker its path is drawn with.
pub struct AlgorithmRunner {
    pub engine: Box<dyn ShortestPath>,
    pub marker: Cell,
}

impl AlgorithmRunner {
    pub fn new<E: ShortestPath + 'static>(engine: E, marker: Cell) -> Self {
        AlgorithmRunner {
            engine: Box::new(engine),
            marker,
        }
    }

    /// Runners selected by the configuration, uniform-cost first.
    pub fn from_config(config: &Config) -> Vec<AlgorithmRunner> {
        let dijkstra = || AlgorithmRunner::new(Dijkstra::new(), Cell::UniformCostPath);
        let a_star = || {
            AlgorithmRunner::new(
                AStar::with_reconstruction(config.reconstruction.into()),
                Cell::HeuristicPath,
            )
        };
        match config.algorithm {
            Algorithm::Dijkstra => vec![dijkstra()],
            Algorithm::AStar => vec![a_star()],
            Algorithm::Both => vec![dijkstra(), a_star()],
        }
    }
}

/// Result of one engine inside a session run.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub name: &'static str,
    pub marker: Cell,
    pub outcome: SearchOutcome,
}

/// Owns the editable grid and the chosen endpoints, runs the engines on a
/// read-only borrow and reveals their paths cell by cell.
pub struct Session {
    grid: Grid,
    start: Position,
    goal: Position,
    cell_delay: Duration,
    reveal_pause: Duration,
    visualize: bool,
}

impl Session {
    /// Places the Start and Goal markers. Rejects the endpoints without
    /// touching the grid if either is out of bounds or on an obstacle.
    pub fn new(mut grid: Grid, start: Position, goal: Position) -> Result<Self, SearchError> {
        validate_endpoints(&grid, start, goal)?;

        for marker in [Cell::Start, Cell::Goal] {
            while let Some(old) = grid.find(marker) {
                grid.set_cell(old, Cell::Empty);
            }
        }
        place_endpoints(&mut grid, start, goal);

        Ok(Session {
            grid,
            start,
            goal,
            cell_delay: Duration::ZERO,
            reveal_pause: Duration::ZERO,
            visualize: false,
        })
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.cell_delay = config.cell_delay();
        self.reveal_pause = config.reveal_pause();
        self.visualize = config.visualize();
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn endpoints(&self) -> (Position, Position) {
        (self.start, self.goal)
    }

    /// Runs every engine against the same grid, then reveals each found
    /// path in order.
    pub fn run(
        &mut self,
        runners: &[AlgorithmRunner],
    ) -> Result<(Vec<SessionResult>, Comparison), SearchError> {
        self.grid.clear_path_markers();

        let mut results = Vec::with_capacity(runners.len());
        let mut comparison = Comparison::default();

        for runner in runners {
            let begin = Instant::now();
            let report = runner.engine.search(&self.grid, self.start, self.goal)?;
            let elapsed = begin.elapsed();

            match report.outcome.path() {
                Some(path) => info!(
                    algorithm = runner.engine.name(),
                    steps = path.steps(),
                    expanded = report.stats.expanded,
                    "path found"
                ),
                None => warn!(
                    algorithm = runner.engine.name(),
                    start = %self.start,
                    goal = %self.goal,
                    "goal unreachable"
                ),
            }

            comparison.runs.push(EngineRun {
                name: runner.engine.name(),
                stats: report.stats,
                elapsed,
            });
            results.push(SessionResult {
                name: runner.engine.name(),
                marker: runner.marker,
                outcome: report.outcome,
            });
        }

        for (i, result) in results.iter().enumerate() {
            if i > 0 && self.visualize {
                thread::sleep(self.reveal_pause);
            }
            if let Some(path) = result.outcome.path() {
                let (visualize, delay) = (self.visualize, self.cell_delay);
                self.reveal_with(path, result.marker, |grid| {
                    if visualize {
                        clear_screen();
                        print!("{grid}");
                        thread::sleep(delay);
                    }
                });
            }
        }

        Ok((results, comparison))
    }

    /// Marks `path` one cell at a time, calling `render` after each change.
    /// Start and Goal keep their markers.
    pub fn reveal_with(&mut self, path: &Path, marker: Cell, mut render: impl FnMut(&Grid)) {
        for &pos in path {
            if matches!(self.grid.cell(pos), Some(Cell::Start | Cell::Goal)) {
                continue;
            }
            self.grid.set_cell(pos, marker);
            render(&self.grid);
        }
    }

    pub fn toggle_obstacle(&mut self, pos: Position) -> bool {
        self.grid.toggle_obstacle(pos)
    }

    pub fn clear_obstacles(&mut self) {
        self.grid.clear_obstacles();
    }

    /// Clears everything except the endpoint markers.
    pub fn reset(&mut self) {
        self.grid.reset();
        place_endpoints(&mut self.grid, self.start, self.goal);
    }
}

/// When both endpoints share a cell it shows the Start marker.
fn place_endpoints(grid: &mut Grid, start: Position, goal: Position) {
    grid.set_cell(goal, Cell::Goal);
    grid.set_cell(start, Cell::Start);
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> Vec<AlgorithmRunner> {
        vec![
            AlgorithmRunner::new(Dijkstra::new(), Cell::UniformCostPath),
            AlgorithmRunner::new(AStar::new(), Cell::HeuristicPath),
        ]
    }

    #[test]
    fn rejects_endpoint_on_obstacle_without_mutating() {
        let grid: Grid = "..#\n...".parse().unwrap();
        let err = Session::new(grid, Position::new(0, 0), Position::new(0, 2)).err();
        assert!(matches!(err, Some(SearchError::BlockedEndpoint { .. })));
    }

    #[test]
    fn markers_are_moved_not_duplicated() {
        let grid: Grid = "S..\n..G".parse().unwrap();
        let session = Session::new(grid, Position::new(1, 0), Position::new(0, 2)).unwrap();
        let g = session.grid();
        assert_eq!(g.cell(Position::new(0, 0)), Some(Cell::Empty));
        assert_eq!(g.cell(Position::new(1, 2)), Some(Cell::Empty));
        assert_eq!(g.find(Cell::Start), Some(Position::new(1, 0)));
        assert_eq!(g.find(Cell::Goal), Some(Position::new(0, 2)));
    }

    #[test]
    fn run_marks_paths_and_keeps_endpoints() {
        let grid = Grid::new(5, 5);
        let mut session = Session::new(grid, Position::new(0, 0), Position::new(4, 4)).unwrap();
        let (results, comparison) = session.run(&both()).unwrap();

        assert_eq!(results.len(), 2);
        assert!(comparison.lengths_agree());
        for r in &results {
            assert_eq!(r.outcome.path().map(Path::steps), Some(8));
        }
        let g = session.grid();
        assert_eq!(g.cell(Position::new(0, 0)), Some(Cell::Start));
        assert_eq!(g.cell(Position::new(4, 4)), Some(Cell::Goal));
        // the heuristic reveal runs second and wins shared cells
        let last = results[1].outcome.path().unwrap();
        for p in &last.as_slice()[1..last.len() - 1] {
            assert_eq!(g.cell(*p), Some(Cell::HeuristicPath));
        }
    }

    #[test]
    fn reveal_renders_once_per_intermediate_cell() {
        let grid = Grid::new(1, 4);
        let mut session = Session::new(grid, Position::new(0, 0), Position::new(0, 3)).unwrap();
        let path = Path::new((0..4).map(|c| Position::new(0, c)).collect()).unwrap();

        let mut frames = Vec::new();
        session.reveal_with(&path, Cell::UniformCostPath, |g| frames.push(g.to_string()));
        assert_eq!(frames, vec!["Sd.G\n".to_string(), "SddG\n".to_string()]);
    }

    #[test]
    fn unreachable_goal_leaves_grid_unmarked() {
        let grid: Grid = ".#.\n.#.".parse().unwrap();
        let mut session = Session::new(grid, Position::new(0, 0), Position::new(1, 2)).unwrap();
        let (results, _) = session.run(&both()).unwrap();
        assert!(results.iter().all(|r| r.outcome == SearchOutcome::Unreachable));
        assert_eq!(session.grid().to_string(), "S#.\n.#G\n");
    }

    #[test]
    fn editing_buttons() {
        let grid: Grid = ".#.\n...".parse().unwrap();
        let mut session = Session::new(grid, Position::new(0, 0), Position::new(1, 2)).unwrap();
        assert!(session.toggle_obstacle(Position::new(1, 1)));
        assert!(!session.toggle_obstacle(Position::new(0, 0)));
        session.clear_obstacles();
        assert_eq!(session.grid().obstacle_count(), 0);
        session.run(&both()).unwrap();
        session.reset();
        assert_eq!(session.grid().to_string(), "S..\n..G\n");
    }

    #[test]
    fn shared_endpoint_cell_shows_start() {
        let grid = Grid::new(2, 2);
        let p = Position::new(0, 0);
        let mut session = Session::new(grid, p, p).unwrap();
        assert_eq!(session.grid().to_string(), "S.\n..\n");

        let (results, _) = session.run(&both()).unwrap();
        for r in &results {
            assert_eq!(r.outcome.path().map(Path::len), Some(1));
        }
        assert_eq!(session.grid().to_string(), "S.\n..\n");
        session.reset();
        assert_eq!(session.grid().to_string(), "S.\n..\n");
    }

    #[test]
    fn runners_follow_the_algorithm_flag() {
        let mut config = Config::default();
        config.algorithm = Algorithm::AStar;
        let runners = AlgorithmRunner::from_config(&config);
        assert_eq!(runners.len(), 1);
        assert_eq!(runners[0].engine.name(), "a_star");
        assert_eq!(runners[0].marker, Cell::HeuristicPath);
        config.algorithm = Algorithm::Both;
        assert_eq!(AlgorithmRunner::from_config(&config).len(), 2);
    }
}
