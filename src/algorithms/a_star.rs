use crate::algorithms::common::{
    manhattan, validate_endpoints, SearchError, SearchOutcome, SearchReport, ShortestPath,
};
use crate::algorithms::distance::{DistanceField, VisitedSet};
use crate::algorithms::frontier::Frontier;
use crate::algorithms::reconstruct::{self, PredecessorMap, Reconstruction};
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use tracing::{debug, trace};

/// Heuristic search ordered by distance so far plus the Manhattan estimate
/// to the goal.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar {
    reconstruction: Reconstruction,
}

impl AStar {
    /// Creates an A* engine that rebuilds paths from predecessors.
    pub fn new() -> Self {
        AStar::default()
    }

    /// Selects how the finished search is turned into a path.
    pub fn with_reconstruction(reconstruction: Reconstruction) -> Self {
        AStar { reconstruction }
    }
}

impl ShortestPath for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    /// Finds a shortest path from start to goal.
    ///
    /// # Arguments
    ///
    /// * `grid` - Read-only view of the cells; only obstacles are avoided.
    /// * `start` - The starting cell.
    /// * `goal` - The target cell.
    ///
    /// # Returns
    ///
    /// A report whose outcome is either the path or `Unreachable`, or an
    /// error if an endpoint is outside the grid or sits on an obstacle.
    fn search(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<SearchReport, SearchError> {
        validate_endpoints(grid, start, goal)?;

        let mut distances = DistanceField::new(grid);
        let mut visited = VisitedSet::new(grid);
        let mut predecessors = PredecessorMap::default();
        let mut frontier = Frontier::new();
        let mut stats = SearchStats::default();

        distances.relax(start, 0);
        frontier.push(start, manhattan(start, goal));

        let mut reached_goal = false;
        while let Some((current, f)) = frontier.pop() {
            if !visited.insert(current) {
                stats.stale_pops += 1;
                continue;
            }
            stats.expanded += 1;

            let Some(dist) = distances.get(current) else {
                debug_assert!(false, "popped {current} without a distance");
                continue;
            };
            trace!(%current, dist, f, "expand");

            if current == goal {
                reached_goal = true;
                break;
            }

            for neighbor in grid.neighbors4(&current) {
                if grid.is_blocked(neighbor) || visited.contains(neighbor) {
                    continue;
                }
                let candidate = dist + 1;
                if distances.relax(neighbor, candidate) {
                    predecessors.insert(neighbor, current);
                    frontier.push(neighbor, candidate + manhattan(neighbor, goal));
                }
            }
        }

        stats.pushes = frontier.pushes();
        stats.reached = distances.reached();

        let path = if reached_goal {
            match self.reconstruction {
                Reconstruction::Predecessors => {
                    reconstruct::from_predecessors(&predecessors, start, goal)
                }
                Reconstruction::DistanceDescent => {
                    reconstruct::descend_distance_field(grid, &distances, start, goal)
                }
            }
        } else {
            None
        };
        let outcome = match path {
            Some(path) => SearchOutcome::Found(path),
            None => SearchOutcome::Unreachable,
        };
        stats.path_len = outcome.path().map(|p| p.len());

        debug!(
            algorithm = self.name(),
            reconstruction = ?self.reconstruction,
            %start,
            %goal,
            found = outcome.is_found(),
            expanded = stats.expanded,
            stale = stats.stale_pops,
            "search finished"
        );

        Ok(SearchReport { outcome, stats })
    }
}
