use crate::algorithms::common::{
    validate_endpoints, SearchError, SearchOutcome, SearchReport, ShortestPath,
};
use crate::algorithms::distance::{DistanceField, VisitedSet};
use crate::algorithms::frontier::Frontier;
use crate::algorithms::reconstruct::{self, PredecessorMap};
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use tracing::{debug, trace};

/// Uniform-cost search: cells are finalized in non-decreasing distance order
/// and the path is rebuilt from recorded predecessors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl ShortestPath for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

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
        frontier.push(start, 0);

        let mut reached_goal = false;
        while let Some((current, dist)) = frontier.pop() {
            if !visited.insert(current) {
                stats.stale_pops += 1;
                continue;
            }
            stats.expanded += 1;
            trace!(%current, dist, "expand");

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
                    frontier.push(neighbor, candidate);
                }
            }
        }

        stats.pushes = frontier.pushes();
        stats.reached = distances.reached();

        let outcome = if reached_goal {
            match reconstruct::from_predecessors(&predecessors, start, goal) {
                Some(path) => SearchOutcome::Found(path),
                None => SearchOutcome::Unreachable,
            }
        } else {
            SearchOutcome::Unreachable
        };
        stats.path_len = outcome.path().map(|p| p.len());

        debug!(
            algorithm = self.name(),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn straight_corridor() {
        let g = grid(".....");
        let report = Dijkstra::new()
            .search(&g, Position::new(0, 0), Position::new(0, 4))
            .unwrap();
        let path = report.outcome.into_path().unwrap();
        assert_eq!(path.steps(), 4);
        assert_eq!(report.stats.path_len, Some(5));
    }

    #[test]
    fn ties_prefer_the_first_direction_explored() {
        // up, down, left, right: from (0,0) "down" is queued before "right",
        // so the path drops a row first.
        let g = Grid::new(2, 2);
        let path = Dijkstra::new()
            .search(&g, Position::new(0, 0), Position::new(1, 1))
            .unwrap()
            .outcome
            .into_path()
            .unwrap();
        assert_eq!(
            path.as_slice(),
            &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn stops_as_soon_as_goal_is_finalized() {
        let g = Grid::new(10, 10);
        let report = Dijkstra::new()
            .search(&g, Position::new(0, 0), Position::new(0, 1))
            .unwrap();
        assert!(report.stats.expanded < 10);
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let g = grid("..#..\n..#..\n..#..");
        let report = Dijkstra::new()
            .search(&g, Position::new(0, 0), Position::new(0, 4))
            .unwrap();
        assert_eq!(report.outcome, SearchOutcome::Unreachable);
        assert_eq!(report.stats.expanded, 6);
        assert_eq!(report.stats.path_len, None);
    }

    #[test]
    fn rejects_bad_endpoints() {
        let g = grid(".#");
        assert!(matches!(
            Dijkstra::new().search(&g, Position::new(0, 0), Position::new(0, 1)),
            Err(SearchError::BlockedEndpoint { .. })
        ));
        assert!(matches!(
            Dijkstra::new().search(&g, Position::new(1, 0), Position::new(0, 0)),
            Err(SearchError::OutOfBounds { .. })
        ));
    }
}
