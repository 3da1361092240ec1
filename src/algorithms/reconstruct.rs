//! Turns finished search state into a start-to-goal [`Path`].

use crate::algorithms::common::Path;
use crate::algorithms::distance::DistanceField;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;

/// Back-pointers recorded during relaxation: cell -> cell it was reached from.
pub type PredecessorMap = FxHashMap<Position, Position>;

/// How a finished search turns its state into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconstruction {
    /// Follow recorded back-pointers from the goal.
    #[default]
    Predecessors,
    /// Walk from the goal to a strictly closer neighbor until the start.
    DistanceDescent,
}

/// Backtracks from `goal` through `predecessors`.
///
/// `goal` must have been reached. A broken chain is a search defect: it
/// trips an assertion in debug builds and yields `None` otherwise.
pub fn from_predecessors(
    predecessors: &PredecessorMap,
    start: Position,
    goal: Position,
) -> Option<Path> {
    let mut cells = vec![goal];
    let mut current = goal;

    while current != start {
        let Some(&prev) = predecessors.get(&current) else {
            debug_assert!(false, "no predecessor recorded for {current}");
            return None;
        };
        cells.push(prev);
        current = prev;

        if cells.len() > predecessors.len() + 1 {
            debug_assert!(false, "predecessor chain from {goal} does not reach {start}");
            return None;
        }
    }

    cells.reverse();
    Path::new(cells)
}

/// Steepest-descent walk over a finished distance field.
///
/// Every step must land on a neighbor with a strictly smaller distance, so
/// the walk is bounded by the goal's distance. If no such neighbor exists
/// the walk stops and returns `None` instead of spinning.
pub fn descend_distance_field(
    grid: &Grid,
    distances: &DistanceField,
    start: Position,
    goal: Position,
) -> Option<Path> {
    let mut current_dist = distances.get(goal)?;
    let mut cells = vec![goal];
    let mut current = goal;

    while current != start {
        let mut best: Option<(Position, usize)> = None;
        for n in grid.neighbors4(&current) {
            if let Some(d) = distances.get(n) {
                if d < current_dist && best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((n, d));
                }
            }
        }

        let Some((next, d)) = best else {
            debug_assert!(false, "descent from {goal} stuck at {current}");
            return None;
        };
        cells.push(next);
        current = next;
        current_dist = d;
    }

    cells.reverse();
    Path::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtracks_and_reverses() {
        let mut preds = PredecessorMap::default();
        preds.insert(Position::new(0, 1), Position::new(0, 0));
        preds.insert(Position::new(1, 1), Position::new(0, 1));
        let path = from_predecessors(&preds, Position::new(0, 0), Position::new(1, 1)).unwrap();
        assert_eq!(
            path.as_slice(),
            &[Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn start_equal_goal_needs_no_predecessors() {
        let preds = PredecessorMap::default();
        let p = Position::new(3, 3);
        let path = from_predecessors(&preds, p, p).unwrap();
        assert_eq!(path.as_slice(), &[p]);
    }

    #[test]
    fn descent_follows_decreasing_distances() {
        let grid = Grid::new(2, 3);
        let mut field = DistanceField::new(&grid);
        for (r, c, d) in [(0, 0, 0), (0, 1, 1), (1, 0, 1), (0, 2, 2), (1, 1, 2), (1, 2, 3)] {
            field.relax(Position::new(r, c), d);
        }
        let path = descend_distance_field(&grid, &field, Position::new(0, 0), Position::new(1, 2))
            .unwrap();
        assert_eq!(path.steps(), 3);
        assert!(path.is_contiguous());
        assert_eq!(path.start(), Position::new(0, 0));
    }

    #[test]
    fn descent_on_unreached_goal_is_none() {
        let grid = Grid::new(2, 2);
        let mut field = DistanceField::new(&grid);
        field.relax(Position::new(0, 0), 0);
        let path = descend_distance_field(&grid, &field, Position::new(0, 0), Position::new(1, 1));
        assert!(path.is_none());
    }

    // goal has a distance but none of its neighbors is closer
    fn stranded_goal() -> (Grid, DistanceField) {
        let grid = Grid::new(3, 3);
        let mut field = DistanceField::new(&grid);
        field.relax(Position::new(0, 0), 0);
        field.relax(Position::new(2, 2), 4);
        (grid, field)
    }

    fn broken_chain() -> PredecessorMap {
        let mut preds = PredecessorMap::default();
        preds.insert(Position::new(1, 1), Position::new(0, 1));
        preds
    }

    fn cyclic_chain() -> PredecessorMap {
        let mut preds = PredecessorMap::default();
        preds.insert(Position::new(1, 1), Position::new(1, 0));
        preds.insert(Position::new(1, 0), Position::new(1, 1));
        preds
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "stuck")]
    fn descent_without_improving_neighbor_panics() {
        let (grid, field) = stranded_goal();
        descend_distance_field(&grid, &field, Position::new(0, 0), Position::new(2, 2));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn descent_without_improving_neighbor_is_none() {
        let (grid, field) = stranded_goal();
        let path = descend_distance_field(&grid, &field, Position::new(0, 0), Position::new(2, 2));
        assert!(path.is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no predecessor recorded")]
    fn missing_link_panics() {
        from_predecessors(&broken_chain(), Position::new(0, 0), Position::new(1, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not reach")]
    fn cycle_that_skips_start_panics() {
        from_predecessors(&cyclic_chain(), Position::new(0, 0), Position::new(1, 1));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn broken_or_cyclic_chains_are_none() {
        let (start, goal) = (Position::new(0, 0), Position::new(1, 1));
        assert!(from_predecessors(&broken_chain(), start, goal).is_none());
        assert!(from_predecessors(&cyclic_chain(), start, goal).is_none());
    }
}
