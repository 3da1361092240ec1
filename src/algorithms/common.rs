use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use std::fmt;
use thiserror::Error;

/// Which end of a query a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Rejections raised before any search work is done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{which} {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: Endpoint,
        position: Position,
        rows: usize,
        cols: usize,
    },
    #[error("{which} {position} is an obstacle")]
    BlockedEndpoint { which: Endpoint, position: Position },
}

/// Ordered start-to-goal cell sequence. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Position>);

impl Path {
    /// Wraps a cell sequence; `None` if it is empty.
    pub fn new(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Path(cells))
        }
    }

    pub fn start(&self) -> Position {
        self.0[0]
    }

    pub fn goal(&self) -> Position {
        self.0[self.0.len() - 1]
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of unit moves.
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.0
    }

    /// Every consecutive pair differs by one axis-aligned unit step.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(&w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    /// The frontier ran dry without reaching the goal.
    Unreachable,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Unreachable => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Outcome of one search together with its work counters.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Common seam for the grid search engines.
pub trait ShortestPath {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Runs one search over a read-only grid. Working state is allocated per
    /// call, so one engine value can serve any number of queries.
    fn search(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<SearchReport, SearchError>;
}

/// Checks both endpoints against the grid before any work is done.
pub fn validate_endpoints(grid: &Grid, start: Position, goal: Position) -> Result<(), SearchError> {
    let (rows, cols) = grid.dimensions();
    for (which, position) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
        if !grid.contains(position) {
            return Err(SearchError::OutOfBounds {
                which,
                position,
                rows,
                cols,
            });
        }
        if grid.is_blocked(position) {
            return Err(SearchError::BlockedEndpoint { which, position });
        }
    }
    Ok(())
}

/// Manhattan distance; admissible and consistent for unit-cost 4-way moves.
pub fn manhattan(from: Position, to: Position) -> usize {
    from.manhattan(&to)
}
