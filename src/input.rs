//! Endpoint input from the command line.

use crate::grid::{Cell, Grid, Position};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("expected \"row,col\", got {0:?}")]
    Malformed(String),
    #[error("{0:?} is not a non-negative integer")]
    InvalidNumber(String),
    #[error("{axis} {value} is out of range, expected 0..={max}")]
    OutOfRange {
        axis: &'static str,
        value: usize,
        max: usize,
    },
}

/// Parses `"row,col"` and checks it against the grid bounds.
pub fn parse_position(text: &str, grid: &Grid) -> Result<Position, InputError> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| InputError::Malformed(text.to_string()))?;

    let row = parse_coordinate(row)?;
    let col = parse_coordinate(col)?;

    let (rows, cols) = grid.dimensions();
    check_range("row", row, rows)?;
    check_range("column", col, cols)?;
    Ok(Position { row, col })
}

fn parse_coordinate(text: &str) -> Result<usize, InputError> {
    let text = text.trim();
    text.parse::<usize>()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))
}

fn check_range(axis: &'static str, value: usize, limit: usize) -> Result<(), InputError> {
    if value < limit {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            axis,
            value,
            max: limit - 1,
        })
    }
}

/// Picks the endpoints for a run: an explicit argument wins, then a marker
/// already on the grid, then the matching corner.
pub fn resolve_endpoints(
    grid: &Grid,
    start: Option<&str>,
    goal: Option<&str>,
) -> Result<(Position, Position), InputError> {
    let (rows, cols) = grid.dimensions();
    let start = match start {
        Some(text) => parse_position(text, grid)?,
        None => grid.find(Cell::Start).unwrap_or(Position::new(0, 0)),
    };
    let goal = match goal {
        Some(text) => parse_position(text, grid)?,
        None => grid
            .find(Cell::Goal)
            .unwrap_or(Position::new(rows - 1, cols - 1)),
    };
    Ok((start, goal))
}
