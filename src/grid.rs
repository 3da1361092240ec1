use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side length of the editor grid the front end builds by default.
pub const DEFAULT_GRID_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Start,
    Goal,
    Obstacle,
    /// Cell revealed as part of the uniform-cost path.
    UniformCostPath,
    /// Cell revealed as part of the heuristic path.
    HeuristicPath,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Start => 'S',
            Cell::Goal => 'G',
            Cell::Obstacle => '#',
            Cell::UniformCostPath => 'd',
            Cell::HeuristicPath => 'a',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'S' => Some(Cell::Start),
            'G' => Some(Cell::Goal),
            '#' => Some(Cell::Obstacle),
            'd' => Some(Cell::UniformCostPath),
            'a' => Some(Cell::HeuristicPath),
            _ => None,
        }
    }

    pub fn is_path_marker(self) -> bool {
        matches!(self, Cell::UniformCostPath | Cell::HeuristicPath)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {col}: unknown cell symbol {symbol:?}")]
    UnknownSymbol { line: usize, col: usize, symbol: char },
}

/// Fixed-size map of cell states. Rows and columns never change after
/// construction; only cell contents can be edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds an empty grid. Panics on a zero dimension; use [`Grid::try_new`]
    /// for untrusted sizes.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Self::try_new(rows, cols) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        })
    }

    /// Scatters up to `num_obstacles` obstacles at random, never on a cell
    /// listed in `keep_clear`. The request is capped at the number of cells
    /// left free.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        num_obstacles: usize,
        keep_clear: &[Position],
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::try_new(rows, cols)?;

        let kept = grid.positions().filter(|p| keep_clear.contains(p)).count();
        let target = num_obstacles.min(grid.len() - kept);
        let mut placed = 0;
        let mut attempts = 0usize;
        while placed < target && attempts < target.saturating_mul(3) {
            let pos = Position {
                row: rng.gen_range(0..rows),
                col: rng.gen_range(0..cols),
            };

            if !keep_clear.contains(&pos) && grid.cells[pos.row][pos.col] == Cell::Empty {
                grid.cells[pos.row][pos.col] = Cell::Obstacle;
                placed += 1;
            }
            attempts += 1;
        }

        Ok(grid)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Writes `cell` at `pos`. Returns false and leaves the grid untouched
    /// when `pos` is out of bounds.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> bool {
        match self.cells.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// True for obstacles and for anything outside the grid.
    pub fn is_blocked(&self, pos: Position) -> bool {
        !matches!(self.cell(pos), Some(c) if c != Cell::Obstacle)
    }

    /// In-bounds 4-neighbors in a fixed order: up, down, left, right.
    pub fn neighbors4(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        let (row, col) = (pos.row as isize, pos.col as isize);

        for (dr, dc) in &[(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let nr = row + dr;
            let nc = col + dc;

            if nr >= 0 && nr < self.rows as isize && nc >= 0 && nc < self.cols as isize {
                neighbors.push(Position {
                    row: nr as usize,
                    col: nc as usize,
                });
            }
        }
        neighbors
    }

    /// Flips a cell between Empty and Obstacle. Start, Goal and path markers
    /// are left alone; returns whether anything changed.
    pub fn toggle_obstacle(&mut self, pos: Position) -> bool {
        match self.cell(pos) {
            Some(Cell::Empty) => self.set_cell(pos, Cell::Obstacle),
            Some(Cell::Obstacle) => self.set_cell(pos, Cell::Empty),
            _ => false,
        }
    }

    pub fn clear_obstacles(&mut self) {
        self.replace_where(|c| c == Cell::Obstacle);
    }

    pub fn clear_path_markers(&mut self) {
        self.replace_where(Cell::is_path_marker);
    }

    pub fn reset(&mut self) {
        self.replace_where(|_| true);
    }

    fn replace_where(&mut self, pred: impl Fn(Cell) -> bool) {
        for cell in self.cells.iter_mut().flatten() {
            if pred(*cell) {
                *cell = Cell::Empty;
            }
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Obstacle)
            .count()
    }

    /// First cell holding `cell`, scanning row-major.
    pub fn find(&self, cell: Cell) -> Option<Position> {
        self.positions().find(|p| self.cells[p.row][p.col] == cell)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses one line per row using the symbols of [`Cell::symbol`].
    /// Blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();

        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(col, symbol)| {
                    Cell::from_symbol(symbol).ok_or(GridError::UnknownSymbol {
                        line: line_no + 1,
                        col: col + 1,
                        symbol,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = cells.first() {
                if first.len() != row.len() {
                    return Err(GridError::RaggedRow {
                        line: line_no + 1,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            cells.push(row);
        }

        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        Ok(Grid { rows, cols, cells })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn neighbors_are_clipped_at_the_border() {
        let grid = Grid::new(3, 3);
        assert_eq!(
            grid.neighbors4(&Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(grid.neighbors4(&Position::new(1, 1)).len(), 4);
        assert_eq!(
            grid.neighbors4(&Position::new(2, 2)),
            vec![Position::new(1, 2), Position::new(2, 1)]
        );
    }

    #[test]
    fn out_of_bounds_counts_as_blocked() {
        let mut grid = Grid::new(2, 2);
        assert!(!grid.is_blocked(Position::new(1, 1)));
        assert!(grid.is_blocked(Position::new(2, 0)));
        assert!(grid.is_blocked(Position::new(0, 5)));
        assert!(!grid.set_cell(Position::new(9, 9), Cell::Obstacle));

        grid.set_cell(Position::new(0, 1), Cell::Obstacle);
        assert!(grid.is_blocked(Position::new(0, 1)));
        // markers never block
        grid.set_cell(Position::new(1, 0), Cell::HeuristicPath);
        assert!(!grid.is_blocked(Position::new(1, 0)));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert_eq!(
            Grid::try_new(0, 4),
            Err(GridError::EmptyDimensions { rows: 0, cols: 4 })
        );
        assert!("\n\n".parse::<Grid>().is_err());
    }

    #[test]
    fn parse_and_render_agree() {
        let text = "S.#\n.#.\n..G\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.find(Cell::Start), Some(Position::new(0, 0)));
        assert_eq!(grid.find(Cell::Goal), Some(Position::new(2, 2)));
        assert_eq!(grid.obstacle_count(), 2);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_reports_bad_input() {
        assert_eq!(
            "..\n...".parse::<Grid>(),
            Err(GridError::RaggedRow { line: 2, expected: 2, found: 3 })
        );
        assert_eq!(
            "..x".parse::<Grid>(),
            Err(GridError::UnknownSymbol { line: 1, col: 3, symbol: 'x' })
        );
    }

    #[test]
    fn editing_operations() {
        let mut grid = Grid::new(2, 3);
        let p = Position::new(0, 2);
        assert!(grid.toggle_obstacle(p));
        assert_eq!(grid.cell(p), Some(Cell::Obstacle));
        assert!(grid.toggle_obstacle(p));
        assert_eq!(grid.cell(p), Some(Cell::Empty));

        grid.set_cell(Position::new(0, 0), Cell::Start);
        assert!(!grid.toggle_obstacle(Position::new(0, 0)));

        grid.set_cell(Position::new(1, 0), Cell::Obstacle);
        grid.set_cell(Position::new(1, 1), Cell::UniformCostPath);
        grid.clear_path_markers();
        assert_eq!(grid.cell(Position::new(1, 1)), Some(Cell::Empty));
        assert_eq!(grid.obstacle_count(), 1);
        grid.clear_obstacles();
        assert_eq!(grid.obstacle_count(), 0);
        assert_eq!(grid.cell(Position::new(0, 0)), Some(Cell::Start));
        grid.reset();
        assert_eq!(grid, Grid::new(2, 3));
    }

    #[test]
    fn random_layout_is_seeded_and_keeps_endpoints_clear() {
        let keep = [Position::new(0, 0), Position::new(9, 9)];
        let a = Grid::random(10, 10, 40, &keep, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Grid::random(10, 10, 40, &keep, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(a.obstacle_count() <= 40);
        assert!(a.obstacle_count() > 0);
        for p in keep {
            assert_eq!(a.cell(p), Some(Cell::Empty));
        }
    }

    #[test]
    fn oversized_obstacle_request_is_capped() {
        let keep = [Position::new(0, 0), Position::new(2, 2)];
        let grid = Grid::random(3, 3, usize::MAX, &keep, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(grid.obstacle_count() > 0);
        assert!(grid.obstacle_count() <= 7);
        for p in keep {
            assert_eq!(grid.cell(p), Some(Cell::Empty));
        }
    }
}
