use crate::grid::{Grid, Position};

const UNREACHED: usize = usize::MAX;

/// Best known cost from the start for every cell of one grid.
/// Values only ever decrease.
#[derive(Debug, Clone)]
pub struct DistanceField {
    cols: usize,
    values: Vec<usize>,
}

impl DistanceField {
    pub fn new(grid: &Grid) -> Self {
        DistanceField {
            cols: grid.cols(),
            values: vec![UNREACHED; grid.len()],
        }
    }

    fn idx(&self, pos: Position) -> Option<usize> {
        if pos.col >= self.cols {
            return None;
        }
        let i = pos.row * self.cols + pos.col;
        (i < self.values.len()).then_some(i)
    }

    /// `None` for cells never reached (or outside the grid).
    pub fn get(&self, pos: Position) -> Option<usize> {
        self.idx(pos)
            .map(|i| self.values[i])
            .filter(|&d| d != UNREACHED)
    }

    /// Lowers the recorded distance to `candidate` if that is an improvement.
    pub fn relax(&mut self, pos: Position, candidate: usize) -> bool {
        match self.idx(pos) {
            Some(i) if candidate < self.values[i] => {
                self.values[i] = candidate;
                true
            }
            _ => false,
        }
    }

    pub fn reached(&self) -> usize {
        self.values.iter().filter(|&&d| d != UNREACHED).count()
    }
}

/// Cells whose distance is final. A cell never leaves the set.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    cols: usize,
    flags: Vec<bool>,
}

impl VisitedSet {
    pub fn new(grid: &Grid) -> Self {
        VisitedSet {
            cols: grid.cols(),
            flags: vec![false; grid.len()],
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col < self.cols
            && self
                .flags
                .get(pos.row * self.cols + pos.col)
                .copied()
                .unwrap_or(false)
    }

    /// Marks `pos`; returns false if it was already marked.
    pub fn insert(&mut self, pos: Position) -> bool {
        if pos.col >= self.cols {
            return false;
        }
        match self.flags.get_mut(pos.row * self.cols + pos.col) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }
}
