//! Flood-fill reachability from the start cell

use std::collections::VecDeque;

use super::grid::{CellIndex, Direction, Grid};

/// Set of cells connected to a seed cell
///
/// Membership is a dense table keyed by `row * width + col`; `cells` keeps
/// breadth-first discovery order for stable iteration.
#[derive(Debug, Clone)]
pub struct Reachable {
    width: usize,
    member: Vec<bool>,
    cells: Vec<CellIndex>,
}

impl Reachable {
    #[inline]
    pub fn contains(&self, cell: CellIndex) -> bool {
        if cell.x < 0 || cell.y < 0 || cell.x as usize >= self.width {
            return false;
        }
        self.member
            .get(cell.y as usize * self.width + cell.x as usize)
            .copied()
            .unwrap_or(false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in discovery order
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }
}

/// Breadth-first flood fill over open, non-border cells (4-connected)
///
/// Returns an empty set when `start` itself is a wall or on the border.
pub fn reachable(grid: &Grid, start: CellIndex) -> Reachable {
    let mut set = Reachable {
        width: grid.width(),
        member: vec![false; grid.width() * grid.height()],
        cells: Vec::new(),
    };

    let passable = |cell: CellIndex| grid.is_interior(cell) && grid.is_open(cell);
    if !passable(start) {
        return set;
    }

    let mut queue = VecDeque::new();
    mark(grid, &mut set, start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = cell + dir.offset();
            if passable(next) && !set.contains(next) {
                mark(grid, &mut set, next);
                queue.push_back(next);
            }
        }
    }

    set
}

fn mark(grid: &Grid, set: &mut Reachable, cell: CellIndex) {
    if let Some(i) = grid.index(cell) {
        set.member[i] = true;
        set.cells.push(cell);
    }
}
