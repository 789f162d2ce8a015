//! Procedural maze generation
//!
//! Randomized depth-first carving over the odd-coordinate sublattice gives a
//! perfect maze; the goal corner is then forced open and a handful of short
//! extra openings add loops so there is more than one way through.

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::{CellIndex, Grid};
use crate::consts::MIN_GRID_DIMENSION;

/// Carving steps: two cells at a time so the wall between is cleared too
const CARVE_STEPS: [IVec2; 4] = [
    IVec2::new(0, 2),
    IVec2::new(2, 0),
    IVec2::new(0, -2),
    IVec2::new(-2, 0),
];

/// Maze generator for a fixed grid size
#[derive(Debug, Clone, Copy)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
    cell_size: f32,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width: width.max(MIN_GRID_DIMENSION),
            height: height.max(MIN_GRID_DIMENSION),
            cell_size,
        }
    }

    /// Generate a connected maze. Always succeeds.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::filled(self.width, self.height, self.cell_size);

        self.carve(&mut grid, rng);

        // Force the goal and both approach cells open
        let goal = grid.goal();
        grid.open(goal);
        grid.open(goal - IVec2::X);
        grid.open(goal - IVec2::Y);

        self.add_random_openings(&mut grid, rng);

        debug_assert!(
            super::reach::reachable(&grid, grid.start()).contains(goal),
            "generated maze does not connect start to goal"
        );
        grid
    }

    /// Randomized depth-first carving from the start cell
    fn carve<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let start = grid.start();
        grid.open(start);
        let mut stack: Vec<CellIndex> = vec![start];
        let mut neighbors: Vec<CellIndex> = Vec::with_capacity(4);

        while let Some(&current) = stack.last() {
            neighbors.clear();
            neighbors.extend(
                CARVE_STEPS
                    .iter()
                    .map(|&step| current + step)
                    .filter(|&next| grid.is_interior(next) && !grid.is_open(next)),
            );

            let Some(&next) = neighbors.choose(rng) else {
                stack.pop();
                continue;
            };

            let between = current + (next - current) / 2;
            grid.open(between);
            grid.open(next);
            stack.push(next);
        }
    }

    /// Clear `(width + height) / 4` short two-cell openings away from the border
    fn add_random_openings<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let count = (self.width + self.height) / 4;
        for _ in 0..count {
            let col = rng.random_range(2..self.width - 2) as i32;
            let row = rng.random_range(2..self.height - 2) as i32;
            let cell = IVec2::new(col, row);
            let extra = if rng.random_bool(0.5) {
                cell + IVec2::X
            } else {
                cell + IVec2::Y
            };
            grid.open(cell);
            grid.open(extra);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::reach::reachable;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn check_invariants(grid: &Grid) {
        for cell in grid.cells() {
            if grid.is_border(cell) {
                assert!(!grid.is_open(cell), "border cell {} is open", cell);
            }
        }
        let goal = grid.goal();
        assert!(grid.is_open(grid.start()));
        assert!(grid.is_open(goal));
        assert!(grid.is_open(goal - IVec2::X));
        assert!(grid.is_open(goal - IVec2::Y));

        // Every open cell belongs to the start's component
        let reach = reachable(grid, grid.start());
        assert!(reach.contains(goal));
        let open = grid.cells().filter(|&c| grid.is_open(c)).count();
        assert_eq!(reach.len(), open);
    }

    #[test]
    fn test_default_size_maze() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let grid = MazeGenerator::new(40, 37, 20.0).generate(&mut rng);
        assert_eq!(grid.width(), 40);
        assert_eq!(grid.height(), 37);
        check_invariants(&grid);
    }

    #[test]
    fn test_determinism() {
        let generator = MazeGenerator::new(21, 15, 20.0);
        let a = generator.generate(&mut Pcg32::seed_from_u64(7));
        let b = generator.generate(&mut Pcg32::seed_from_u64(7));
        let c = generator.generate(&mut Pcg32::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_minimum_size() {
        let generator = MazeGenerator::new(1, 2, 20.0);
        let grid = generator.generate(&mut Pcg32::seed_from_u64(1));
        assert_eq!(grid.width(), MIN_GRID_DIMENSION);
        assert_eq!(grid.height(), MIN_GRID_DIMENSION);
        check_invariants(&grid);
    }

    proptest! {
        #[test]
        fn prop_generated_mazes_hold_invariants(
            seed in any::<u64>(),
            width in 5usize..48,
            height in 5usize..48,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = MazeGenerator::new(width, height, 20.0).generate(&mut rng);
            check_invariants(&grid);
        }
    }
}
