//! A* path planning over the maze grid
//!
//! Unit step cost, Manhattan heuristic, 4-connected. Cells whose center is
//! within the avoidance radius of any enemy are removed from the search
//! graph outright, so the planner may report no path even when an
//! unconstrained route exists.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::Vec2;

use super::grid::{CellIndex, Grid};

/// Neighbour expansion order
const STEPS: [CellIndex; 4] = [
    CellIndex::new(0, 1),
    CellIndex::new(1, 0),
    CellIndex::new(0, -1),
    CellIndex::new(-1, 0),
];

#[inline]
fn manhattan(a: CellIndex, b: CellIndex) -> u32 {
    let d = (a - b).abs();
    (d.x + d.y) as u32
}

/// Planner settings
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner {
    /// World-unit radius around each enemy that may not be entered
    pub avoid_radius: f32,
}

impl PathPlanner {
    pub fn new(avoid_radius: f32) -> Self {
        Self { avoid_radius }
    }

    /// Planner that avoids cells within `cells` cell-widths of an enemy
    pub fn for_grid(grid: &Grid, cells: f32) -> Self {
        Self::new(grid.cell_size() * cells)
    }

    /// Cells reachable in one step from `cell`
    fn neighbors<'a>(
        &'a self,
        grid: &'a Grid,
        cell: CellIndex,
        enemies: &'a [Vec2],
    ) -> impl Iterator<Item = CellIndex> + 'a {
        STEPS.into_iter().map(move |s| cell + s).filter(move |&next| {
            if !grid.is_interior(next) || !grid.is_open(next) {
                return false;
            }
            let center = grid.center_of(next);
            !enemies.iter().any(|e| center.distance(*e) < self.avoid_radius)
        })
    }

    /// Shortest cell path from `start` to `goal` inclusive, or empty when
    /// there is none (including `start == goal`)
    pub fn find_path(
        &self,
        grid: &Grid,
        start: CellIndex,
        goal: CellIndex,
        enemies: &[Vec2],
    ) -> Vec<CellIndex> {
        let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
            return Vec::new();
        };

        let cells = grid.width() * grid.height();
        let mut came_from: Vec<Option<usize>> = vec![None; cells];
        let mut cost: Vec<u32> = vec![u32::MAX; cells];
        cost[start_idx] = 0;

        // Min-heap on (priority, insertion order): equal priorities pop first-in first-out
        let mut frontier = BinaryHeap::new();
        let mut pushed: u64 = 0;
        frontier.push(Reverse((0u32, pushed, start_idx)));

        while let Some(Reverse((_, _, current_idx))) = frontier.pop() {
            if current_idx == goal_idx {
                break;
            }
            let current = cell_at(grid, current_idx);
            let next_cost = cost[current_idx] + 1;

            for next in self.neighbors(grid, current, enemies) {
                let Some(next_idx) = grid.index(next) else { continue };
                if next_cost < cost[next_idx] {
                    cost[next_idx] = next_cost;
                    came_from[next_idx] = Some(current_idx);
                    pushed += 1;
                    frontier.push(Reverse((next_cost + manhattan(goal, next), pushed, next_idx)));
                }
            }
        }

        // Walk predecessors back from the goal
        let mut path = vec![goal];
        let mut at = goal_idx;
        while let Some(prev) = came_from[at] {
            at = prev;
            path.push(cell_at(grid, prev));
        }
        if path.len() <= 1 {
            return Vec::new();
        }
        path.reverse();
        path
    }
}

#[inline]
fn cell_at(grid: &Grid, index: usize) -> CellIndex {
    CellIndex::new((index % grid.width()) as i32, (index / grid.width()) as i32)
}
