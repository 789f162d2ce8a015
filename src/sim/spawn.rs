//! Spawn placement for enemies, hearts and light orbs

use glam::Vec2;
use rand::Rng;

use super::grid::{CellIndex, Grid};
use super::reach::Reachable;
use crate::consts::SPAWN_CLEARANCE;

/// A reachable cell eligible to host a spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCandidate {
    pub cell: CellIndex,
    /// Exact cell center (enemies and orbs)
    pub center: Vec2,
    /// Center shifted down by half a cell (hearts)
    pub heart_anchor: Vec2,
}

/// How many of each kind to place
#[derive(Debug, Clone, Copy)]
pub struct SpawnCounts {
    pub enemies: usize,
    pub hearts: usize,
    /// Probability of placing a single light orb from what is left
    pub orb_chance: f64,
}

/// Chosen placements, disjoint by cell
#[derive(Debug, Clone, Default)]
pub struct SpawnPlan {
    pub enemies: Vec<SpawnCandidate>,
    pub hearts: Vec<SpawnCandidate>,
    pub orb: Option<SpawnCandidate>,
}

#[inline]
fn chebyshev(a: CellIndex, b: CellIndex) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// Build the candidate pool: reachable cells more than `SPAWN_CLEARANCE`
/// cells (Chebyshev) away from both start and goal
pub fn candidates(
    grid: &Grid,
    reachable: &Reachable,
    start: CellIndex,
    goal: CellIndex,
) -> Vec<SpawnCandidate> {
    let size = grid.cell_size();
    reachable
        .cells()
        .iter()
        .filter(|&&cell| {
            chebyshev(cell, start) > SPAWN_CLEARANCE && chebyshev(cell, goal) > SPAWN_CLEARANCE
        })
        .map(|&cell| {
            let origin = grid.origin_of(cell);
            SpawnCandidate {
                cell,
                center: grid.center_of(cell),
                heart_anchor: origin + Vec2::new(size / 2.0, size),
            }
        })
        .collect()
}

/// Draw one candidate uniformly and remove it from the pool
fn take<R: Rng + ?Sized>(pool: &mut Vec<SpawnCandidate>, rng: &mut R) -> Option<SpawnCandidate> {
    if pool.is_empty() {
        return None;
    }
    let i = rng.random_range(0..pool.len());
    Some(pool.swap_remove(i))
}

/// Sample enemies, then hearts, then maybe one orb, without replacement
pub fn plan<R: Rng + ?Sized>(
    mut pool: Vec<SpawnCandidate>,
    counts: SpawnCounts,
    rng: &mut R,
) -> SpawnPlan {
    let mut plan = SpawnPlan::default();

    for _ in 0..counts.enemies {
        let Some(c) = take(&mut pool, rng) else { break };
        plan.enemies.push(c);
    }
    for _ in 0..counts.hearts {
        let Some(c) = take(&mut pool, rng) else { break };
        plan.hearts.push(c);
    }
    if !pool.is_empty() && rng.random_bool(counts.orb_chance) {
        plan.orb = take(&mut pool, rng);
    }

    log::debug!(
        "Spawn plan: {} enemies, {} hearts, orb={} ({} candidates left)",
        plan.enemies.len(),
        plan.hearts.len(),
        plan.orb.is_some(),
        pool.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::MazeGenerator;
    use crate::sim::reach::reachable;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn open_pool(width: usize, height: usize) -> (Grid, Vec<SpawnCandidate>) {
        let grid = Grid::bordered(width, height, 20.0);
        let reach = reachable(&grid, grid.start());
        let pool = candidates(&grid, &reach, grid.start(), grid.goal());
        (grid, pool)
    }

    #[test]
    fn test_candidate_clearance_and_anchors() {
        let (grid, pool) = open_pool(15, 15);
        assert!(!pool.is_empty());
        for c in &pool {
            assert!(chebyshev(c.cell, grid.start()) > 3);
            assert!(chebyshev(c.cell, grid.goal()) > 3);
            assert_eq!(c.center, grid.center_of(c.cell));
            assert_eq!(c.heart_anchor, c.center + Vec2::new(0.0, 10.0));
        }
        assert!(pool.iter().any(|c| c.cell == IVec2::new(5, 1)));
        assert!(!pool.iter().any(|c| c.cell == IVec2::new(4, 4)));
    }

    #[test]
    fn test_small_grid_has_no_candidates() {
        let (_, pool) = open_pool(6, 6);
        assert!(pool.is_empty());
        let plan = plan(
            pool,
            SpawnCounts {
                enemies: 3,
                hearts: 3,
                orb_chance: 1.0,
            },
            &mut Pcg32::seed_from_u64(1),
        );
        assert!(plan.enemies.is_empty() && plan.hearts.is_empty() && plan.orb.is_none());
    }

    #[test]
    fn test_placements_are_disjoint() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            let grid = MazeGenerator::new(40, 37, 20.0).generate(&mut rng);
            let reach = reachable(&grid, grid.start());
            let pool = candidates(&grid, &reach, grid.start(), grid.goal());
            let plan = plan(
                pool,
                SpawnCounts {
                    enemies: 10,
                    hearts: 5,
                    orb_chance: 1.0,
                },
                &mut rng,
            );
            assert_eq!(plan.enemies.len(), 10);
            assert_eq!(plan.hearts.len(), 5);
            let orb = plan.orb.expect("orb chance is 1.0");

            let mut seen = HashSet::new();
            for c in plan.enemies.iter().chain(&plan.hearts).chain(std::iter::once(&orb)) {
                assert!(seen.insert(c.cell), "cell {} placed twice", c.cell);
                assert!(reach.contains(c.cell));
            }
        }
    }

    #[test]
    fn test_pool_exhaustion() {
        let (_, pool) = open_pool(11, 9);
        let total = pool.len();
        let plan = plan(
            pool,
            SpawnCounts {
                enemies: total - 1,
                hearts: 5,
                orb_chance: 1.0,
            },
            &mut Pcg32::seed_from_u64(3),
        );
        assert_eq!(plan.enemies.len(), total - 1);
        assert_eq!(plan.hearts.len(), 1);
        assert!(plan.orb.is_none());
    }

    #[test]
    fn test_zero_orb_chance() {
        let (_, pool) = open_pool(15, 15);
        let plan = plan(
            pool,
            SpawnCounts {
                enemies: 1,
                hearts: 1,
                orb_chance: 0.0,
            },
            &mut Pcg32::seed_from_u64(9),
        );
        assert!(plan.orb.is_none());
    }
}
