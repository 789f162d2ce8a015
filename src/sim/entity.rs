//! Grid-constrained entities
//!
//! Movers travel in straight lines from one cell center to the next. A mover
//! is *settled* exactly when its position equals its target; only a settled
//! mover may pick a new target.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::{CellIndex, Direction, Grid};

/// Movement core shared by the player and enemies
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    pub pos: Vec2,
    pub target: Vec2,
    pub cell: CellIndex,
    /// World units per tick
    pub speed: f32,
    pub radius: f32,
}

impl Mover {
    /// A settled mover at `pos`
    pub fn new(pos: Vec2, speed: f32, radius: f32, grid: &Grid) -> Self {
        Self {
            pos,
            target: pos,
            cell: grid.cell_of(pos),
            speed,
            radius,
        }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.pos == self.target
    }

    /// Exactly on the center of the cell it occupies
    #[inline]
    pub fn is_at_cell_center(&self, grid: &Grid) -> bool {
        self.pos == grid.center_of(self.cell)
    }

    /// Cell one step from the current cell, if it is open
    pub fn probe(&self, dir: IVec2, grid: &Grid) -> Option<CellIndex> {
        let next = self.cell + dir;
        debug_assert!(grid.contains(next), "movement probe left the grid at {}", next);
        grid.is_open(next).then_some(next)
    }

    /// Aim at the center of `cell`
    #[inline]
    pub fn aim(&mut self, cell: CellIndex, grid: &Grid) {
        self.target = grid.center_of(cell);
    }

    /// Advance toward the target by at most `speed`, snapping on arrival,
    /// then recompute the occupied cell
    pub fn advance(&mut self, grid: &Grid) {
        if !self.is_settled() {
            let delta = self.target - self.pos;
            let distance = delta.length();
            if distance <= self.speed {
                self.pos = self.target;
            } else {
                self.pos += delta / distance * self.speed;
            }
        }
        self.cell = grid.cell_of(self.pos);
    }
}

/// Trail sample for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Game clock seconds when recorded
    pub time: f32,
}

/// The player-controlled entity
#[derive(Debug, Clone)]
pub struct Player {
    pub mover: Mover,
    /// Direction of the last accepted move
    pub heading: IVec2,
    /// Recent positions, oldest first
    pub trail: VecDeque<TrailPoint>,
    /// Current trail length limit (grows during a level)
    pub trail_length: f32,
    /// Suppresses repeated wall-bump feedback until a move succeeds
    pub last_wall_hit: bool,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32, radius: f32, trail_length: f32, grid: &Grid) -> Self {
        Self {
            mover: Mover::new(pos, speed, radius, grid),
            heading: IVec2::ZERO,
            trail: VecDeque::new(),
            trail_length,
            last_wall_hit: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.mover.pos
    }

    /// Apply a latched direction request before movement.
    ///
    /// An open request becomes the new desired direction; when already at a
    /// cell center the target is set right away. A blocked request keeps the
    /// old direction and reports a wall bump if that is blocked as well.
    /// Returns `true` when a wall-hit event should fire.
    pub fn request(&mut self, dir: Direction, desired: &mut IVec2, grid: &Grid) -> bool {
        if self.mover.probe(dir.offset(), grid).is_some() {
            *desired = dir.offset();
            self.last_wall_hit = false;
            if self.mover.is_at_cell_center(grid) {
                let next = self.mover.cell + *desired;
                self.mover.aim(next, grid);
            }
            false
        } else if self.mover.probe(*desired, grid).is_none() && !self.last_wall_hit {
            self.last_wall_hit = true;
            true
        } else {
            false
        }
    }

    /// One movement tick toward `desired`, with carry-through in the last
    /// heading when the desired cell is walled. Returns `true` when a
    /// wall-hit event should fire.
    pub fn step(&mut self, desired: IVec2, grid: &Grid, now: f32) -> bool {
        let mut bumped = false;

        if self.mover.is_settled() {
            if let Some(next) = self.mover.probe(desired, grid) {
                self.heading = desired;
                self.mover.aim(next, grid);
                self.last_wall_hit = false;
            } else if self.heading != IVec2::ZERO {
                if let Some(next) = self.mover.probe(self.heading, grid) {
                    self.mover.aim(next, grid);
                } else if !self.last_wall_hit {
                    self.last_wall_hit = true;
                    bumped = true;
                }
            }
        }

        if !self.mover.is_settled() {
            self.trail.push_back(TrailPoint {
                pos: self.mover.pos,
                time: now,
            });
            while self.trail.len() as f32 > self.trail_length {
                self.trail.pop_front();
            }
        }

        self.mover.advance(grid);
        bumped
    }
}

/// A wandering enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub mover: Mover,
    pub heading: IVec2,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32, radius: f32, grid: &Grid) -> Self {
        Self {
            mover: Mover::new(pos, speed, radius, grid),
            heading: IVec2::X,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.mover.pos
    }

    /// One wander tick.
    ///
    /// On wall contact a new heading is drawn from all four directions with
    /// no feasibility check, so a blocked draw leaves the enemy stalled until
    /// a later tick draws an open one.
    pub fn step<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        if self.mover.is_settled() {
            match self.mover.probe(self.heading, grid) {
                Some(next) => self.mover.aim(next, grid),
                None => {
                    if let Some(dir) = Direction::ALL.choose(rng) {
                        self.heading = dir.offset();
                    }
                }
            }
        }
        self.mover.advance(grid);
    }
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Restores one life up to the cap
    Heart,
    /// Grants time-boxed full visibility
    LightOrb,
}

/// A static collectible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
}
