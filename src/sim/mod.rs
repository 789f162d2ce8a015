//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid scan order, spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod grid;
pub mod maze;
pub mod path;
pub mod reach;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod visibility;

pub use collision::{Circle, collides, collides_any, overlapping};
pub use entity::{Enemy, Mover, Pickup, PickupKind, Player, TrailPoint};
pub use grid::{CellIndex, Direction, Grid, Tile};
pub use maze::MazeGenerator;
pub use path::PathPlanner;
pub use reach::{Reachable, reachable};
pub use spawn::{SpawnCandidate, SpawnCounts, SpawnPlan};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use visibility::{Light, Lit, Scene, Stats, visibility, wall_visible};
