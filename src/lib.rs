//! Neon Maze - a fog-of-war maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, collisions, visibility, A*)
//! - `clock`: Fixed timestep accumulator that drives the simulation
//! - `session`: Host-facing game session (input latch, collaborators, game over flow)
//! - `audio`: Sound collaborator seam
//! - `highscores`: Leaderboard and derived score formula
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod clock;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{LogAudio, NullAudio, SoundEvent, SoundManager};
pub use clock::SimulationClock;
pub use highscores::{HighScores, ScoreSink};
pub use persistence::StorageError;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Fixed simulation timestep
    pub const SIM_STEP: Duration = Duration::from_nanos(1_000_000_000 / SIM_HZ as u64);
    /// Maximum ticks run per host frame
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest host frame the clock will account for
    pub const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

    /// Grid cell edge length (world units)
    pub const CELL_SIZE: f32 = 20.0;
    /// Playfield in cells (800x750 world units)
    pub const GRID_WIDTH: usize = 40;
    pub const GRID_HEIGHT: usize = 37;
    /// Smallest grid the generator accepts on either axis
    pub const MIN_GRID_DIMENSION: usize = 5;
    /// Largest grid a tuning file may ask for on either axis
    pub const MAX_GRID_DIMENSION: usize = 512;

    pub const PLAYER_SIZE: f32 = 20.0;
    /// World units per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const ENEMY_SIZE: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const LIGHT_RADIUS: f32 = 50.0;

    pub const MAX_ENEMIES: u32 = 10;
    pub const MAX_LIVES: u32 = 5;
    pub const STARTING_LIVES: u32 = 3;
    /// Seconds of immunity after taking damage
    pub const INVINCIBILITY_TIME: f32 = 2.0;
    /// Seconds of full visibility after collecting a light orb
    pub const LIGHT_ORB_DURATION: f32 = 5.0;
    pub const LIGHT_ORB_SPAWN_CHANCE: f64 = 0.7;

    /// Spawn candidates must be farther than this (Chebyshev, in cells) from start and goal
    pub const SPAWN_CLEARANCE: i32 = 3;
    /// Cells whose center lies within this many cells of an enemy are avoided by the planner
    pub const ENEMY_AVOID_CELLS: f32 = 2.0;

    /// Trail length (points) at the start of level 1
    pub const BASE_TRAIL_LENGTH: f32 = 100.0;
    pub const TRAIL_LENGTH_INCREASE: f32 = 2.0;
    pub const INITIAL_TRAIL_LENGTH: f32 = 150.0;
    /// Trail points added per second spent in a level
    pub const TRAIL_GROWTH_RATE: f32 = 0.5;
    pub const MAX_TRAIL_LENGTH: f32 = 200.0;
    /// Upper bound on any trail length a tuning file may set
    pub const TRAIL_LENGTH_LIMIT: f32 = 10_000.0;

    /// Longest accepted player name for the leaderboard
    pub const MAX_NAME_LENGTH: usize = 10;
}

/// Round to two decimal places (score display precision)
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
