//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a level can be
//! rebalanced from a JSON file without recompiling. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{StorageError, load_json};

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    pub cell_size: f32,
    pub grid_width: usize,
    pub grid_height: usize,

    // === Entities ===
    pub player_size: f32,
    /// World units per tick
    pub player_speed: f32,
    pub enemy_size: f32,
    /// World units per tick
    pub enemy_speed: f32,
    pub light_radius: f32,

    // === Spawning ===
    pub max_enemies: u32,
    pub max_lives: u32,
    pub starting_lives: u32,
    pub light_orb_spawn_chance: f64,

    // === Timed effects (seconds) ===
    pub invincibility_time: f32,
    pub light_orb_duration: f32,

    // === Trail ===
    pub base_trail_length: f32,
    pub trail_length_increase: f32,
    pub initial_trail_length: f32,
    pub trail_growth_rate: f32,
    pub max_trail_length: f32,

    // === Bot ===
    /// Enemy avoidance radius for path planning, in cells
    pub enemy_avoid_cells: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            light_radius: LIGHT_RADIUS,

            max_enemies: MAX_ENEMIES,
            max_lives: MAX_LIVES,
            starting_lives: STARTING_LIVES,
            light_orb_spawn_chance: LIGHT_ORB_SPAWN_CHANCE,

            invincibility_time: INVINCIBILITY_TIME,
            light_orb_duration: LIGHT_ORB_DURATION,

            base_trail_length: BASE_TRAIL_LENGTH,
            trail_length_increase: TRAIL_LENGTH_INCREASE,
            initial_trail_length: INITIAL_TRAIL_LENGTH,
            trail_growth_rate: TRAIL_GROWTH_RATE,
            max_trail_length: MAX_TRAIL_LENGTH,

            enemy_avoid_cells: ENEMY_AVOID_CELLS,
        }
    }
}

impl Tuning {
    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let dims = MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION;
        if !dims.contains(&self.grid_width) || !dims.contains(&self.grid_height) {
            log::warn!(
                "Grid {}x{} out of range, clamping to {}..={}",
                self.grid_width,
                self.grid_height,
                MIN_GRID_DIMENSION,
                MAX_GRID_DIMENSION
            );
            self.grid_width = self.grid_width.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);
            self.grid_height = self.grid_height.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            self.cell_size = CELL_SIZE;
        }

        // Movers must make progress and may not skip a cell in one tick
        self.player_speed = positive_speed(self.player_speed, PLAYER_SPEED, self.cell_size);
        self.enemy_speed = positive_speed(self.enemy_speed, ENEMY_SPEED, self.cell_size);

        self.base_trail_length = trail_bound(self.base_trail_length, BASE_TRAIL_LENGTH);
        self.trail_length_increase = trail_bound(self.trail_length_increase, TRAIL_LENGTH_INCREASE);
        self.initial_trail_length = trail_bound(self.initial_trail_length, INITIAL_TRAIL_LENGTH);
        self.trail_growth_rate = trail_bound(self.trail_growth_rate, TRAIL_GROWTH_RATE);
        self.max_trail_length = trail_bound(self.max_trail_length, MAX_TRAIL_LENGTH);

        self.light_orb_spawn_chance = if self.light_orb_spawn_chance.is_nan() {
            LIGHT_ORB_SPAWN_CHANCE
        } else {
            self.light_orb_spawn_chance.clamp(0.0, 1.0)
        };
        self.starting_lives = self.starting_lives.clamp(1, self.max_lives.max(1));
        self
    }

    /// Trail length limit at the start of a level
    pub fn level_trail_length(&self, level: u32) -> f32 {
        let grown = self.base_trail_length
            + level.saturating_sub(1) as f32 * self.trail_length_increase;
        self.initial_trail_length.max(grown.min(self.max_trail_length))
    }

    /// Trail length limit after `time_in_level` seconds
    pub fn trail_length_at(&self, time_in_level: f32) -> f32 {
        (self.initial_trail_length + time_in_level * self.trail_growth_rate)
            .min(self.max_trail_length)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let tuning: Tuning = load_json(path)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning.sanitized())
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Using default tuning ({})", e);
            Self::default()
        })
    }
}

fn positive_speed(speed: f32, default: f32, cell_size: f32) -> f32 {
    if speed.is_finite() && speed > 0.0 {
        speed.min(cell_size)
    } else {
        log::warn!("Speed {} is not usable, using {}", speed, default);
        default.min(cell_size)
    }
}

fn trail_bound(length: f32, default: f32) -> f32 {
    if length.is_nan() {
        default
    } else {
        length.clamp(0.0, TRAIL_LENGTH_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "player_speed": 4.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 4.0);
        assert_eq!(tuning.grid_width, GRID_WIDTH);
        assert_eq!(tuning.light_radius, LIGHT_RADIUS);
    }

    #[test]
    fn test_sanitize_clamps_small_grid() {
        let tuning = Tuning {
            grid_width: 2,
            grid_height: 3,
            light_orb_spawn_chance: 4.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.grid_width, MIN_GRID_DIMENSION);
        assert_eq!(tuning.grid_height, MIN_GRID_DIMENSION);
        assert_eq!(tuning.light_orb_spawn_chance, 1.0);
    }

    #[test]
    fn test_sanitize_caps_huge_grid() {
        let tuning = Tuning {
            grid_width: 1_000_000,
            grid_height: 40,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.grid_width, MAX_GRID_DIMENSION);
        assert_eq!(tuning.grid_height, 40);
    }

    #[test]
    fn test_sanitize_speeds() {
        let tuning = Tuning {
            player_speed: 0.0,
            enemy_speed: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.enemy_speed, ENEMY_SPEED);

        let tuning = Tuning {
            player_speed: -3.0,
            enemy_speed: 500.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.enemy_speed, CELL_SIZE);
    }

    #[test]
    fn test_sanitize_trail_bounds() {
        let tuning = Tuning {
            base_trail_length: f32::NAN,
            trail_length_increase: -1.0,
            initial_trail_length: 1e30,
            trail_growth_rate: f32::INFINITY,
            max_trail_length: 1e30,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.base_trail_length, BASE_TRAIL_LENGTH);
        assert_eq!(tuning.trail_length_increase, 0.0);
        assert_eq!(tuning.initial_trail_length, TRAIL_LENGTH_LIMIT);
        assert_eq!(tuning.trail_growth_rate, TRAIL_LENGTH_LIMIT);
        assert_eq!(tuning.max_trail_length, TRAIL_LENGTH_LIMIT);
    }

    #[test]
    fn test_huge_trail_from_json_starts_a_game() {
        let tuning: Tuning = serde_json::from_str(r#"{ "initial_trail_length": 1e30 }"#).unwrap();
        let state = crate::sim::GameState::new(3, tuning);
        assert_eq!(state.tuning.initial_trail_length, TRAIL_LENGTH_LIMIT);
        assert!(state.player.trail.is_empty());
    }

    #[test]
    fn test_trail_lengths() {
        let tuning = Tuning::default();
        // Base + level growth never beats the initial length with default values
        assert_eq!(tuning.level_trail_length(1), 150.0);
        assert_eq!(tuning.trail_length_at(0.0), 150.0);
        assert_eq!(tuning.trail_length_at(10.0), 155.0);
        assert_eq!(tuning.trail_length_at(1000.0), 200.0);
    }
}
