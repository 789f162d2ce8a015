//! Game state and level lifecycle
//!
//! One `GameState` owns everything for the active level. Moving to another
//! level replaces the grid, player, enemies and pickups together.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Enemy, Pickup, PickupKind, Player};
use super::grid::Grid;
use super::maze::MazeGenerator;
use super::reach::reachable;
use super::spawn::{self, SpawnCounts};
use super::visibility::Light;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives, waiting for name entry or restart
    GameOver,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player ran into a wall (edge-triggered)
    WallHit,
    /// Player lost a life and is briefly invincible
    Damage { lives: u32 },
    /// Heart picked up; `healed` is false when already at max lives
    HeartCollected { healed: bool },
    /// Light orb picked up
    OrbCollected,
    /// Goal reached; `level` is the level just cleared
    LevelComplete { level: u32 },
    /// Last life lost
    GameOver { levels_cleared: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Simulated seconds of play this run
    pub game_time: f64,
    /// Simulated seconds in the current level
    pub level_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Game clock second until which enemy contact is ignored
    pub invincible_until: f64,
    /// Game clock second until which light power is active
    pub light_power_until: f64,
    /// Logical movement direction (unit axis vector or zero)
    pub direction: IVec2,
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub hearts: Vec<Pickup>,
    pub orbs: Vec<Pickup>,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = Self::generate_grid(&tuning, &mut rng);
        let player = Self::spawn_player(&tuning, &grid, 1);

        let mut state = Self {
            seed,
            rng,
            lives: tuning.starting_lives,
            tuning,
            phase: GamePhase::Ready,
            level: 1,
            game_time: 0.0,
            level_time: 0.0,
            time_ticks: 0,
            invincible_until: 0.0,
            light_power_until: 0.0,
            direction: IVec2::ZERO,
            grid,
            player,
            enemies: Vec::new(),
            hearts: Vec::new(),
            orbs: Vec::new(),
            events: Vec::new(),
        };
        state.populate();
        state
    }

    fn generate_grid(tuning: &Tuning, rng: &mut Pcg32) -> Grid {
        MazeGenerator::new(tuning.grid_width, tuning.grid_height, tuning.cell_size).generate(rng)
    }

    fn spawn_player(tuning: &Tuning, grid: &Grid, level: u32) -> Player {
        Player::new(
            grid.center_of(grid.start()),
            tuning.player_speed,
            tuning.player_size / 2.0,
            tuning.level_trail_length(level),
            grid,
        )
    }

    /// Place enemies, hearts and maybe a light orb on the current grid
    fn populate(&mut self) {
        let reach = reachable(&self.grid, self.grid.start());
        let pool = spawn::candidates(&self.grid, &reach, self.grid.start(), self.grid.goal());
        let counts = SpawnCounts {
            enemies: self.level.min(self.tuning.max_enemies) as usize,
            hearts: self.level.min(self.tuning.max_lives) as usize,
            orb_chance: self.tuning.light_orb_spawn_chance,
        };
        let plan = spawn::plan(pool, counts, &mut self.rng);

        let t = &self.tuning;
        self.enemies = plan
            .enemies
            .iter()
            .map(|c| Enemy::new(c.center, t.enemy_speed, t.enemy_size / 2.0, &self.grid))
            .collect();
        self.hearts = plan
            .hearts
            .iter()
            .map(|c| Pickup {
                kind: PickupKind::Heart,
                pos: c.heart_anchor,
                radius: t.player_size / 2.0,
            })
            .collect();
        self.orbs = plan
            .orb
            .iter()
            .map(|c| Pickup {
                kind: PickupKind::LightOrb,
                pos: c.center,
                radius: t.player_size / 2.0,
            })
            .collect();

        log::info!(
            "Level {}: {}x{} maze, {} enemies, {} hearts, {} orbs",
            self.level,
            self.grid.width(),
            self.grid.height(),
            self.enemies.len(),
            self.hearts.len(),
            self.orbs.len()
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Level {} layout:\n{}", self.level, self.grid.to_rows().join("\n"));
        }
    }

    /// Replace the whole level: fresh maze, player at start, new spawns
    pub fn regenerate_level(&mut self) {
        let grid = Self::generate_grid(&self.tuning, &mut self.rng);
        self.player = Self::spawn_player(&self.tuning, &grid, self.level);
        self.grid = grid;
        self.direction = IVec2::ZERO;
        self.level_time = 0.0;
        self.populate();
    }

    /// Start a new run at level 1 (after game over)
    pub fn reset_run(&mut self) {
        self.level = 1;
        self.lives = self.tuning.starting_lives;
        self.game_time = 0.0;
        self.time_ticks = 0;
        self.invincible_until = 0.0;
        self.light_power_until = 0.0;
        self.events.clear();
        self.regenerate_level();
        self.phase = GamePhase::Playing;
    }

    /// Levels completed so far this run
    #[inline]
    pub fn levels_cleared(&self) -> u32 {
        self.level.saturating_sub(1)
    }

    /// World position of the goal cell center
    #[inline]
    pub fn goal_pos(&self) -> Vec2 {
        self.grid.center_of(self.grid.goal())
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.game_time < self.invincible_until
    }

    #[inline]
    pub fn light_power_active(&self) -> bool {
        self.game_time < self.light_power_until
    }

    /// Current light for fog-of-war
    pub fn light(&self) -> Light {
        if self.light_power_active() {
            Light::Full
        } else {
            Light::Radius(self.tuning.light_radius)
        }
    }

    /// Current enemy positions
    pub fn enemy_positions(&self) -> Vec<Vec2> {
        self.enemies.iter().map(|e| e.pos()).collect()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(12345, Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.pos(), state.grid.center_of(IVec2::new(1, 1)));
        assert!(state.player.mover.is_settled());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.hearts.len(), 1);
        assert!(state.orbs.len() <= 1);
    }

    #[test]
    fn test_spawn_counts_scale_with_level() {
        let mut state = GameState::new(7, Tuning::default());
        state.level = 12;
        state.regenerate_level();
        assert_eq!(state.enemies.len(), 10);
        assert_eq!(state.hearts.len(), 5);
        // Hearts sit half a cell below a center, enemies exactly on one
        for enemy in &state.enemies {
            assert!(enemy.mover.is_at_cell_center(&state.grid));
        }
        for heart in &state.hearts {
            let cell = state.grid.cell_of(heart.pos - Vec2::new(0.0, 10.0));
            assert_eq!(heart.pos, state.grid.center_of(cell) + Vec2::new(0.0, 10.0));
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameState::new(99, Tuning::default());
        let b = GameState::new(99, Tuning::default());
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.enemy_positions(), b.enemy_positions());
    }

    #[test]
    fn test_reset_run() {
        let mut state = GameState::new(3, Tuning::default());
        state.level = 6;
        state.lives = 0;
        state.game_time = 120.0;
        state.time_ticks = 7200;
        state.phase = GamePhase::GameOver;
        state.reset_run();
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_light_power_window() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(state.light(), Light::Radius(50.0));
        state.light_power_until = 5.0;
        assert_eq!(state.light(), Light::Full);
        state.game_time = 5.0;
        assert_eq!(state.light(), Light::Radius(50.0));
    }
}
