//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::IVec2;

use super::collision::{collides_any, overlapping};
use super::grid::Direction;
use super::path::PathPlanner;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latched direction request, consumed by this tick
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Bot mode - A* drives the player toward the goal
    pub bot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.game_time += f64::from(dt);
    state.level_time += dt;

    // Latched input first so a turn at a cell center costs no extra tick
    let request = if input.bot {
        bot_request(state)
    } else {
        input.direction
    };
    if let Some(dir) = request {
        if state.player.request(dir, &mut state.direction, &state.grid) {
            state.events.push(GameEvent::WallHit);
        }
    }

    // Movement
    let now = state.game_time as f32;
    if state.player.step(state.direction, &state.grid, now) {
        state.events.push(GameEvent::WallHit);
    }
    state.player.trail_length = state.tuning.trail_length_at(state.level_time);

    for enemy in &mut state.enemies {
        enemy.step(&state.grid, &mut state.rng);
    }

    collect_hearts(state);

    // Enemy contact
    if collides_any(&state.player, &state.enemies) && !state.is_invincible() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            log::info!("Game over on level {} after {:.1}s", state.level, state.game_time);
            state.events.push(GameEvent::GameOver {
                levels_cleared: state.levels_cleared(),
            });
            state.phase = GamePhase::GameOver;
            return;
        }
        state.invincible_until = state.game_time + f64::from(state.tuning.invincibility_time);
        state.events.push(GameEvent::Damage { lives: state.lives });
    }

    // Goal reached: the level is replaced as a whole
    if state.player.pos() == state.goal_pos() {
        log::info!("Level {} complete at {:.1}s", state.level, state.game_time);
        state.events.push(GameEvent::LevelComplete { level: state.level });
        state.level += 1;
        state.regenerate_level();
        return;
    }

    collect_orbs(state);
}

/// Pick up overlapping hearts; each heals one life up to the cap
fn collect_hearts(state: &mut GameState) {
    let hits = overlapping(&state.player, &state.hearts);
    // Remove after the scan, back to front so indices stay valid
    for &i in hits.iter().rev() {
        state.hearts.remove(i);
    }
    for _ in hits {
        let healed = state.lives < state.tuning.max_lives;
        if healed {
            state.lives += 1;
        }
        state.events.push(GameEvent::HeartCollected { healed });
    }
}

/// Pick up overlapping light orbs; each restarts the light power timer
fn collect_orbs(state: &mut GameState) {
    let hits = overlapping(&state.player, &state.orbs);
    for &i in hits.iter().rev() {
        state.orbs.remove(i);
    }
    for _ in hits {
        state.light_power_until = state.game_time + f64::from(state.tuning.light_orb_duration);
        state.events.push(GameEvent::OrbCollected);
    }
}

/// Bot steering: plan toward the goal whenever the player is settled.
///
/// With no safe path the player holds position until a later replan finds one.
fn bot_request(state: &mut GameState) -> Option<Direction> {
    if !state.player.mover.is_settled() {
        return None;
    }
    let planner = PathPlanner::for_grid(&state.grid, state.tuning.enemy_avoid_cells);
    let path = planner.find_path(
        &state.grid,
        state.player.mover.cell,
        state.grid.goal(),
        &state.enemy_positions(),
    );
    match path.as_slice() {
        [from, next, ..] => Direction::between(*from, *next),
        _ => {
            state.direction = IVec2::ZERO;
            None
        }
    }
}
