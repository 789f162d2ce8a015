//! Fog-of-war visibility
//!
//! Produces a visibility scalar per object for the renderer. Objects outside
//! the light radius are left out entirely. While light power is active every
//! object is fully visible; the radius is ignored rather than enlarged.

use glam::Vec2;

use super::grid::{CellIndex, Grid};
use super::state::GameState;
use crate::highscores::{levels_per_minute, score_for};

/// How far the viewer can currently see
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Linear falloff out to this radius
    Radius(f32),
    /// Light power: everything at full visibility
    Full,
}

impl Light {
    /// Visibility of a point, `None` if outside the light
    #[inline]
    pub fn of(&self, viewer: Vec2, target: Vec2) -> Option<f32> {
        match *self {
            Light::Full => Some(1.0),
            Light::Radius(radius) => visibility(viewer, target, radius),
        }
    }

    /// Visibility of a wall cell: lit if any corner is within the radius
    pub fn of_wall(&self, viewer: Vec2, grid: &Grid, cell: CellIndex) -> Option<f32> {
        match *self {
            Light::Full => Some(1.0),
            Light::Radius(radius) => wall_visible(viewer, grid, cell, radius).then_some(1.0),
        }
    }
}

/// `1 - distance / radius` inside the radius (inclusive), otherwise `None`
#[inline]
pub fn visibility(viewer: Vec2, target: Vec2, radius: f32) -> Option<f32> {
    let distance = viewer.distance(target);
    if distance <= radius && radius > 0.0 {
        Some(1.0 - distance / radius)
    } else {
        None
    }
}

/// A wall is visible when any of its corners lies within the radius
pub fn wall_visible(viewer: Vec2, grid: &Grid, cell: CellIndex, radius: f32) -> bool {
    grid.corners_of(cell)
        .iter()
        .any(|corner| viewer.distance(*corner) <= radius)
}

/// An object the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lit<T> {
    pub item: T,
    /// 0 (invisible) to 1 (fully lit)
    pub visibility: f32,
}

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub level: u32,
    /// Elapsed game time in seconds
    pub elapsed: f64,
    pub lives: u32,
    pub levels_per_minute: f64,
    pub score: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub player: Vec2,
    pub player_radius: f32,
    /// Trail positions oldest first, with their record time
    pub trail: Vec<(Vec2, f32)>,
    /// Player blinks while this is set
    pub invincible: bool,
    pub light_power: bool,
    pub goal: Vec2,
    pub enemies: Vec<Lit<Vec2>>,
    pub hearts: Vec<Lit<Vec2>>,
    pub orbs: Vec<Lit<Vec2>>,
    pub walls: Vec<Lit<CellIndex>>,
    pub stats: Stats,
}

impl Scene {
    /// Snapshot the visible world around the player
    pub fn capture(state: &GameState) -> Self {
        let viewer = state.player.pos();
        let light = state.light();
        let lit_points = |points: &mut dyn Iterator<Item = Vec2>| -> Vec<Lit<Vec2>> {
            points
                .filter_map(|p| light.of(viewer, p).map(|v| Lit { item: p, visibility: v }))
                .collect()
        };

        let enemies = lit_points(&mut state.enemies.iter().map(|e| e.pos()));
        let hearts = lit_points(&mut state.hearts.iter().map(|h| h.pos));
        let orbs = lit_points(&mut state.orbs.iter().map(|o| o.pos));
        let walls = state
            .grid
            .walls()
            .filter_map(|cell| {
                light
                    .of_wall(viewer, &state.grid, cell)
                    .map(|v| Lit { item: cell, visibility: v })
            })
            .collect();

        let levels = state.levels_cleared();
        Self {
            player: viewer,
            player_radius: state.player.mover.radius,
            trail: state.player.trail.iter().map(|t| (t.pos, t.time)).collect(),
            invincible: state.is_invincible(),
            light_power: light == Light::Full,
            goal: state.grid.center_of(state.grid.goal()),
            enemies,
            hearts,
            orbs,
            walls,
            stats: Stats {
                level: state.level,
                elapsed: state.game_time,
                lives: state.lives,
                levels_per_minute: levels_per_minute(levels, state.game_time),
                score: score_for(levels, state.game_time),
            },
        }
    }
}
