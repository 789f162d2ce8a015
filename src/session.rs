//! Game session: the host-facing driver
//!
//! Owns the game state, the fixed timestep clock, the latched input and the
//! audio and leaderboard collaborators. Hosts feed it key presses and frame
//! times; it runs ticks and forwards what happened.

use std::time::Duration;

use crate::audio::{SoundEvent, SoundManager};
use crate::clock::SimulationClock;
use crate::consts::{MAX_NAME_LENGTH, SIM_DT};
use crate::highscores::{ScoreSink, score_for};
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GamePhase, GameState, Scene, TickInput, tick};
use crate::tuning::Tuning;

/// Keep ASCII letters and digits, upper-cased, up to the name length limit.
/// Returns None when nothing usable is left.
pub fn sanitize_name(raw: &str) -> Option<String> {
    let name: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_NAME_LENGTH)
        .collect();
    (!name.is_empty()).then_some(name)
}

pub struct Session<A: SoundManager, H: ScoreSink> {
    state: GameState,
    clock: SimulationClock,
    /// One-shot input waiting for the next tick
    input: TickInput,
    bot: bool,
    show_trails: bool,
    audio: A,
    scores: H,
}

impl<A: SoundManager, H: ScoreSink> Session<A, H> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, audio: A, scores: H) -> Self {
        log::info!("New session with seed {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            clock: SimulationClock::default(),
            input: TickInput::default(),
            bot: settings.bot_mode,
            show_trails: settings.trails,
            audio,
            scores,
        }
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Ready {
            self.state.phase = GamePhase::Playing;
            self.clock.reset();
            self.audio.change_background_music();
            log::info!("Game started");
        }
    }

    /// Direction key pressed. The first press only starts the game; later
    /// presses are latched for the next tick unless the bot is steering.
    pub fn press(&mut self, dir: Direction) {
        match self.state.phase {
            GamePhase::Ready => self.start(),
            GamePhase::Playing if !self.bot => self.input.direction = Some(dir),
            _ => {}
        }
    }

    /// Pause or resume on the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause = !self.input.pause;
    }

    pub fn set_bot(&mut self, enabled: bool) {
        if self.bot != enabled {
            log::info!("Bot mode {}", if enabled { "on" } else { "off" });
        }
        self.bot = enabled;
    }

    /// Account for one host frame. Returns how many ticks ran.
    pub fn frame(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            let mut input = std::mem::take(&mut self.input);
            input.bot = self.bot;
            tick(&mut self.state, &input, SIM_DT);
        }
        self.dispatch_events();
        ticks
    }

    /// Forward tick events to the audio collaborator
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::WallHit => self.audio.play(SoundEvent::WallHit),
                GameEvent::Damage { .. } => self.audio.play(SoundEvent::Damage),
                GameEvent::HeartCollected { healed } => {
                    if healed {
                        self.audio.play(SoundEvent::Coin);
                    }
                }
                GameEvent::OrbCollected => self.audio.play(SoundEvent::Coin),
                GameEvent::LevelComplete { .. } => {
                    self.audio.play(SoundEvent::LevelComplete);
                    self.audio.change_background_music();
                }
                GameEvent::GameOver { .. } => self.audio.play(SoundEvent::GameOver),
            }
        }
    }

    /// Submit the finished run under `name`, then start a new run.
    /// Returns the leaderboard rank, or None if the name was unusable or the
    /// score missed the table. Only valid after game over.
    pub fn submit_score(&mut self, name: &str) -> Option<usize> {
        if self.state.phase != GamePhase::GameOver {
            return None;
        }
        let Some(name) = sanitize_name(name) else {
            log::warn!("Rejected empty leaderboard name");
            return None;
        };
        let levels = self.state.levels_cleared();
        let seconds = self.state.game_time;
        let rank = self.scores.add_score(&name, levels, seconds);
        log::info!(
            "{} cleared {} levels in {:.1}s (score {:.2}), rank {:?}",
            name,
            levels,
            seconds,
            score_for(levels, seconds),
            rank
        );
        self.restart();
        rank
    }

    /// Skip name entry and play again from level 1
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            self.state.reset_run();
            self.input = TickInput::default();
            self.clock.reset();
        }
    }

    /// Renderer snapshot of the current frame
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::capture(&self.state);
        if !self.show_trails {
            scene.trail.clear();
        }
        scene
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_bot(&self) -> bool {
        self.bot
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scores(&self) -> &H {
        &self.scores
    }

    /// Hand back the collaborators
    pub fn into_parts(self) -> (A, H) {
        (self.audio, self.scores)
    }
}
