//! Audio collaborator
//!
//! The core never plays sound itself. It reports named cues to a
//! [`SoundManager`]; hosts plug in a real mixer, the headless runner uses
//! [`LogAudio`].

use crate::settings::Settings;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Player bumps into a wall
    WallHit,
    /// Player touched by an enemy
    Damage,
    /// Heart or light orb collected
    Coin,
    /// Goal reached
    LevelComplete,
    /// Last life lost
    GameOver,
}

impl SoundEvent {
    /// Asset name of the cue
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::WallHit => "wall_hit",
            SoundEvent::Damage => "damage",
            SoundEvent::Coin => "coin",
            SoundEvent::LevelComplete => "level_complete",
            SoundEvent::GameOver => "game_over",
        }
    }
}

/// Sound sink driven by the game session
pub trait SoundManager {
    /// Play a one-shot effect
    fn play(&mut self, sound: SoundEvent);
    /// Switch to another background track
    fn change_background_music(&mut self);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl SoundManager for NullAudio {
    fn play(&mut self, _sound: SoundEvent) {}
    fn change_background_music(&mut self) {}
}

/// Background tracks cycled by [`LogAudio`]
pub const BACKGROUND_TRACKS: [&str; 4] = [
    "background",
    "background2",
    "background3",
    "background4",
];

/// Logs cues at debug level instead of playing them
#[derive(Debug, Clone)]
pub struct LogAudio {
    settings: Settings,
    track: Option<usize>,
    /// Effects played since creation
    pub played: u64,
}

impl LogAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            track: None,
            played: 0,
        }
    }

    /// Mute/unmute all audio
    pub fn toggle_mute(&mut self) {
        self.settings.muted = !self.settings.muted;
        log::debug!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    /// Name of the background track currently selected
    pub fn current_track(&self) -> Option<&'static str> {
        self.track.map(|i| BACKGROUND_TRACKS[i])
    }
}

impl SoundManager for LogAudio {
    fn play(&mut self, sound: SoundEvent) {
        let volume = self.settings.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("Sound {} at volume {:.2}", sound.name(), volume);
    }

    fn change_background_music(&mut self) {
        let next = self.track.map_or(0, |i| (i + 1) % BACKGROUND_TRACKS.len());
        self.track = Some(next);
        let volume = self.settings.effective_music_volume();
        if volume > 0.0 {
            log::debug!("Music {} at volume {:.2}", BACKGROUND_TRACKS[next], volume);
        }
    }
}
