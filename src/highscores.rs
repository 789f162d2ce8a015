//! High score leaderboard system
//!
//! Persisted as a JSON file, tracks the top 10 runs by derived score.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{StorageError, load_json, save_json};
use crate::round2;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Levels cleared per minute of play (0 before any time has passed)
pub fn levels_per_minute(levels: u32, seconds: f64) -> f64 {
    if seconds <= 0.0 {
        return 0.0;
    }
    f64::from(levels) * 60.0 / seconds
}

/// Derived run score: pace times progress, rounded to 2 decimal places
pub fn score_for(levels: u32, seconds: f64) -> f64 {
    round2(levels_per_minute(levels, seconds) * f64::from(levels))
}

/// Receives finished runs from the game session
pub trait ScoreSink {
    /// Record a run; returns the rank achieved (1-indexed) if it made the table
    fn add_score(&mut self, name: &str, levels: u32, seconds: f64) -> Option<usize>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    /// Levels cleared
    pub levels: u32,
    /// Seconds of play
    pub time: f64,
    /// Levels per minute, rounded for display
    pub lpm: f64,
    pub score: f64,
}

impl HighScoreEntry {
    pub fn new(name: &str, levels: u32, time: f64) -> Self {
        Self {
            name: name.to_string(),
            levels,
            time,
            lpm: round2(levels_per_minute(levels, time)),
            score: score_for(levels, time),
        }
    }
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: f64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert an entry after every entry with an equal or higher score.
    /// Returns the rank achieved (1-indexed) or None if it fell off the table
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Best `n` entries, highest first
    pub fn top_scores(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let mut scores: HighScores = load_json(path)?;
        scores.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Load high scores, starting fresh if the file is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::info!("No high scores loaded ({}), starting fresh", e);
            Self::new()
        })
    }

    /// Save high scores to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreSink for HighScores {
    fn add_score(&mut self, name: &str, levels: u32, seconds: f64) -> Option<usize> {
        self.insert(HighScoreEntry::new(name, levels, seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        assert_eq!(levels_per_minute(3, 30.0), 6.0);
        assert_eq!(score_for(3, 30.0), 18.0);
        assert_eq!(levels_per_minute(5, 0.0), 0.0);
        assert_eq!(score_for(0, 12.0), 0.0);
        // 2 levels in 7s: 17.142857.. lpm, 34.2857.. score
        assert_eq!(score_for(2, 7.0), 34.29);
    }

    #[test]
    fn test_add_score_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("SLOW", 1, 60.0), Some(1));
        assert_eq!(scores.add_score("AB", 3, 30.0), Some(1));
        assert_eq!(scores.entries[0].name, "AB");
        assert_eq!(scores.entries[0].lpm, 6.0);
        assert_eq!(scores.entries[0].score, 18.0);
        assert_eq!(scores.entries[1].name, "SLOW");
        assert_eq!(scores.top_score(), Some(18.0));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score("FIRST", 2, 60.0);
        assert_eq!(scores.add_score("SECOND", 2, 60.0), Some(2));
        assert_eq!(scores.entries[0].name, "FIRST");
    }

    #[test]
    fn test_only_top_ten_kept() {
        let mut scores = HighScores::new();
        for levels in 1..=12 {
            scores.add_score("P", levels, 60.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries[0].levels, 12);
        assert_eq!(scores.entries[9].levels, 3);
        // Lower than everything on a full table
        assert!(!scores.qualifies(1.0));
        assert_eq!(scores.add_score("LOW", 1, 60.0), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_scores(3).len(), 3);
        assert_eq!(scores.top_scores(50).len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_file_roundtrip() {
        let path =
            std::env::temp_dir().join(format!("neon-maze-{}-scores.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score("AB", 3, 30.0);
        scores.save(&path).unwrap();
        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.entries, scores.entries);
        std::fs::remove_file(&path).unwrap();

        assert!(HighScores::load_or_default(&path).is_empty());
    }
}
