//! High score leaderboard system
//!
//! Persisted as `highscores.json`: a JSON array of at most 10
//! `{name, score}` objects sorted descending by score.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json, save_json};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest name accepted on the entry screen
pub const MAX_NAME_LEN: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, enforcing order and size
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// True if fewer than 10 entries exist or `score` beats the 10th place
    pub fn is_highscore(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.is_highscore(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Append, re-sort, truncate to top 10, persist; returns the new list
    pub fn add_highscore(
        &mut self,
        storage: &mut dyn Storage,
        name: &str,
        score: u32,
    ) -> &[HighScoreEntry] {
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
        });
        // Stable sort keeps earlier entries ahead on ties
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
        self.save(storage);
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores; missing or corrupt files read as an empty list
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Vec<HighScoreEntry>>(storage, Self::STORAGE_KEY) {
            Ok(Some(entries)) => {
                let scores = Self::from_entries(entries);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }

    /// Save high scores; failures are logged and swallowed
    pub fn save(&self, storage: &mut dyn Storage) {
        match save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}
