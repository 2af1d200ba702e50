//! High score leaderboard
//!
//! Session-only (nothing is written to disk); tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Ticks survived
    pub ticks: u64,
    /// Seed the run was played with
    pub seed: u64,
}

/// High score leaderboard, sorted by score (descending)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
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

    /// Whether a run with `score` reached in `ticks` would make the board
    pub fn qualifies(&self, score: u64, ticks: u64) -> bool {
        self.potential_rank(score, ticks).is_some()
    }

    /// Rank (1-indexed) a finished run would take, or `None` if it misses
    ///
    /// Higher scores rank first; an equal score reached in fewer ticks ranks
    /// above. A run that ties an entry exactly lands below it.
    pub fn potential_rank(&self, score: u64, ticks: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self
            .entries
            .iter()
            .position(|e| outranks(score, ticks, e))
            .unwrap_or(self.entries.len());
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    /// Add a finished run (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, ticks: u64, seed: u64) -> Option<usize> {
        let rank = self.potential_rank(score, ticks)?;
        self.entries
            .insert(rank - 1, HighScoreEntry { score, ticks, seed });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New high score #{rank}: {score} in {ticks} ticks (seed {seed})");
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

fn outranks(score: u64, ticks: u64, entry: &HighScoreEntry) -> bool {
    score > entry.score || (score == entry.score && ticks < entry.ticks)
}
