//! High score leaderboard
//!
//! Tracks the top 10 runs, ordered by score (highest first) and then by name.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::persistence::JsonFile;
use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    pub difficulty: Difficulty,
}

/// Leaderboard order: descending score, ties by ascending name
pub fn ranking(a: &HighScoreEntry, b: &HighScoreEntry) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name))
}

/// Where the leaderboard lives between sessions
pub trait LeaderboardStore {
    /// Every readable entry; unreadable data yields an empty list
    fn load(&self) -> Vec<HighScoreEntry>;
    /// Replace the stored list
    fn save(&mut self, entries: &[HighScoreEntry]) -> anyhow::Result<()>;
}

/// In-memory store (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entries: Vec<HighScoreEntry>,
    /// Number of successful saves
    pub saves: usize,
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Vec<HighScoreEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> anyhow::Result<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

impl LeaderboardStore for JsonFile {
    /// Records that fail to decode are skipped one by one; a file that
    /// isn't a JSON array at all gives an empty leaderboard.
    fn load(&self) -> Vec<HighScoreEntry> {
        let value = match self.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return Vec::new();
            }
            Err(e) => {
                log::warn!("High scores unreadable, starting fresh: {:#}", e);
                return Vec::new();
            }
        };

        let serde_json::Value::Array(records) = value else {
            log::warn!("High scores file is not a list, starting fresh");
            return Vec::new();
        };

        let entries: Vec<HighScoreEntry> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping invalid high score entry: {}", e);
                    None
                }
            })
            .collect();
        log::info!("Loaded {} high scores", entries.len());
        entries
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> anyhow::Result<()> {
        self.write(entries)?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}

/// High score leaderboard
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

    /// Build from arbitrary records, restoring order and size
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(ranking);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Whether an entry would survive insertion
    pub fn qualifies(&self, score: u64, name: &str) -> bool {
        self.potential_rank(score, name).is_some()
    }

    /// Rank an entry would take (1-indexed), `None` if it would be cut
    pub fn potential_rank(&self, score: u64, name: &str) -> Option<usize> {
        let candidate = HighScoreEntry {
            name: name.to_string(),
            score,
            difficulty: Difficulty::default(),
        };
        let pos = self
            .entries
            .iter()
            .position(|e| ranking(&candidate, e) == Ordering::Less)
            .unwrap_or(self.entries.len());
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Insert in order and trim to size.
    /// Returns the rank achieved (1-indexed) or `None` if it was cut.
    /// Ties go after existing entries, so an equal record never bumps an
    /// older one off a full board.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .partition_point(|e| ranking(e, &entry) != Ordering::Greater);
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load(store: &dyn LeaderboardStore) -> Self {
        Self::from_entries(store.load())
    }

    pub fn save(&self, store: &mut dyn LeaderboardStore) -> anyhow::Result<()> {
        store.save(&self.entries)
    }
}
