//! Best circle attempts, kept locally

use serde::{Deserialize, Serialize};

use crate::storage;

/// Board size
pub const MAX_HIGH_SCORES: usize = 10;

const STORAGE_KEY: &str = "wonderlab_circle_scores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Roundness, 0-100
    pub score: f64,
    /// Wall clock (ms since epoch) of the attempt
    pub timestamp: f64,
}

/// Best attempts, highest first. Equal scores keep the older attempt ahead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a new attempt would be inserted at
    fn slot(&self, score: f64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// A zero never makes the board; otherwise anything fits until it is full
    pub fn qualifies(&self, score: f64) -> bool {
        score > 0.0 && self.slot(score) < MAX_HIGH_SCORES
    }

    /// 1-based rank `score` would take, if it qualifies
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        self.qualifies(score).then(|| self.slot(score) + 1)
    }

    /// Record an attempt. Returns its 1-based rank, or None if it missed the board.
    pub fn add_score(&mut self, score: f64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let slot = self.slot(score);
        self.entries.insert(slot, HighScoreEntry { score, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        let board: Self = storage::load(STORAGE_KEY).unwrap_or_default();
        log::info!("Loaded {} circle scores", board.entries.len());
        board
    }

    pub fn save(&self) {
        if storage::save(STORAGE_KEY, self) {
            log::info!("Circle scores saved ({} entries)", self.entries.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0.0));
        assert_eq!(scores.potential_rank(0.0), None);
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(80.0, 1.0), Some(1));
        assert_eq!(scores.add_score(95.5, 2.0), Some(1));
        assert_eq!(scores.add_score(85.0, 3.0), Some(2));
        assert_eq!(scores.add_score(80.0, 4.0), Some(4));
        let ordered: Vec<f64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![95.5, 85.0, 80.0, 80.0]);
        assert_eq!(scores.entries[2].timestamp, 1.0);
        assert_eq!(scores.top_score(), Some(95.5));
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES {
            scores.add_score(50.0 + i as f64, i as f64);
        }
        assert!(!scores.qualifies(50.0));
        assert_eq!(scores.potential_rank(100.0), Some(1));
        assert_eq!(scores.add_score(55.5, 99.0), Some(5));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(51.0));
    }
}
