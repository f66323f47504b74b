//! High score table
//!
//! Top five scores, highest first, persisted as JSON through [`Storage`].

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Number of scores kept
pub const MAX_HIGH_SCORES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Sorted descending, never longer than [`MAX_HIGH_SCORES`]
    entries: Vec<u64>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "sea_docking_scores";

    pub fn new() -> Self {
        Self::default()
    }

    /// The table, zero-padded to five entries
    pub fn scores(&self) -> [u64; MAX_HIGH_SCORES] {
        let mut scores = [0; MAX_HIGH_SCORES];
        for (slot, score) in scores.iter_mut().zip(&self.entries) {
            *slot = *score;
        }
        scores
    }

    /// Slot (0-based) a score would be inserted at, `None` if it falls off the end
    fn slot(&self, score: u64) -> Option<usize> {
        let slot = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Rank a score would get (1-based), `None` if it would not make the table.
    /// A zero score never ranks.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        self.slot(score).map(|slot| slot + 1)
    }

    /// Insert, re-sort, truncate. Returns the rank achieved; a zero score is
    /// still stored but reports no rank.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let slot = self.slot(score)?;
        self.entries.insert(slot, score);
        self.entries.truncate(MAX_HIGH_SCORES);
        (score > 0).then_some(slot + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                // Stored tables may come from older builds or be hand-edited
                scores.entries.sort_unstable_by(|a, b| b.cmp(a));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
            Err(e) => log::warn!("Failed to serialize high scores: {e}"),
        }
    }

    /// Load, insert `score`, save. Returns the rank achieved.
    pub fn record(storage: &mut dyn Storage, score: u64) -> Option<usize> {
        let mut table = Self::load(storage);
        let rank = table.add_score(score);
        table.save(storage);
        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_zero_padded() {
        let mut table = HighScores::new();
        table.add_score(30);
        table.add_score(50);
        assert_eq!(table.scores(), [50, 30, 0, 0, 0]);
    }

    #[test]
    fn test_keeps_top_five_descending() {
        let mut table = HighScores::new();
        for score in [10, 70, 20, 60, 30, 50, 40] {
            table.add_score(score);
        }
        assert_eq!(table.scores(), [70, 60, 50, 40, 30]);
        assert_eq!(table.add_score(5), None);
        assert_eq!(table.add_score(65), Some(2));
        assert_eq!(table.scores(), [70, 65, 60, 50, 40]);
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut table = HighScores::new();
        table.add_score(100);
        assert_eq!(table.add_score(100), Some(2));
    }

    #[test]
    fn test_zero_score_is_stored_without_rank() {
        let mut table = HighScores::new();
        assert_eq!(table.potential_rank(0), None);
        assert_eq!(table.add_score(0), None);
        assert!(!table.is_empty());

        let mut storage = MemoryStorage::new();
        assert_eq!(HighScores::record(&mut storage, 0), None);
        assert!(!HighScores::load(&storage).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut table = HighScores::new();
        table.add_score(1);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.scores(), [0; 5]);
    }

    #[test]
    fn test_persists_through_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(HighScores::record(&mut storage, 1200), Some(1));
        assert_eq!(HighScores::record(&mut storage, 800), Some(2));
        let table = HighScores::load(&storage);
        assert_eq!(table.scores(), [1200, 800, 0, 0, 0]);
        assert_eq!(table.top_score(), Some(1200));
    }

    #[test]
    fn test_corrupt_storage_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.set_item(HighScores::STORAGE_KEY, "not json");
        assert!(HighScores::load(&storage).is_empty());
    }
}
