//! Best score across runs
//!
//! Persisted as a plain integer under `highScore`.

use crate::persistence::{KeyValueStore, StoreError};

/// The single persisted high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score beats the stored one
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it became the new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Read the stored value; absent means zero
    pub fn read(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let Some(raw) = store.get(Self::STORAGE_KEY)? else {
            return Ok(Self::default());
        };
        serde_json::from_str::<u64>(raw.trim())
            .map(Self::new)
            .map_err(|_| StoreError::Parse {
                key: Self::STORAGE_KEY.to_string(),
                value: raw,
            })
    }

    /// Load high score, falling back to zero on any storage problem
    pub fn load(store: &impl KeyValueStore) -> Self {
        match Self::read(store) {
            Ok(high_score) => {
                log::info!("Loaded high score {}", high_score.best);
                high_score
            }
            Err(e) => {
                log::warn!("Could not load high score ({}), starting fresh", e);
                Self::default()
            }
        }
    }

    /// Write the current best
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(&self.best).map_err(|e| StoreError::Backend(e.to_string()))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_value_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_zero() {
        let store = MemoryStore::with_entries([("highScore", "lots")]);
        assert!(matches!(
            HighScore::read(&store),
            Err(StoreError::Parse { .. })
        ));
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_submit_only_when_beaten() {
        let mut high = HighScore::new(150);
        assert!(!high.submit(100));
        assert!(!high.submit(150));
        assert_eq!(high.best(), 150);
        assert!(high.submit(160));
        assert_eq!(high.best(), 160);
    }

    #[test]
    fn test_zero_never_qualifies_on_first_run() {
        let high = HighScore::default();
        assert!(!high.qualifies(0));
        assert!(high.qualifies(10));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        HighScore::new(230).save(&mut store).unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("230"));
        assert_eq!(HighScore::load(&store).best(), 230);
    }
}
