use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError, HIGH_SCORE_KEY, LEVEL_KEY, XP_KEY};

/// Progression carried across games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub high_score: u32,
    pub xp: u32,
    pub level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            xp: 0,
            level: 1,
        }
    }
}

impl Progress {
    /// Read progression from the store. Missing or malformed values fall back
    /// to their defaults instead of failing.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            high_score: read_u32(store, HIGH_SCORE_KEY).unwrap_or(defaults.high_score),
            xp: read_u32(store, XP_KEY).unwrap_or(defaults.xp),
            // Levels start at 1
            level: read_u32(store, LEVEL_KEY)
                .filter(|&level| level >= 1)
                .unwrap_or(defaults.level),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(HIGH_SCORE_KEY, &self.high_score.to_string())?;
        store.set(XP_KEY, &self.xp.to_string())?;
        store.set(LEVEL_KEY, &self.level.to_string())?;
        Ok(())
    }
}

fn read_u32(store: &dyn KeyValueStore, key: &str) -> Option<u32> {
    let raw = store.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring malformed stored value {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(Progress::load(&store), Progress::default());
        assert_eq!(Progress::default().level, 1);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        store.set(XP_KEY, "-5").unwrap();
        store.set(LEVEL_KEY, "0").unwrap();

        assert_eq!(Progress::load(&store), Progress::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let progress = Progress {
            high_score: 350,
            xp: 2600,
            level: 2,
        };
        progress.save(&store).unwrap();

        assert_eq!(store.get(XP_KEY).as_deref(), Some("2600"));
        assert_eq!(Progress::load(&store), progress);
    }
}
