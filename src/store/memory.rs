use dashmap::DashMap;

use super::{KeyValueStore, StoreError};

/// In-process store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("wordgrid_xp", "120").unwrap();
        assert_eq!(store.get("wordgrid_xp").as_deref(), Some("120"));
        store.set("wordgrid_xp", "180").unwrap();
        assert_eq!(store.get("wordgrid_xp").as_deref(), Some("180"));
    }
}
