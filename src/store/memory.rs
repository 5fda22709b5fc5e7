use super::KeyValueStore;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory store, used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .inner
            .read()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {key}");
        } else {
            debug!("Store MISS for key: {key}");
        }
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        debug!("Store PUT for key: {key}");
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_put() {
        let store = MemoryStore::new();

        // Initially, store is empty
        assert!(store.get("key1").unwrap().is_none());

        store.put("key1", "123").unwrap();
        assert_eq!(store.get("key1").unwrap().as_deref(), Some("123"));

        // Overwrite
        store.put("key1", "456").unwrap();
        assert_eq!(store.get("key1").unwrap().as_deref(), Some("456"));

        assert!(store.get("key2").unwrap().is_none());
    }
}
