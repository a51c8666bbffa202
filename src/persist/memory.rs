//! Shared-handle in-memory key-value store.

use std::sync::{Arc, Mutex};

use hashbrown::HashMap;

use super::{KvStore, PersistError, PersistResult};

/// In-memory [`KvStore`], the session-scoped storage analog.
///
/// Clones share one map, so a test or embedding view can keep a handle and
/// observe writes made by the session runtime.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|map| map.len()).unwrap_or(0)
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let map = self
            .inner
            .lock()
            .map_err(|_| PersistError::Message("kv store poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| PersistError::Message("kv store poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| PersistError::Message("kv store poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}
