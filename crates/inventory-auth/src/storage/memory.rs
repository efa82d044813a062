//! Process-local session storage.

use async_trait::async_trait;
use dashmap::DashMap;

use inventory_core::result::AppResult;
use inventory_core::traits::SessionStorage;

/// Session storage held in memory. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: DashMap<String, String>,
}

impl MemorySessionStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> AppResult<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}
