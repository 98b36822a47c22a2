//! In-memory key-value store.
//!
//! The standard backend for tests and the default for embedders that do
//! not need durability. Contents are lost when the store is dropped.

use super::KeyValueStore;
use crate::errors::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A [`KeyValueStore`] backed by a mutex-guarded hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing serialization. Intended for tests that
    /// need to simulate pre-existing (possibly corrupted) stored state.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| crate::errors::Error::Storage {
                message: "memory store mutex poisoned".to_string(),
            })?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| crate::errors::Error::Storage {
                message: "memory store mutex poisoned".to_string(),
            })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| crate::errors::Error::Storage {
                message: "memory store mutex poisoned".to_string(),
            })?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("clients").await?, None);

        store.set("clients", "[]").await?;
        assert_eq!(store.get("clients").await?.as_deref(), Some("[]"));

        store.set("clients", "[1]").await?;
        assert_eq!(store.get("clients").await?.as_deref(), Some("[1]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() -> Result<()> {
        let store = MemoryStore::new();
        store.set("projects", "[]").await?;
        store.remove("projects").await?;
        store.remove("projects").await?;
        assert_eq!(store.get("projects").await?, None);
        Ok(())
    }
}
