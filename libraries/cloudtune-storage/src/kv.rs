//! Key-value blob store seam

use crate::error::Result;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Blob store keyed by name
///
/// Writes are synchronous and independent per key: there is no batching and
/// no transaction spanning two keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: String) -> Result<()>;
}

/// In-memory store, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with blobs
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let blobs = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            blobs: RwLock::new(blobs),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut blobs = self.blobs.write().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(key.to_string(), value);
        Ok(())
    }
}
