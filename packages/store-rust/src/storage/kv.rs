//! Key-value persistence contract and in-memory engine.
//!
//! [`KeyValueStore`] is the narrow async interface over the device's
//! persistence layer: string keys to string payloads, each operation
//! independently failable. The cart store decides how to degrade when an
//! operation fails; this layer just reports it.

use async_trait::async_trait;
use dashmap::DashMap;

/// Async string key-value persistence.
///
/// Every call is a suspension point that may fail independently of
/// in-memory state. Used as `Arc<dyn KeyValueStore>`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the payload stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Stores `payload` under `key`, replacing any prior value.
    async fn set(&self, key: &str, payload: &str) -> anyhow::Result<()>;

    /// Deletes the payload under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// In-memory [`KeyValueStore`] backed by [`DashMap`].
///
/// The default engine for tests and for sessions where no durable storage
/// is available; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    async fn set(&self, key: &str, payload: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_owned(), payload.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("cart").await.expect("get succeeds"), None);

        store.set("cart", "{}").await.expect("set succeeds");
        assert_eq!(
            store.get("cart").await.expect("get succeeds"),
            Some("{}".to_owned())
        );

        store.remove("cart").await.expect("remove succeeds");
        assert_eq!(store.get("cart").await.expect("get succeeds"), None);
    }

    #[tokio::test]
    async fn removing_absent_key_succeeds() {
        let store = MemoryKeyValueStore::new();
        store.remove("never-set").await.expect("remove succeeds");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_overwrites_prior_value() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "old").await.expect("set succeeds");
        store.set("k", "new").await.expect("set succeeds");
        assert_eq!(
            store.get("k").await.expect("get succeeds"),
            Some("new".to_owned())
        );
        assert_eq!(store.len(), 1);
    }

    /// Verifies `Arc<dyn KeyValueStore>` compiles (object safety).
    #[test]
    fn key_value_store_is_object_safe() {
        fn _assert_object_safe(_: &Arc<dyn KeyValueStore>) {}
    }
}
