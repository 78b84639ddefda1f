//! In-memory store implementation.
//!
//! Provides [`MemoryStore`] for unit testing and ephemeral single-process
//! setups without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::store::{KvError, KvStore};

/// In-memory key-value store.
///
/// Keys are held in a sorted map so prefix scans come back in lexicographic
/// order for free. Use the builder methods to seed test data.
///
/// # Example
///
/// ```ignore
/// use tessera_kv::{KvStore, MemoryStore};
///
/// let store = MemoryStore::new().with_entry("site:1:theme", "{}");
///
/// assert_eq!(store.get("site:1:theme").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(key.into(), value.into());
        self
    }

    /// Number of stored entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the store holds no entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, KvError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .range(prefix.to_owned()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_memory_store_is_send_sync() {
        assert_send_sync::<MemoryStore>();
    }

    #[test]
    fn test_new_empty() {
        let store = MemoryStore::new();

        assert!(store.is_empty());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("a", "1").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new().with_entry("a", "1");

        store.set("a", "2").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new().with_entry("a", "1");

        store.remove("a").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let store = MemoryStore::new();

        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn test_scan_prefix_sorted() {
        let store = MemoryStore::new()
            .with_entry("site:1:page:home", "{}")
            .with_entry("site:1:component:c2", "{}")
            .with_entry("site:1:component:c1", "{}")
            .with_entry("site:2:component:c3", "{}");

        let keys = store.scan_prefix("site:1:").unwrap();

        assert_eq!(
            keys,
            vec![
                "site:1:component:c1".to_owned(),
                "site:1:component:c2".to_owned(),
                "site:1:page:home".to_owned(),
            ]
        );
    }

    #[test]
    fn test_scan_prefix_no_match() {
        let store = MemoryStore::new().with_entry("site:1:theme", "{}");

        let keys = store.scan_prefix("other:").unwrap();

        assert!(keys.is_empty());
    }

    #[test]
    fn test_scan_empty_prefix_returns_all() {
        let store = MemoryStore::new().with_entry("b", "2").with_entry("a", "1");

        let keys = store.scan_prefix("").unwrap();

        assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);
    }
}
