//! In-memory store.

use std::collections::BTreeMap;

use super::{KeyValueStore, StoreError, check_quota, entry_size, validate_key};

/// A [`KeyValueStore`] backed by a map. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<u64>,
}

impl MemoryStore {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store limited to `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes currently counted against the quota.
    #[must_use]
    pub fn used_bytes(&self) -> u64 {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let others: u64 = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum();
        check_quota(self.quota, key, others + entry_size(key, value))?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_quota_counts_all_keys() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "1234").unwrap();
        assert_eq!(store.used_bytes(), 5);

        let err = store.set("b", "123456").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                required: 12,
                quota: 10,
                ..
            }
        ));
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_quota_replacing_a_key_frees_its_old_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "123456789").unwrap();
        store.set("a", "987654321").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("987654321"));
    }
}
