//! Directory-backed store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{KeyValueStore, StoreError, check_quota, entry_size, validate_key};

const TMP_SUFFIX: &str = ".tmp";

/// A [`KeyValueStore`] keeping one file per key under a root directory.
///
/// Writes go to a temporary file that is renamed over the old value, so a
/// failed write never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota: Option<u64>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>, quota: Option<u64>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, quota })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Bytes used by every stored key except `skip`.
    fn used_bytes_except(&self, skip: &str) -> Result<u64, StoreError> {
        let mut used = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name == skip || validate_key(name).is_err() {
                continue;
            }
            used += name.len() as u64 + entry.metadata()?.len();
        }
        Ok(used)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let required = self.used_bytes_except(key)? + entry_size(key, value);
        check_quota(self.quota, key, required)?;

        let path = self.path_for(key);
        let tmp = self.root.join(format!("{key}{TMP_SUFFIX}"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, bytes = value.len(), "store record written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path(), None).unwrap();
            store.set("m5-settings", r#"{"siteTitle":"M5"}"#).unwrap();
        }
        let store = FileStore::open(dir.path(), None).unwrap();
        assert_eq!(
            store.get("m5-settings").unwrap().as_deref(),
            Some(r#"{"siteTitle":"M5"}"#)
        );
        assert!(!dir.path().join("m5-settings.tmp").exists());
    }

    #[test]
    fn test_missing_key_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested"), None).unwrap();
        assert_eq!(store.get("m5-products").unwrap(), None);

        store.set("m5-products", "[]").unwrap();
        assert!(dir.path().join("nested").join("m5-products").exists());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path(), Some(32)).unwrap();
        store.set("a", "small").unwrap();

        let err = store.set("b", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), None).unwrap();
        assert!(matches!(
            store.get("../outside"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
