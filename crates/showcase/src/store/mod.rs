//! Persistent key-value store.
//!
//! The showcase keeps four independent records, each written in full on
//! every change:
//!
//! | Key | Value |
//! |-----|-------|
//! | `m5-products` | JSON array of products |
//! | `m5-submissions` | JSON array of submissions |
//! | `m5-admin-password` | raw admin password |
//! | `m5-settings` | JSON settings object |
//!
//! [`FileStore`] keeps one file per key in a data directory; [`MemoryStore`]
//! keeps everything in a map and is used by tests. Both enforce an optional
//! byte quota over all stored keys and values, which is the only capacity
//! failure the showcase models.

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Record keys.
pub mod keys {
    pub const PRODUCTS: &str = "m5-products";
    pub const SUBMISSIONS: &str = "m5-submissions";
    pub const ADMIN_PASSWORD: &str = "m5-admin-password";
    pub const SETTINGS: &str = "m5-settings";
}

/// Default quota, matching the usual per-origin browser storage limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Errors from reading or writing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing the value would exceed the store quota.
    #[error("storage quota exceeded writing {key}: {required} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        required: u64,
        quota: u64,
    },
    /// Keys must be non-empty and use only `a-z`, `0-9`, `-` and `_`.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the value cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] if the write would exceed the
    /// quota (nothing is written), or an error if the key is invalid or the
    /// write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and deserialize a JSON record.
///
/// # Errors
///
/// Returns an error if the read fails or the stored value is not valid JSON
/// for `T`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StoreError::from)
}

/// Serialize and write a JSON record.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}

/// Bytes an entry counts against the quota.
fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

fn check_quota(quota: Option<u64>, key: &str, required: u64) -> Result<(), StoreError> {
    match quota {
        Some(quota) if required > quota => Err(StoreError::QuotaExceeded {
            key: key.to_owned(),
            required,
            quota,
        }),
        _ => Ok(()),
    }
}
