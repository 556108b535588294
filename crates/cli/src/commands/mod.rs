//! CLI command implementations.

pub mod data;
pub mod password;
pub mod products;
pub mod submissions;

use std::path::Path;

use m5_core::CredentialError;
use m5_showcase::config::ConfigError;
use m5_showcase::services::{ImportError, PersistError, Showcase};
use m5_showcase::store::{FileStore, StoreError};
use thiserror::Error;

/// Errors that can occur running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open data directory: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Invalid password: {0}")]
    Password(#[from] CredentialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No record with the given id.
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// A destructive command was run without `--yes`.
    #[error("Refusing to {action} without --yes")]
    ConfirmationRequired { action: &'static str },
}

/// Load the showcase stored in `data_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn open(data_dir: &Path, quota: u64) -> Result<Showcase, CliError> {
    let store = FileStore::open(data_dir, Some(quota))?;
    tracing::debug!(data_dir = %data_dir.display(), "Opened data directory");
    Ok(Showcase::load(Box::new(store)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use m5_showcase::store::DEFAULT_QUOTA_BYTES;
    use tempfile::TempDir;

    use super::*;

    /// A showcase in a fresh temporary data directory.
    pub(crate) fn fresh() -> (TempDir, Showcase) {
        let dir = tempfile::tempdir().unwrap();
        let showcase = open(dir.path(), DEFAULT_QUOTA_BYTES).unwrap();
        (dir, showcase)
    }

    pub(crate) fn reopen(dir: &TempDir) -> Showcase {
        open(dir.path(), DEFAULT_QUOTA_BYTES).unwrap()
    }

    #[test]
    fn test_serialization_errors_keep_their_kind() {
        let err: CliError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(err, CliError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
