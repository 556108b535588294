//! Seeding, export and import.

use std::path::{Path, PathBuf};

use chrono::Utc;
use m5_showcase::services::{ExportBundle, Showcase};

use super::CliError;

/// Write every record, so a fresh install stores its sample catalog.
///
/// # Errors
///
/// Returns an error if a record could not be written.
pub fn seed(showcase: &mut Showcase) -> Result<(), CliError> {
    showcase.persist_everything()?;
    tracing::info!(
        products = showcase.catalog().len(),
        submissions = showcase.submissions().len(),
        "Seeding complete!"
    );
    Ok(())
}

/// Write the export bundle to `output`, or to its dated file name in the
/// current directory. Returns the path written.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export(showcase: &Showcase, output: Option<&Path>) -> Result<PathBuf, CliError> {
    let bundle = showcase.export(Utc::now());
    let path = output.map_or_else(|| PathBuf::from(bundle.file_name()), Path::to_path_buf);
    let json = bundle.to_json_pretty()?;
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "Data exported successfully!");
    Ok(path)
}

/// Replace all data with the bundle in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid bundle, or a
/// record could not be written.
pub fn import(showcase: &mut Showcase, path: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path)?;
    let bundle = ExportBundle::from_json(&raw)?;
    showcase.import(bundle)?;
    tracing::info!(path = %path.display(), "Data imported successfully!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use m5_core::ProductId;
    use m5_showcase::services::ImportError;

    use super::*;
    use crate::commands::tests::{fresh, reopen};

    #[test]
    fn test_seed_writes_sample_catalog() {
        let (dir, mut showcase) = fresh();
        assert!(!dir.path().join("m5-products").exists());

        seed(&mut showcase).unwrap();
        assert!(dir.path().join("m5-products").exists());
        assert_eq!(reopen(&dir).catalog().len(), 3);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let (dir, mut showcase) = fresh();
        let path = dir.path().join("backup.json");
        export(&showcase, Some(&path)).unwrap();

        showcase.delete_product(&ProductId::new("2")).unwrap();
        assert_eq!(showcase.catalog().len(), 2);

        import(&mut showcase, &path).unwrap();
        let reloaded = reopen(&dir);
        let ids: Vec<_> = reloaded.catalog().all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let (dir, mut showcase) = fresh();
        let path = dir.path().join("garbage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            import(&mut showcase, &path),
            Err(CliError::Import(ImportError::Parse(_)))
        ));
    }
}
