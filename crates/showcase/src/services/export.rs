//! JSON export bundle.
//!
//! A single document holding the catalog, the pending submissions and the
//! settings, downloaded as `m5-data-YYYY-MM-DD.json` and accepted back by
//! import.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use m5_core::{Product, SiteSettings, Submission};
use serde::{Deserialize, Serialize};

use super::PersistError;

/// Errors that can occur importing a bundle.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid export document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id in export: {0}")]
    DuplicateProductId(String),
    #[error("duplicate submission id in export: {0}")]
    DuplicateSubmissionId(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Everything the showcase stores except the admin password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub products: Vec<Product>,
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub settings: SiteSettings,
    pub export_date: DateTime<Utc>,
}

impl ExportBundle {
    /// Download name derived from the export date.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("m5-data-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and check a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or repeats an id within
    /// the products or the submissions.
    pub fn from_json(raw: &str) -> Result<Self, ImportError> {
        let bundle: Self = serde_json::from_str(raw)?;
        bundle.check_unique_ids()?;
        Ok(bundle)
    }

    pub(crate) fn check_unique_ids(&self) -> Result<(), ImportError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.id.as_str()) {
                return Err(ImportError::DuplicateProductId(product.id.to_string()));
            }
        }
        seen.clear();
        for submission in &self.submissions {
            if !seen.insert(submission.id.as_str()) {
                return Err(ImportError::DuplicateSubmissionId(
                    submission.id.to_string(),
                ));
            }
        }
        Ok(())
    }
}
