//! Application state: the collections, settings and credential together
//! with the store they persist to.

use chrono::{DateTime, Utc};
use m5_core::{
    AdminPassword, Product, ProductDraft, ProductId, SiteSettings, Submission, SubmissionDraft,
    SubmissionId,
};

use super::{Catalog, ExportBundle, ImportError, SubmissionQueue};
use crate::store::{KeyValueStore, StoreError, keys, load_json, save_json};

/// A record that could not be written back to the store.
///
/// The in-memory change that triggered the write is kept; only durability
/// is lost.
#[derive(Debug, thiserror::Error)]
#[error("error saving {record}: {source}")]
pub struct PersistError {
    /// Human name of the record, e.g. `products`.
    pub record: &'static str,
    #[source]
    pub source: StoreError,
}

/// Everything the showcase knows, loaded once and written through on every
/// mutation.
pub struct Showcase {
    store: Box<dyn KeyValueStore>,
    catalog: Catalog,
    submissions: SubmissionQueue,
    settings: SiteSettings,
    password: AdminPassword,
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("products", &self.catalog.len())
            .field("submissions", &self.submissions.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Showcase {
    /// Load state from `store`.
    ///
    /// Missing or unreadable records fall back to their defaults: the sample
    /// catalog, an empty queue, the default settings and the default
    /// password. Fallbacks are not written back until the next mutation.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let now = Utc::now();

        let catalog = match load_json::<Vec<Product>>(store.as_ref(), keys::PRODUCTS) {
            Ok(Some(products)) => Catalog::new(products),
            Ok(None) => {
                tracing::info!("No stored products, starting from the sample catalog");
                Catalog::sample(now)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading products, using the sample catalog");
                Catalog::sample(now)
            }
        };

        let submissions = match load_json::<Vec<Submission>>(store.as_ref(), keys::SUBMISSIONS) {
            Ok(saved) => SubmissionQueue::new(saved.unwrap_or_default()),
            Err(e) => {
                tracing::error!(error = %e, "Error loading submissions, starting empty");
                SubmissionQueue::default()
            }
        };

        let settings = match load_json::<SiteSettings>(store.as_ref(), keys::SETTINGS) {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Error loading settings, using defaults");
                SiteSettings::default()
            }
        };

        let password = match store.get(keys::ADMIN_PASSWORD) {
            Ok(saved) => saved
                .and_then(|raw| AdminPassword::new(raw).ok())
                .unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Error loading admin password, using the default");
                AdminPassword::default()
            }
        };

        tracing::debug!(
            products = catalog.len(),
            submissions = submissions.len(),
            "Showcase state loaded"
        );

        Self {
            store,
            catalog,
            submissions,
            settings,
            password,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn submissions(&self) -> &SubmissionQueue {
        &self.submissions
    }

    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    #[must_use]
    pub const fn admin_password(&self) -> &AdminPassword {
        &self.password
    }

    /// Add a product and persist the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the catalog could not be written; the
    /// product stays in memory.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product, PersistError> {
        let product = self.catalog.create(draft, Utc::now());
        tracing::info!(id = %product.id, name = %product.name, "Product created");
        self.persist_products()?;
        Ok(product)
    }

    /// Replace a product's editable fields and persist the catalog.
    ///
    /// Returns `Ok(None)` without writing if no product has `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the catalog could not be written.
    pub fn update_product(
        &mut self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, PersistError> {
        let Some(product) = self.catalog.update(id, draft).cloned() else {
            tracing::debug!(%id, "Update for unknown product ignored");
            return Ok(None);
        };
        tracing::info!(%id, "Product updated");
        self.persist_products()?;
        Ok(Some(product))
    }

    /// Remove a product and persist the catalog.
    ///
    /// Returns `Ok(None)` without writing if no product has `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the catalog could not be written.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Option<Product>, PersistError> {
        let Some(product) = self.catalog.delete(id) else {
            tracing::debug!(%id, "Delete for unknown product ignored");
            return Ok(None);
        };
        tracing::info!(%id, "Product deleted");
        self.persist_products()?;
        Ok(Some(product))
    }

    /// Queue a visitor submission and persist the queue.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the queue could not be written.
    pub fn submit(&mut self, draft: SubmissionDraft) -> Result<Submission, PersistError> {
        let submission = self.submissions.create(draft, Utc::now());
        tracing::info!(id = %submission.id, name = %submission.name, "Submission received");
        self.persist_submissions()?;
        Ok(submission)
    }

    /// Publish a submission as a product.
    ///
    /// Both records are written even if the first write fails; the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if either record could not be written.
    pub fn approve_submission(
        &mut self,
        id: &SubmissionId,
    ) -> Result<Option<Product>, PersistError> {
        let Some(product) = self
            .submissions
            .approve(id, &mut self.catalog, Utc::now())
        else {
            tracing::debug!(%id, "Approval for unknown submission ignored");
            return Ok(None);
        };
        tracing::info!(submission = %id, product = %product.id, "Submission approved");
        let products = self.persist_products();
        let submissions = self.persist_submissions();
        products.and(submissions)?;
        Ok(Some(product))
    }

    /// Drop a submission and persist the queue.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the queue could not be written.
    pub fn reject_submission(
        &mut self,
        id: &SubmissionId,
    ) -> Result<Option<Submission>, PersistError> {
        let Some(submission) = self.submissions.reject(id) else {
            tracing::debug!(%id, "Rejection for unknown submission ignored");
            return Ok(None);
        };
        tracing::info!(%id, "Submission rejected");
        self.persist_submissions()?;
        Ok(Some(submission))
    }

    /// Replace the settings and, if given, the admin password.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if a record could not be written.
    pub fn save_settings(
        &mut self,
        settings: SiteSettings,
        password: Option<AdminPassword>,
    ) -> Result<(), PersistError> {
        self.settings = settings;
        let saved = self.persist_settings();
        let Some(password) = password else {
            return saved;
        };
        self.password = password;
        tracing::info!("Admin password changed");
        let password_saved = self.persist_password();
        saved.and(password_saved)
    }

    /// Snapshot of everything except the password.
    #[must_use]
    pub fn export(&self, now: DateTime<Utc>) -> ExportBundle {
        ExportBundle {
            products: self.catalog.all().to_vec(),
            submissions: self.submissions.list().to_vec(),
            settings: self.settings.clone(),
            export_date: now,
        }
    }

    /// Replace the catalog, queue and settings with a bundle's contents and
    /// persist all three.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] if the bundle repeats an id (nothing is
    /// replaced) or a record could not be written.
    pub fn import(&mut self, bundle: ExportBundle) -> Result<(), ImportError> {
        bundle.check_unique_ids()?;
        tracing::info!(
            products = bundle.products.len(),
            submissions = bundle.submissions.len(),
            "Importing bundle"
        );
        self.catalog.replace(bundle.products);
        self.submissions.replace(bundle.submissions);
        self.settings = bundle.settings;
        self.persist_everything()?;
        Ok(())
    }

    /// Write every record, including fallbacks that were never saved.
    ///
    /// # Errors
    ///
    /// Returns the first [`PersistError`]; later records are still attempted.
    pub fn persist_everything(&mut self) -> Result<(), PersistError> {
        let products = self.persist_products();
        let submissions = self.persist_submissions();
        let settings = self.persist_settings();
        products.and(submissions).and(settings)
    }

    fn persist_products(&mut self) -> Result<(), PersistError> {
        let result = save_json(self.store.as_mut(), keys::PRODUCTS, self.catalog.all());
        report(keys::PRODUCTS, "products", result)
    }

    fn persist_submissions(&mut self) -> Result<(), PersistError> {
        let result = save_json(self.store.as_mut(), keys::SUBMISSIONS, self.submissions.list());
        report(keys::SUBMISSIONS, "submissions", result)
    }

    fn persist_settings(&mut self) -> Result<(), PersistError> {
        let result = save_json(self.store.as_mut(), keys::SETTINGS, &self.settings);
        report(keys::SETTINGS, "settings", result)
    }

    fn persist_password(&mut self) -> Result<(), PersistError> {
        let result = self
            .store
            .set(keys::ADMIN_PASSWORD, self.password.expose());
        report(keys::ADMIN_PASSWORD, "admin password", result)
    }
}

fn report(
    key: &'static str,
    record: &'static str,
    result: Result<(), StoreError>,
) -> Result<(), PersistError> {
    result.map_err(|source| {
        tracing::error!(key, error = %source, "Error saving {record}");
        PersistError { record, source }
    })
}
