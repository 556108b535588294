//! Admin panel route handlers.
//!
//! Every handler requires the admin session. Mutations follow
//! post/redirect/get and report their outcome through a notice; unknown ids
//! change nothing and say nothing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use m5_core::{
    AdminPassword, ProductDraft, ProductId, ProductInput, SettingsInput, SiteSettings,
    SubmissionId,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::submit::capitalize;
use super::{ChoiceView, Chrome, category_choices};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{RequireAdmin, push_notice};
use crate::models::Notice;
use crate::services::{ExportBundle, PersistError};
use crate::state::AppState;
use crate::view::{AdminProductRow, SubmissionRow, render_admin_products, render_submissions};

/// Form field carrying the uploaded export file.
pub const IMPORT_FIELD: &str = "bundle";

// =============================================================================
// Tabs
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Submissions,
    Products,
    Settings,
}

impl AdminTab {
    const ALL: [Self; 3] = [Self::Submissions, Self::Products, Self::Settings];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Submissions => "submissions",
            Self::Products => "products",
            Self::Settings => "settings",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Submissions => "Submissions",
            Self::Products => "Products",
            Self::Settings => "Settings",
        }
    }

    /// Unknown or missing values open the submissions tab.
    fn parse(raw: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| Some(t.as_str()) == raw)
            .unwrap_or_default()
    }

    fn redirect(self) -> Redirect {
        Redirect::to(&format!("/admin?tab={}", self.as_str()))
    }
}

/// Admin panel query parameters.
#[derive(Debug, Deserialize)]
pub struct PanelParams {
    pub tab: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Admin panel template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/panel.html")]
pub struct PanelTemplate {
    pub chrome: Chrome,
    pub tab: &'static str,
    pub tabs: Vec<ChoiceView>,
    pub submissions: Vec<SubmissionRow>,
    pub products: Vec<AdminProductRow>,
    pub settings: SiteSettings,
}

/// Add/edit product form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub chrome: Chrome,
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub form: ProductInput,
    pub categories: Vec<ChoiceView>,
}

impl ProductFormTemplate {
    fn add(chrome: Chrome, form: ProductInput) -> Self {
        let categories = category_choices(&form.category);
        Self {
            chrome,
            heading: "Add New Product",
            action: "/admin/products".to_string(),
            submit_label: "Add Product",
            form,
            categories,
        }
    }

    fn edit(chrome: Chrome, id: &ProductId, form: ProductInput) -> Self {
        let categories = category_choices(&form.category);
        Self {
            chrome,
            heading: "Edit Product",
            action: format!("/admin/products/{id}"),
            submit_label: "Save Changes",
            form,
            categories,
        }
    }
}

/// Confirmation page for irreversible actions.
#[derive(Template, WebTemplate)]
#[template(path = "admin/confirm.html")]
pub struct ConfirmTemplate {
    pub chrome: Chrome,
    pub question: &'static str,
    pub subject: String,
    pub action: String,
    pub confirm_label: &'static str,
    pub cancel: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Success notice, or the storage error notice if the write failed.
fn outcome<T>(result: &std::result::Result<T, PersistError>, success: &str) -> Notice {
    match result {
        Ok(_) => Notice::success(success),
        Err(e) => Notice::error(format!("Error saving {}!", e.record)),
    }
}

/// Show the product form again after a validation failure.
async fn invalid_product_form(
    state: &AppState,
    session: &Session,
    message: String,
    build: impl FnOnce(Chrome) -> ProductFormTemplate,
) -> Result<Response> {
    let chrome = Chrome::load(state, session)
        .await?
        .with_notice(Notice::error(capitalize(&message)));
    Ok((StatusCode::UNPROCESSABLE_ENTITY, build(chrome)).into_response())
}

// =============================================================================
// Panel
// =============================================================================

/// Admin panel with the submissions, products and settings tabs.
#[instrument(skip(session, state))]
pub async fn panel(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PanelParams>,
) -> Result<PanelTemplate> {
    let tab = AdminTab::parse(params.tab.as_deref());
    let (submissions, products, settings) = state.with_showcase(|s| {
        (
            render_submissions(s.submissions().list()),
            render_admin_products(s.catalog()),
            s.settings().clone(),
        )
    })?;

    Ok(PanelTemplate {
        chrome: Chrome::load(&state, &session).await?,
        tab: tab.as_str(),
        tabs: AdminTab::ALL
            .into_iter()
            .map(|t| ChoiceView {
                value: t.as_str(),
                label: t.label(),
                selected: t == tab,
            })
            .collect(),
        submissions,
        products,
        settings,
    })
}

// =============================================================================
// Products
// =============================================================================

/// Display the add product form.
pub async fn new_product(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
) -> Result<ProductFormTemplate> {
    let chrome = Chrome::load(&state, &session).await?;
    Ok(ProductFormTemplate::add(chrome, ProductInput::default()))
}

/// Handle the add product form.
#[instrument(skip_all)]
pub async fn create_product(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductInput>,
) -> Result<Response> {
    let draft = match ProductDraft::parse(&form) {
        Ok(draft) => draft,
        Err(e) => {
            return invalid_product_form(&state, &session, e.to_string(), |chrome| {
                ProductFormTemplate::add(chrome, form)
            })
            .await;
        }
    };

    let result = state.with_showcase(|s| s.create_product(draft))?;
    if let Ok(product) = &result {
        add_breadcrumb("admin", "Product created", Some(&[("product_id", product.id.as_str())]));
    }
    push_notice(&session, outcome(&result, "Product added successfully!")).await;
    Ok(AdminTab::Products.redirect().into_response())
}

/// Display the edit form for a product.
pub async fn edit_product(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductFormTemplate> {
    let id = ProductId::new(id);
    let product = state
        .with_showcase(|s| s.catalog().get(&id).cloned())?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let chrome = Chrome::load(&state, &session).await?;
    let form = ProductInput::from_draft(&product.to_draft());
    Ok(ProductFormTemplate::edit(chrome, &id, form))
}

/// Handle the edit product form.
#[instrument(skip(session, state, form))]
pub async fn update_product(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductInput>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let draft = match ProductDraft::parse(&form) {
        Ok(draft) => draft,
        Err(e) => {
            return invalid_product_form(&state, &session, e.to_string(), |chrome| {
                ProductFormTemplate::edit(chrome, &id, form)
            })
            .await;
        }
    };

    match state.with_showcase(|s| s.update_product(&id, draft))? {
        Ok(None) => {}
        result => push_notice(&session, outcome(&result, "Product updated successfully!")).await,
    }
    Ok(AdminTab::Products.redirect().into_response())
}

/// Ask before deleting a product.
pub async fn confirm_delete(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ConfirmTemplate> {
    let id = ProductId::new(id);
    let name = state
        .with_showcase(|s| s.catalog().get(&id).map(|p| p.name.clone()))?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ConfirmTemplate {
        chrome: Chrome::load(&state, &session).await?,
        question: "Are you sure you want to delete this product?",
        subject: name,
        action: format!("/admin/products/{id}/delete"),
        confirm_label: "Delete",
        cancel: "/admin?tab=products".to_string(),
    })
}

/// Delete a product.
#[instrument(skip(session, state))]
pub async fn delete_product(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    match state.with_showcase(|s| s.delete_product(&id))? {
        Ok(None) => {}
        result => push_notice(&session, outcome(&result, "Product deleted successfully!")).await,
    }
    Ok(AdminTab::Products.redirect())
}

// =============================================================================
// Submissions
// =============================================================================

/// Publish a submission.
#[instrument(skip(session, state))]
pub async fn approve_submission(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = SubmissionId::new(id);
    match state.with_showcase(|s| s.approve_submission(&id))? {
        Ok(None) => {}
        result => {
            add_breadcrumb("admin", "Submission approved", Some(&[("submission_id", id.as_str())]));
            push_notice(&session, outcome(&result, "Product approved and published!")).await;
        }
    }
    Ok(AdminTab::Submissions.redirect())
}

/// Ask before rejecting a submission.
pub async fn confirm_reject(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ConfirmTemplate> {
    let id = SubmissionId::new(id);
    let name = state
        .with_showcase(|s| s.submissions().get(&id).map(|p| p.name.clone()))?
        .ok_or_else(|| AppError::NotFound(format!("submission {id}")))?;

    Ok(ConfirmTemplate {
        chrome: Chrome::load(&state, &session).await?,
        question: "Are you sure you want to reject this submission?",
        subject: name,
        action: format!("/admin/submissions/{id}/reject"),
        confirm_label: "Reject",
        cancel: "/admin?tab=submissions".to_string(),
    })
}

/// Reject a submission.
#[instrument(skip(session, state))]
pub async fn reject_submission(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = SubmissionId::new(id);
    match state.with_showcase(|s| s.reject_submission(&id))? {
        Ok(None) => {}
        result => push_notice(&session, outcome(&result, "Submission rejected.")).await,
    }
    Ok(AdminTab::Submissions.redirect())
}

// =============================================================================
// Settings & Data
// =============================================================================

/// Save the site settings and, if one was entered, a new admin password.
#[instrument(skip_all)]
pub async fn save_settings(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<SettingsInput>,
) -> Result<Redirect> {
    let notice = match SiteSettings::parse(&form) {
        Ok(settings) => {
            let password = AdminPassword::new(form.admin_password).ok();
            let result = state.with_showcase(|s| s.save_settings(settings, password))?;
            outcome(&result, "Settings saved successfully!")
        }
        Err(e) => Notice::error(capitalize(&e.to_string())),
    };
    push_notice(&session, notice).await;
    Ok(AdminTab::Settings.redirect())
}

/// Download everything except the password as `m5-data-YYYY-MM-DD.json`.
#[instrument(skip_all)]
pub async fn export(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response> {
    let bundle = state.with_showcase(|s| s.export(Utc::now()))?;
    let body = bundle
        .to_json_pretty()
        .map_err(|e| AppError::Internal(format!("export serialization failed: {e}")))?;
    let disposition = format!("attachment; filename=\"{}\"", bundle.file_name());
    tracing::info!(file = %bundle.file_name(), "Data exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Replace all data with an uploaded export file.
#[instrument(skip_all)]
pub async fn import(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(IMPORT_FIELD) {
            upload = Some(
                field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            );
            break;
        }
    }
    let Some(raw) = upload else {
        push_notice(&session, Notice::error("Choose an export file to import.")).await;
        return Ok(AdminTab::Settings.redirect());
    };

    let notice = match ExportBundle::from_json(&raw) {
        Ok(bundle) => match state.with_showcase(|s| s.import(bundle))? {
            Ok(()) => Notice::success("Data imported successfully!"),
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                Notice::error(capitalize(&e.to_string()))
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Rejected import file");
            Notice::error(capitalize(&e.to_string()))
        }
    };
    push_notice(&session, notice).await;
    Ok(AdminTab::Settings.redirect())
}
