//! HTTP route handlers for the showcase.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Catalog page (?filter=&q=)
//! GET  /catalog/grid                        - Catalog grid fragment (HTMX)
//! GET  /products/{id}                       - Product detail
//! GET  /health                              - Health check
//!
//! # Submissions
//! GET  /submit                              - Submission form
//! POST /submit                              - Create submission
//!
//! # Admin gate
//! GET  /admin/login                         - Login page
//! POST /admin/login                         - Login action
//! POST /admin/logout                        - Logout action
//!
//! # Admin (requires admin session)
//! GET  /admin                               - Panel (?tab=submissions|products|settings)
//! GET  /admin/products/new                  - Add product form
//! POST /admin/products                      - Create product
//! GET  /admin/products/{id}/edit            - Edit product form
//! POST /admin/products/{id}                 - Update product
//! GET  /admin/products/{id}/delete          - Delete confirmation
//! POST /admin/products/{id}/delete          - Delete product
//! POST /admin/submissions/{id}/approve      - Approve submission
//! GET  /admin/submissions/{id}/reject       - Reject confirmation
//! POST /admin/submissions/{id}/reject       - Reject submission
//! POST /admin/settings                      - Save settings
//! GET  /admin/export                        - Download JSON bundle
//! POST /admin/import                        - Upload JSON bundle
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod submit;

use axum::{
    Router,
    routing::{get, post},
};
use m5_core::Category;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{admin_session, take_notice};
use crate::models::Notice;
use crate::state::AppState;

// =============================================================================
// Shared Page Data
// =============================================================================

/// Data every full page needs: titles, the pending notice and whether the
/// admin link should read "Admin" or "Login".
#[derive(Debug, Clone)]
pub struct Chrome {
    pub page_title: String,
    pub site_title: String,
    pub site_description: String,
    pub notice: Option<Notice>,
    pub admin: bool,
}

impl Chrome {
    /// Build the page chrome, consuming the session's pending notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the showcase state is unavailable.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self, AppError> {
        let settings = state.with_showcase(|s| s.settings().clone())?;
        Ok(Self {
            page_title: settings.page_title(),
            site_title: settings.site_title,
            site_description: settings.site_description,
            notice: take_notice(session).await,
            admin: admin_session(session).await.is_authenticated(),
        })
    }

    /// Replace the notice with one produced while handling this request.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// An `<option>` or filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Category choices for product forms, with `selected` marking `current`.
#[must_use]
pub fn category_choices(current: &str) -> Vec<ChoiceView> {
    Category::ALL
        .iter()
        .map(|c| ChoiceView {
            value: c.as_str(),
            label: c.label(),
            selected: c.as_str() == current.trim(),
        })
        .collect()
}

// =============================================================================
// Routers
// =============================================================================

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::panel))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/products", post(admin::create_product))
        .route("/products/new", get(admin::new_product))
        .route("/products/{id}", post(admin::update_product))
        .route("/products/{id}/edit", get(admin::edit_product))
        .route(
            "/products/{id}/delete",
            get(admin::confirm_delete).post(admin::delete_product),
        )
        .route("/submissions/{id}/approve", post(admin::approve_submission))
        .route(
            "/submissions/{id}/reject",
            get(admin::confirm_reject).post(admin::reject_submission),
        )
        .route("/settings", post(admin::save_settings))
        .route("/export", get(admin::export))
        .route("/import", post(admin::import))
}

/// Create all routes for the showcase.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/catalog/grid", get(catalog::grid))
        .route("/products/{id}", get(catalog::show))
        .route("/submit", get(submit::form).post(submit::create))
        .nest("/admin", admin_routes())
        .route("/health", get(health))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_choices_mark_selection() {
        let choices = category_choices(" design ");
        let selected: Vec<_> = choices.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Design");
        assert!(category_choices("").iter().all(|c| !c.selected));
    }
}
