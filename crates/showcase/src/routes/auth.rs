//! Admin gate route handlers.
//!
//! A single shared password unlocks the admin panel for the rest of the
//! browser session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::Chrome;
use crate::error::Result;
use crate::middleware::{admin_session, push_notice, set_admin_session};
use crate::models::Notice;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: SecretString,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
}

/// Display the login page, or go straight to the panel if already unlocked.
pub async fn login_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    if admin_session(&session).await.is_authenticated() {
        return Ok(Redirect::to("/admin").into_response());
    }
    Ok(LoginTemplate {
        chrome: Chrome::load(&state, &session).await?,
    }
    .into_response())
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let current = admin_session(&session).await;
    let attempt = state.with_showcase(|s| {
        current.login(s.admin_password(), form.password.expose_secret())
    })?;

    match attempt {
        Ok(next) => {
            // New session id on privilege change
            session.cycle_id().await?;
            set_admin_session(&session, next).await?;
            tracing::info!("Admin login succeeded");
            push_notice(&session, Notice::success("Admin access granted!")).await;
            Ok(Redirect::to("/admin"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            push_notice(&session, Notice::error("Invalid admin password!")).await;
            Ok(Redirect::to("/admin/login"))
        }
    }
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    let next = admin_session(&session).await.logout();
    set_admin_session(&session, next).await?;
    push_notice(&session, Notice::success("Logged out successfully!")).await;
    Ok(Redirect::to("/"))
}
