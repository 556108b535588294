//! Admin gate extractors.
//!
//! Provides extractors for requiring the admin session in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AdminSession, session_keys};

/// Login page anonymous visitors are sent to.
pub const LOGIN_PATH: &str = "/admin/login";

/// Extractor that requires an authenticated admin session.
///
/// Anonymous visitors are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(session): RequireAdmin) -> impl IntoResponse {
///     "Welcome to the admin panel"
/// }
/// ```
pub struct RequireAdmin(pub Session);

/// Error returned when the admin session is required but missing.
pub enum AdminRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// The session layer is not installed.
    MissingSession,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminRejection::MissingSession)?;

        if admin_session(&session).await.is_authenticated() {
            Ok(Self(session))
        } else {
            tracing::debug!(path = %parts.uri.path(), "Anonymous request to admin route");
            Err(AdminRejection::RedirectToLogin)
        }
    }
}

/// Current admin state of `session`; unreadable state counts as anonymous.
pub async fn admin_session(session: &Session) -> AdminSession {
    session
        .get::<AdminSession>(session_keys::ADMIN)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the admin state in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_session(
    session: &Session,
    state: AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN, state).await
}
