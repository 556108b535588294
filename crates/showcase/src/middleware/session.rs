//! Session middleware configuration and one-shot notices.
//!
//! Sessions live in memory and the cookie lasts for the browser session, so
//! admin access ends when the browser closes or the server restarts.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::ShowcaseConfig;
use crate::models::{Notice, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "m5_session";

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &ShowcaseConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Queue a notice for the next rendered page.
///
/// A failure is logged and the notice dropped; notices are never worth
/// failing a request over.
pub async fn push_notice(session: &Session, notice: Notice) {
    if let Err(e) = session.insert(session_keys::NOTICE, &notice).await {
        tracing::warn!(error = %e, "Failed to store notice in session");
    }
}

/// Take the pending notice, if any, so it shows only once.
pub async fn take_notice(session: &Session) -> Option<Notice> {
    session
        .remove::<Notice>(session_keys::NOTICE)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read notice from session");
            None
        })
}
